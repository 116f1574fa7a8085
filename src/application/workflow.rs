use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::domain::{
    NewVacationRequest, RequestId, VacationRequest, validate_deduction,
    validation::validate_vacation_request,
};
use crate::storage::Repository;

use super::{AppError, Directory, VacationLedger};

/// Switches for the rules that are a matter of HR policy rather than data integrity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowPolicy {
    /// Approve and decline only requests that are still Submitted.
    /// When off, a final request can be approved or declined again, and a
    /// repeated approval deducts again.
    pub guard_transitions: bool,
    /// Refuse an approval that would take more days than the employee has left.
    pub require_sufficient_balance: bool,
    /// Refuse submissions starting before today.
    pub require_future_start: bool,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            guard_transitions: true,
            require_sufficient_balance: false,
            require_future_start: false,
        }
    }
}

impl WorkflowPolicy {
    /// Every transition and deduction goes through unchecked.
    pub fn unguarded() -> Self {
        Self {
            guard_transitions: false,
            require_sufficient_balance: false,
            require_future_start: false,
        }
    }
}

/// Lifecycle of a vacation request: Submitted, then exactly one of Approved or Declined.
#[derive(Clone)]
pub struct RequestWorkflow {
    repo: Repository,
    directory: Directory,
    ledger: VacationLedger,
    policy: WorkflowPolicy,
}

impl RequestWorkflow {
    pub fn new(
        repo: Repository,
        directory: Directory,
        ledger: VacationLedger,
        policy: WorkflowPolicy,
    ) -> Self {
        Self {
            repo,
            directory,
            ledger,
            policy,
        }
    }

    pub fn policy(&self) -> WorkflowPolicy {
        self.policy
    }

    /// Submit a new request, stamped with the current time.
    pub async fn submit(&self, input: NewVacationRequest) -> Result<VacationRequest, AppError> {
        self.submit_at(input, Utc::now()).await
    }

    /// Submit a new request with an explicit submission timestamp.
    #[instrument(skip(self, input), fields(employee = %input.employee))]
    pub async fn submit_at(
        &self,
        input: NewVacationRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<VacationRequest, AppError> {
        let today = self
            .policy
            .require_future_start
            .then(|| submitted_at.date_naive());

        let mut request = validate_vacation_request(&input, today)?;
        request.submitted_at = submitted_at;
        self.directory.get_employee(&request.employee).await?;

        if self
            .ledger
            .has_overlap(&request.employee, request.start_date, request.end_date)
            .await?
        {
            warn!(
                start = %request.start_date,
                end = %request.end_date,
                "submission overlaps approved leave"
            );
            return Err(AppError::conflict(
                "Vacation dates overlap with existing requests",
            ));
        }

        self.repo.save_vacation_request(&mut request).await?;
        info!(
            request_id = request.id,
            total_days = request.total_days,
            "vacation request submitted"
        );
        Ok(request)
    }

    /// Approve a request and deduct its days from the owner's balance.
    ///
    /// The approver must be a known employee; whether they manage the requester
    /// is not checked.
    #[instrument(skip(self))]
    pub async fn approve(
        &self,
        request_id: RequestId,
        approver: &str,
    ) -> Result<VacationRequest, AppError> {
        let mut request = self.get_request(request_id).await?;
        self.directory.get_employee(approver).await?;

        if self.policy.guard_transitions {
            request.ensure_pending()?;
        }

        // Two overlapping Submitted requests must not both end up Approved
        if self
            .ledger
            .has_overlap_excluding(
                &request.employee,
                request.start_date,
                request.end_date,
                request.id,
            )
            .await?
        {
            warn!("approval would overlap approved leave");
            return Err(AppError::conflict(
                "Vacation dates overlap with existing requests",
            ));
        }

        if self.policy.require_sufficient_balance {
            let balance = self.ledger.balance(&request.employee).await?;
            validate_deduction(balance, request.total_days)?;
        }

        request.approve(approver);
        let remaining = self.ledger.settle_approval(&request).await?;
        info!(remaining, "vacation request approved");
        Ok(request)
    }

    /// Decline a request. Balances are untouched.
    #[instrument(skip(self))]
    pub async fn decline(
        &self,
        request_id: RequestId,
        decliner: &str,
    ) -> Result<VacationRequest, AppError> {
        let mut request = self.get_request(request_id).await?;
        self.directory.get_employee(decliner).await?;

        if self.policy.guard_transitions {
            request.ensure_pending()?;
        }

        request.decline(decliner);
        self.repo.update_vacation_request(&request).await?;
        info!("vacation request declined");
        Ok(request)
    }

    /// Get a request by id.
    pub async fn get_request(&self, request_id: RequestId) -> Result<VacationRequest, AppError> {
        self.repo
            .get_vacation_request(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Vacation request", request_id))
    }

    /// Submitted requests of the approver's direct reports, oldest submission first.
    pub async fn pending_approvals_for(
        &self,
        approver: &str,
    ) -> Result<Vec<VacationRequest>, AppError> {
        Ok(self.repo.list_pending_for_manager(approver).await?)
    }

    /// Every request of an employee, most recent start date first.
    pub async fn history_for(&self, employee: &str) -> Result<Vec<VacationRequest>, AppError> {
        Ok(self.repo.list_requests_for_employee(employee).await?)
    }
}
