use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::{RequestId, VacationRequest};
use crate::storage::Repository;

use super::{AppError, Directory};

/// Guards the "no two approved leave periods overlap" invariant and keeps
/// vacation balances.
#[derive(Clone)]
pub struct VacationLedger {
    repo: Repository,
    directory: Directory,
}

impl VacationLedger {
    pub fn new(repo: Repository, directory: Directory) -> Self {
        Self { repo, directory }
    }

    /// True if an approved request of `employee` shares at least one day with
    /// `[start, end]`. Submitted and declined requests do not count.
    pub async fn has_overlap(
        &self,
        employee: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, AppError> {
        Ok(self
            .repo
            .has_approved_overlap(employee, start, end, None)
            .await?)
    }

    /// Same as `has_overlap`, ignoring one request. Used when approving it.
    pub async fn has_overlap_excluding(
        &self,
        employee: &str,
        start: NaiveDate,
        end: NaiveDate,
        request_id: RequestId,
    ) -> Result<bool, AppError> {
        Ok(self
            .repo
            .has_approved_overlap(employee, start, end, Some(request_id))
            .await?)
    }

    /// Remaining vacation days of an employee.
    pub async fn balance(&self, employee: &str) -> Result<i32, AppError> {
        Ok(self.directory.get_employee(employee).await?.vacation_days_left)
    }

    /// Take `days` off the employee's balance and return the new balance.
    ///
    /// Neither clamps at zero nor checks sufficiency; the workflow policy decides
    /// whether an approval may drive the balance negative.
    pub async fn deduct(&self, employee: &str, days: i32) -> Result<i32, AppError> {
        if !self.repo.adjust_vacation_days(employee, -days).await? {
            return Err(AppError::not_found("Employee", employee));
        }

        let remaining = self.balance(employee).await?;
        if remaining < 0 {
            debug!(employee, remaining, "vacation balance is negative");
        }
        info!(employee, days, remaining, "vacation days deducted");
        Ok(remaining)
    }

    /// Persist an approved request together with its deduction. Either both
    /// land or neither does.
    pub async fn settle_approval(&self, request: &VacationRequest) -> Result<i32, AppError> {
        let Some(remaining) = self.repo.approve_vacation_request(request).await? else {
            return Err(AppError::not_found("Employee", &request.employee));
        };

        if remaining < 0 {
            debug!(employee = %request.employee, remaining, "vacation balance is negative");
        }
        info!(days = request.total_days, remaining, "vacation days deducted");
        Ok(remaining)
    }
}
