use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{EmployeeNumber, MAX_EMPLOYEE_NUMBER_LEN, validation};

pub type RequestId = i64;

pub const MAX_DESCRIPTION_LEN: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VacationType {
    Sick,
    Unpaid,
    Annual,
    DayOff,
    BusinessTrip,
}

impl VacationType {
    pub const ALL: [VacationType; 5] = [
        VacationType::Sick,
        VacationType::Unpaid,
        VacationType::Annual,
        VacationType::DayOff,
        VacationType::BusinessTrip,
    ];

    /// Single-letter code used in storage and on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            VacationType::Sick => "S",
            VacationType::Unpaid => "U",
            VacationType::Annual => "A",
            VacationType::DayOff => "O",
            VacationType::BusinessTrip => "B",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "S" => Some(VacationType::Sick),
            "U" => Some(VacationType::Unpaid),
            "A" => Some(VacationType::Annual),
            "O" => Some(VacationType::DayOff),
            "B" => Some(VacationType::BusinessTrip),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VacationType::Sick => "Sick Leave",
            VacationType::Unpaid => "Unpaid Leave",
            VacationType::Annual => "Annual Leave",
            VacationType::DayOff => "Day Off",
            VacationType::BusinessTrip => "Business Trip",
        }
    }
}

impl std::fmt::Display for VacationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Submitted,
    Approved,
    Declined,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Submitted => "submitted",
            RequestState::Approved => "approved",
            RequestState::Declined => "declined",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "submitted" => Some(RequestState::Submitted),
            "approved" => Some(RequestState::Approved),
            "declined" => Some(RequestState::Declined),
            _ => None,
        }
    }

    /// Approved and Declined are final: nothing leaves them.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestState::Submitted)
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Number of calendar days covered by an inclusive date range.
/// A single-day request (start == end) counts as 1.
pub fn total_days(start: NaiveDate, end: NaiveDate) -> i32 {
    ((end - start).num_days() + 1) as i32
}

/// Submission input. `vacation_type` is the raw code so an unknown code is
/// reported alongside every other failing rule.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = validation::ordered_range, skip_on_field_errors = false))]
pub struct NewVacationRequest {
    #[validate(
        length(
            min = 1,
            max = MAX_EMPLOYEE_NUMBER_LEN,
            message = "Employee number is required and must not exceed 6 characters"
        ),
        custom(
            function = validation::not_blank,
            message = "Employee number is required and must not exceed 6 characters"
        )
    )]
    pub employee: EmployeeNumber,
    #[validate(custom(function = validation::vacation_type_code))]
    pub vacation_type: String,
    #[validate(
        length(
            max = MAX_DESCRIPTION_LEN,
            message = "Description is required and must not exceed 100 characters"
        ),
        custom(
            function = validation::not_blank,
            message = "Description is required and must not exceed 100 characters"
        )
    )]
    pub description: String,
    #[validate(custom(function = validation::supported_date))]
    pub start_date: NaiveDate,
    #[validate(custom(function = validation::supported_date))]
    pub end_date: NaiveDate,
}

impl NewVacationRequest {
    pub fn new(
        employee: impl Into<EmployeeNumber>,
        vacation_type: VacationType,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employee: employee.into(),
            vacation_type: vacation_type.code().to_string(),
            description: description.into(),
            start_date,
            end_date,
        }
    }
}

/// A request for leave by one employee over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRequest {
    /// Assigned by the repository on insert
    pub id: RequestId,
    pub employee: EmployeeNumber,
    pub vacation_type: VacationType,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Inclusive day count, fixed at submission
    pub total_days: i32,
    pub state: RequestState,
    pub submitted_at: DateTime<Utc>,
    pub approved_by: Option<EmployeeNumber>,
    pub declined_by: Option<EmployeeNumber>,
}

impl VacationRequest {
    /// Create a new request in the Submitted state.
    pub fn new(
        employee: impl Into<EmployeeNumber>,
        vacation_type: VacationType,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        assert!(start_date <= end_date, "Vacation must not end before it starts");
        Self {
            id: 0,
            employee: employee.into(),
            vacation_type,
            description: description.into(),
            start_date,
            end_date,
            total_days: total_days(start_date, end_date),
            state: RequestState::Submitted,
            submitted_at,
            approved_by: None,
            declined_by: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == RequestState::Submitted
    }

    pub fn is_approved(&self) -> bool {
        self.state == RequestState::Approved
    }

    /// Fails if the request already reached a final state.
    pub fn ensure_pending(&self) -> Result<(), TransitionError> {
        if self.state.is_terminal() {
            return Err(TransitionError::AlreadyFinal {
                request_id: self.id,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Mark approved by `approver`, clearing any earlier decliner. Does not check
    /// the current state; callers that want the transition guarded call
    /// `ensure_pending` first.
    pub fn approve(&mut self, approver: impl Into<EmployeeNumber>) {
        self.state = RequestState::Approved;
        self.approved_by = Some(approver.into());
        self.declined_by = None;
    }

    /// Mark declined by `decliner`. Same guard contract as `approve`.
    pub fn decline(&mut self, decliner: impl Into<EmployeeNumber>) {
        self.state = RequestState::Declined;
        self.declined_by = Some(decliner.into());
        self.approved_by = None;
    }

    /// Human-readable duration, e.g. "1 day" or "5 days".
    pub fn duration_label(&self) -> String {
        if self.total_days == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", self.total_days)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    AlreadyFinal {
        request_id: RequestId,
        state: RequestState,
    },
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionError::AlreadyFinal { request_id, state } => {
                write!(f, "Vacation request {} is already {}", request_id, state)
            }
        }
    }
}

impl std::error::Error for TransitionError {}
