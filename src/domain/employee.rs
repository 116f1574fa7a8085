use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Cents, DepartmentId, PositionId, validation};

/// Short alphanumeric identifier, unique and immutable once assigned (e.g. "EMP001").
pub type EmployeeNumber = String;

pub const MAX_EMPLOYEE_NUMBER_LEN: u64 = 6;
pub const MAX_EMPLOYEE_NAME_LEN: u64 = 20;
/// Yearly allotment; also the balance every new employee starts with.
pub const MAX_VACATION_DAYS: i32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub number: EmployeeNumber,
    pub name: String,
    pub department_id: DepartmentId,
    pub position_id: PositionId,
    pub gender: Gender,
    /// Manager's employee number. A plain key, never an owning link:
    /// removing the manager clears it.
    pub manager: Option<EmployeeNumber>,
    /// Remaining vacation days. Only approvals decrement it, and nothing clamps it.
    pub vacation_days_left: i32,
    pub salary_cents: Cents,
}

impl Employee {
    pub fn new(
        number: impl Into<EmployeeNumber>,
        name: impl Into<String>,
        department_id: DepartmentId,
        position_id: PositionId,
        gender: Gender,
        salary_cents: Cents,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            department_id,
            position_id,
            gender,
            manager: None,
            vacation_days_left: MAX_VACATION_DAYS,
            salary_cents,
        }
    }

    pub fn with_manager(mut self, manager: impl Into<EmployeeNumber>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    pub fn with_vacation_days(mut self, days: i32) -> Self {
        self.vacation_days_left = days;
        self
    }
}

/// Onboarding input, as entered. Checked and converted by `validation::validate_new_employee`.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = validation::distinct_manager, skip_on_field_errors = false))]
pub struct NewEmployee {
    #[validate(
        length(min = 1, message = "Employee number is required"),
        custom(function = validation::employee_number_format)
    )]
    pub number: String,
    #[validate(
        length(max = MAX_EMPLOYEE_NAME_LEN, message = "Employee name must not exceed 20 characters"),
        custom(function = validation::not_blank, message = "Employee name is required")
    )]
    pub name: String,
    pub department_id: DepartmentId,
    pub position_id: PositionId,
    #[validate(custom(function = validation::gender_code))]
    pub gender: String,
    #[validate(custom(function = validation::manager_number_format))]
    pub manager: Option<EmployeeNumber>,
    /// Defaults to the full yearly allotment
    #[validate(range(min = 0, max = MAX_VACATION_DAYS, message = "Vacation days must be between 0 and 24"))]
    pub vacation_days_left: Option<i32>,
    /// Decimal string, e.g. "4250.50"
    #[validate(custom(function = validation::salary_amount))]
    pub salary: String,
}

/// Employee joined with the names of everything it references, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDetails {
    pub employee: Employee,
    pub department_name: String,
    pub position_name: String,
    pub manager_name: Option<String>,
}

/// Partial update of an employee. `None` leaves the field untouched;
/// `manager: Some(None)` clears the manager.
#[derive(Debug, Clone, Default, Validate)]
pub struct EmployeeUpdate {
    #[validate(
        length(max = MAX_EMPLOYEE_NAME_LEN, message = "Employee name must not exceed 20 characters"),
        custom(function = validation::not_blank, message = "Employee name is required")
    )]
    pub name: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub position_id: Option<PositionId>,
    pub gender: Option<Gender>,
    pub manager: Option<Option<EmployeeNumber>>,
    #[validate(range(min = 0, max = MAX_VACATION_DAYS, message = "Vacation days must be between 0 and 24"))]
    pub vacation_days_left: Option<i32>,
    #[validate(range(min = 1, message = "Salary must be a positive amount"))]
    pub salary_cents: Option<Cents>,
}

impl EmployeeUpdate {
    /// Apply the update to a copy of `employee`. The employee number never changes.
    pub fn apply_to(&self, employee: &Employee) -> Employee {
        let mut updated = employee.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(department_id) = self.department_id {
            updated.department_id = department_id;
        }
        if let Some(position_id) = self.position_id {
            updated.position_id = position_id;
        }
        if let Some(gender) = self.gender {
            updated.gender = gender;
        }
        if let Some(manager) = &self.manager {
            updated.manager = manager.clone();
        }
        if let Some(days) = self.vacation_days_left {
            updated.vacation_days_left = days;
        }
        if let Some(salary) = self.salary_cents {
            updated.salary_cents = salary;
        }
        updated
    }
}

/// Returns true if making `proposed_manager` the manager of `employee` would close a loop.
///
/// `manager_of` resolves an employee number to that employee's manager. The walk
/// stops at the first employee without a manager, or as soon as it revisits a node
/// (an already corrupt chain is treated as a cycle).
pub fn creates_manager_cycle<F>(employee: &str, proposed_manager: &str, manager_of: F) -> bool
where
    F: Fn(&str) -> Option<EmployeeNumber>,
{
    let mut seen = std::collections::HashSet::new();
    let mut current = Some(proposed_manager.to_string());

    while let Some(number) = current {
        if number == employee || !seen.insert(number.clone()) {
            return true;
        }
        current = manager_of(&number);
    }

    false
}
