//! Field rules for every input the desk accepts.
//!
//! The rules live on the input types as `#[validate(...)]` attributes. This
//! module holds the custom checks those attributes name, the conversion into
//! the desk's own error list, and the entry points that turn a checked input
//! into a domain value.

use std::borrow::Cow;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use validator::{Validate, ValidationError};

use super::{
    Employee, EmployeeUpdate, Gender, MAX_DEPARTMENT_NAME_LEN, MAX_EMPLOYEE_NUMBER_LEN,
    MAX_POSITION_NAME_LEN, MAX_VACATION_DAYS, NewEmployee, NewVacationRequest, ParseCentsError,
    VacationRequest, VacationType, parse_cents,
};

/// Earliest and latest calendar year a stored date may carry.
pub const MIN_SUPPORTED_YEAR: i32 = 1;
pub const MAX_SUPPORTED_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every rule that failed for one input, ordered by field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Input field names as callers know them.
fn public_field(field: &str) -> &str {
    match field {
        "number" | "employee" => "employee_number",
        "name" => "employee_name",
        other => other,
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(source: validator::ValidationErrors) -> Self {
        let mut errors = Self::default();
        for (field, failures) in source.field_errors() {
            let field = field.to_string();
            for failure in failures.iter() {
                // Struct-level rules report under "__all__" and carry the field in their code
                let name = if field == "__all__" {
                    failure.code.to_string()
                } else {
                    public_field(&field).to_string()
                };
                let message = match &failure.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid {}", name),
                };
                errors.push(name, message);
            }
        }
        errors.errors.sort_by(|a, b| a.field.cmp(&b.field));
        errors
    }
}

fn checked(input: &impl Validate) -> ValidationErrors {
    match input.validate() {
        Ok(()) => ValidationErrors::default(),
        Err(errors) => errors.into(),
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn is_employee_number(value: &str) -> bool {
    !value.is_empty()
        && value.len() as u64 <= MAX_EMPLOYEE_NUMBER_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub(crate) fn employee_number_format(value: &str) -> Result<(), ValidationError> {
    if is_employee_number(value) {
        Ok(())
    } else {
        Err(invalid(
            "employee_number",
            "Employee number must be up to 6 alphanumeric characters",
        ))
    }
}

pub(crate) fn manager_number_format(value: &str) -> Result<(), ValidationError> {
    if is_employee_number(value) {
        Ok(())
    } else {
        Err(invalid("manager", "Manager must be a valid employee number"))
    }
}

pub(crate) fn gender_code(value: &str) -> Result<(), ValidationError> {
    match Gender::from_code(value) {
        Some(_) => Ok(()),
        None => Err(invalid("gender", "Gender must be either 'M' or 'F'")),
    }
}

pub(crate) fn salary_amount(value: &str) -> Result<(), ValidationError> {
    match parse_cents(value) {
        Ok(cents) if cents > 0 => Ok(()),
        Err(ParseCentsError::TooManyDecimals) => Err(invalid(
            "salary",
            "Salary must be positive with maximum 2 decimal places",
        )),
        _ => Err(invalid("salary", "Salary must be a positive amount")),
    }
}

pub(crate) fn vacation_type_code(value: &str) -> Result<(), ValidationError> {
    match VacationType::from_code(value) {
        Some(_) => Ok(()),
        None => Err(invalid("vacation_type", "Invalid vacation type")),
    }
}

pub(crate) fn supported_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if is_supported_year(value.year()) {
        Ok(())
    } else {
        Err(invalid("date", "Date must fall between years 1 and 9999"))
    }
}

pub fn is_supported_year(year: i32) -> bool {
    (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&year)
}

pub(crate) fn distinct_manager(input: &NewEmployee) -> Result<(), ValidationError> {
    if input.manager.as_deref() == Some(input.number.as_str()) {
        return Err(invalid("manager", "An employee cannot report to themselves"));
    }
    Ok(())
}

pub(crate) fn ordered_range(input: &NewVacationRequest) -> Result<(), ValidationError> {
    if input.start_date > input.end_date {
        return Err(invalid(
            "end_date",
            "End date must be equal to or after start date",
        ));
    }
    Ok(())
}

/// Check onboarding input and convert it into an `Employee`.
pub fn validate_new_employee(input: &NewEmployee) -> Result<Employee, ValidationErrors> {
    checked(input).into_result()?;

    let gender = Gender::from_code(&input.gender);
    let salary = parse_cents(&input.salary);
    let (Some(gender), Ok(salary_cents)) = (gender, salary) else {
        return Err(ValidationErrors::single("employee", "Invalid employee input"));
    };

    let mut employee = Employee::new(
        input.number.clone(),
        input.name.trim(),
        input.department_id,
        input.position_id,
        gender,
        salary_cents,
    )
    .with_vacation_days(input.vacation_days_left.unwrap_or(MAX_VACATION_DAYS));
    if let Some(manager) = &input.manager {
        employee = employee.with_manager(manager.clone());
    }
    Ok(employee)
}

/// Check the fields an update sets for employee `number`. Fields the update
/// leaves alone are not re-checked, so a stored balance that approvals drove
/// below zero does not block an unrelated edit.
pub fn validate_employee_update(
    number: &str,
    update: &EmployeeUpdate,
) -> Result<(), ValidationErrors> {
    let mut errors = checked(update);
    if let Some(Some(manager)) = &update.manager {
        if !is_employee_number(manager) {
            errors.push("manager", "Manager must be a valid employee number");
        }
        if manager == number {
            errors.push("manager", "An employee cannot report to themselves");
        }
    }
    errors.into_result()
}

/// Check a submission and convert it into a Submitted `VacationRequest`.
///
/// `today` enables the "start date must be today or later" rule; pass `None`
/// to accept backdated requests.
pub fn validate_vacation_request(
    input: &NewVacationRequest,
    today: Option<NaiveDate>,
) -> Result<VacationRequest, ValidationErrors> {
    let mut errors = checked(input);
    if today.is_some_and(|today| input.start_date < today) {
        errors.push("start_date", "Start date must be today or in the future");
    }
    errors.into_result()?;

    let Some(vacation_type) = VacationType::from_code(&input.vacation_type) else {
        return Err(ValidationErrors::single("vacation_type", "Invalid vacation type"));
    };

    Ok(VacationRequest::new(
        input.employee.clone(),
        vacation_type,
        input.description.trim(),
        input.start_date,
        input.end_date,
        Utc::now(),
    ))
}

#[derive(Validate)]
struct DepartmentName {
    #[validate(
        length(max = MAX_DEPARTMENT_NAME_LEN, message = "Department name must not exceed 100 characters"),
        custom(function = not_blank, message = "Department name is required")
    )]
    department_name: String,
}

#[derive(Validate)]
struct PositionName {
    #[validate(
        length(max = MAX_POSITION_NAME_LEN, message = "Position name must not exceed 30 characters"),
        custom(function = not_blank, message = "Position name is required")
    )]
    position_name: String,
}

pub fn validate_department_name(name: &str) -> Result<(), ValidationErrors> {
    checked(&DepartmentName {
        department_name: name.to_string(),
    })
    .into_result()
}

pub fn validate_position_name(name: &str) -> Result<(), ValidationErrors> {
    checked(&PositionName {
        position_name: name.to_string(),
    })
    .into_result()
}
