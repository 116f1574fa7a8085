// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use hrdesk::application::{HrDesk, WorkflowPolicy};
use hrdesk::Repository;
use hrdesk::domain::{Department, NewEmployee, NewVacationRequest, Position, VacationType};
use tempfile::TempDir;

/// Helper to create a test desk with a temporary database and the default policy
pub async fn test_desk() -> Result<(HrDesk, TempDir)> {
    test_desk_with(WorkflowPolicy::default()).await
}

/// Helper to create a test desk with a temporary database
pub async fn test_desk_with(policy: WorkflowPolicy) -> Result<(HrDesk, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let desk = HrDesk::init(db_path.to_str().unwrap(), policy).await?;
    Ok((desk, temp_dir))
}

/// Helper to create a test desk that shares its repository with the caller
pub async fn test_repo_desk() -> Result<(Repository, HrDesk, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let repo = Repository::init(&format!("sqlite:{}?mode=rwc", db_path.display())).await?;
    let desk = HrDesk::new(repo.clone(), WorkflowPolicy::default());
    Ok((repo, desk, temp_dir))
}

/// Helper to parse a date string (YYYY-MM-DD)
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to build a UTC timestamp at midnight of the given date
pub fn at(date_str: &str) -> DateTime<Utc> {
    date(date_str).and_hms_opt(0, 0, 0).unwrap().and_utc()
}

pub fn new_employee(
    number: &str,
    name: &str,
    department: &Department,
    position: &Position,
    manager: Option<&str>,
) -> NewEmployee {
    NewEmployee {
        number: number.to_string(),
        name: name.to_string(),
        department_id: department.id,
        position_id: position.id,
        gender: "F".to_string(),
        manager: manager.map(str::to_string),
        vacation_days_left: None,
        salary: "3000.00".to_string(),
    }
}

pub fn annual(employee: &str, start: &str, end: &str) -> NewVacationRequest {
    NewVacationRequest::new(
        employee,
        VacationType::Annual,
        "Annual leave",
        date(start),
        date(end),
    )
}

/// Test fixture: one department, one position, EMP002 managing EMP001
pub struct Team {
    pub department: Department,
    pub position: Position,
}

impl Team {
    pub async fn create(desk: &HrDesk) -> Result<Self> {
        let directory = desk.directory();
        let department = directory.create_department("Engineering").await?;
        let position = directory.create_position("Developer").await?;

        directory
            .create_employee(new_employee(
                "EMP002",
                "Maria Rossi",
                &department,
                &position,
                None,
            ))
            .await?;
        directory
            .create_employee(new_employee(
                "EMP001",
                "Luca Bianchi",
                &department,
                &position,
                Some("EMP002"),
            ))
            .await?;

        Ok(Self {
            department,
            position,
        })
    }

    /// Add another direct report of EMP002.
    pub async fn hire(&self, desk: &HrDesk, number: &str, name: &str) -> Result<()> {
        desk.directory()
            .create_employee(new_employee(
                number,
                name,
                &self.department,
                &self.position,
                Some("EMP002"),
            ))
            .await?;
        Ok(())
    }
}
