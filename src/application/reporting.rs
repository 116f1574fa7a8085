use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{
    DepartmentId, VacationRequest, VacationType, ValidationErrors, validation::is_supported_year,
};
use crate::storage::Repository;

use super::{AppError, Directory};

/// Approved leave taken in one calendar year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationStatistics {
    pub year: i32,
    pub total_requests: i64,
    pub total_days: i64,
    /// One entry per vacation type, including types with no requests
    pub by_type: Vec<VacationTypeAggregate>,
}

impl VacationStatistics {
    pub fn for_type(&self, vacation_type: VacationType) -> Option<&VacationTypeAggregate> {
        self.by_type.iter().find(|a| a.vacation_type == vacation_type)
    }
}

// Helper struct for repository aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationTypeAggregate {
    pub vacation_type: VacationType,
    pub request_count: i64,
    pub total_days: i64,
}

/// Read-only views across employees and departments.
#[derive(Clone)]
pub struct Reports {
    repo: Repository,
    directory: Directory,
}

impl Reports {
    pub fn new(repo: Repository, directory: Directory) -> Self {
        Self { repo, directory }
    }

    /// Approved requests starting in `year`, counted per vacation type.
    pub async fn vacation_statistics(&self, year: i32) -> Result<VacationStatistics, AppError> {
        let (true, Some(from), Some(to)) = (
            is_supported_year(year),
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            return Err(
                ValidationErrors::single("year", format!("Year {} is out of range", year)).into(),
            );
        };

        let found = self.repo.aggregate_approved_by_type(from, to).await?;
        let by_type: Vec<VacationTypeAggregate> = VacationType::ALL
            .into_iter()
            .map(|vacation_type| {
                found
                    .iter()
                    .find(|a| a.vacation_type == vacation_type)
                    .cloned()
                    .unwrap_or(VacationTypeAggregate {
                        vacation_type,
                        request_count: 0,
                        total_days: 0,
                    })
            })
            .collect();

        Ok(VacationStatistics {
            year,
            total_requests: by_type.iter().map(|a| a.request_count).sum(),
            total_days: by_type.iter().map(|a| a.total_days).sum(),
            by_type,
        })
    }

    /// Requests of any state that share a day with `[start, end]`, by start date.
    pub async fn requests_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<VacationRequest>, AppError> {
        let mut errors = ValidationErrors::default();
        for (field, date) in [("start_date", start), ("end_date", end)] {
            if !is_supported_year(date.year()) {
                errors.push(field, format!("Year {} is out of range", date.year()));
            }
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }
        Ok(self.repo.list_requests_in_range(start, end).await?)
    }

    /// Requests of everyone in a department, newest submission first.
    pub async fn requests_for_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<VacationRequest>, AppError> {
        self.directory.get_department(department_id).await?;
        Ok(self.repo.list_requests_for_department(department_id).await?)
    }

    /// Every request on file, ordered by id.
    pub async fn all_requests(&self) -> Result<Vec<VacationRequest>, AppError> {
        Ok(self.repo.list_vacation_requests().await?)
    }
}
