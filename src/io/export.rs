use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::HrDesk;
use crate::domain::VacationRequest;

/// JSON export envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationExport {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub requests: Vec<VacationRequest>,
}

/// Exporter for writing vacation requests in CSV or JSON.
pub struct Exporter<'a> {
    desk: &'a HrDesk,
}

impl<'a> Exporter<'a> {
    pub fn new(desk: &'a HrDesk) -> Self {
        Self { desk }
    }

    /// Every request, or one employee's history when `employee` is given.
    async fn load(&self, employee: Option<&str>) -> Result<Vec<VacationRequest>> {
        let requests = match employee {
            Some(number) => {
                self.desk.directory().get_employee(number).await?;
                self.desk.workflow().history_for(number).await?
            }
            None => self.desk.reports().all_requests().await?,
        };
        Ok(requests)
    }

    /// Export vacation requests to CSV format
    pub async fn export_requests_csv<W: Write>(
        &self,
        writer: W,
        employee: Option<&str>,
    ) -> Result<usize> {
        let requests = self.load(employee).await?;
        write_requests_csv(writer, &requests)
    }

    /// Export vacation requests to pretty-printed JSON
    pub async fn export_requests_json<W: Write>(
        &self,
        writer: W,
        employee: Option<&str>,
    ) -> Result<usize> {
        let requests = self.load(employee).await?;
        let count = requests.len();
        let export = VacationExport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            requests,
        };
        serde_json::to_writer_pretty(writer, &export)?;
        Ok(count)
    }
}

/// Write one CSV row per request, header first.
pub fn write_requests_csv<W: Write>(writer: W, requests: &[VacationRequest]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "id",
        "employee_number",
        "vacation_type",
        "description",
        "start_date",
        "end_date",
        "total_days",
        "state",
        "submitted_at",
        "approved_by",
        "declined_by",
    ])?;

    for request in requests {
        csv_writer.write_record(&[
            request.id.to_string(),
            request.employee.clone(),
            request.vacation_type.code().to_string(),
            request.description.clone(),
            request.start_date.to_string(),
            request.end_date.to_string(),
            request.total_days.to_string(),
            request.state.as_str().to_string(),
            request.submitted_at.to_rfc3339(),
            request.approved_by.clone().unwrap_or_default(),
            request.declined_by.clone().unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(requests.len())
}
