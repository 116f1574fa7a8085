use crate::storage::Repository;

use super::{AppError, Directory, Reports, RequestWorkflow, VacationLedger, WorkflowPolicy};

/// Entry point bundling every service over one database.
/// This is the primary interface for any client (CLI, API, ...).
pub struct HrDesk {
    directory: Directory,
    ledger: VacationLedger,
    workflow: RequestWorkflow,
    reports: Reports,
}

impl HrDesk {
    /// Wire every service to the given repository.
    pub fn new(repo: Repository, policy: WorkflowPolicy) -> Self {
        let directory = Directory::new(repo.clone());
        let ledger = VacationLedger::new(repo.clone(), directory.clone());
        let workflow =
            RequestWorkflow::new(repo.clone(), directory.clone(), ledger.clone(), policy);
        let reports = Reports::new(repo, directory.clone());

        Self {
            directory,
            ledger,
            workflow,
            reports,
        }
    }

    /// Create (if needed) and migrate the database at the given path.
    pub async fn init(database_path: &str, policy: WorkflowPolicy) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo, policy))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str, policy: WorkflowPolicy) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo, policy))
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn ledger(&self) -> &VacationLedger {
        &self.ledger
    }

    pub fn workflow(&self) -> &RequestWorkflow {
        &self.workflow
    }

    pub fn reports(&self) -> &Reports {
        &self.reports
    }
}
