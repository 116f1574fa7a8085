// Application layer - use cases and orchestration over the repository

mod directory;
pub mod error;
mod ledger;
mod reporting;
mod service;
mod workflow;

pub use directory::*;
pub use error::*;
pub use ledger::*;
pub use reporting::*;
pub use service::*;
pub use workflow::*;
