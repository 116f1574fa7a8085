mod employee;
mod ledger;
mod money;
mod organization;
mod vacation;
pub mod validation;

pub use employee::*;
pub use ledger::*;
pub use money::*;
pub use organization::*;
pub use vacation::*;
pub use validation::{FieldError, ValidationErrors};
