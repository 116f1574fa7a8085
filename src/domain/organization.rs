use serde::{Deserialize, Serialize};

pub type DepartmentId = i64;
pub type PositionId = i64;

pub const MAX_DEPARTMENT_NAME_LEN: u64 = 100;
pub const MAX_POSITION_NAME_LEN: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Assigned by the repository on insert
    pub id: DepartmentId,
    pub name: String,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

/// A department together with the number of employees assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentHeadcount {
    pub department: Department,
    pub employee_count: i64,
}

impl DepartmentHeadcount {
    pub fn is_empty(&self) -> bool {
        self.employee_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub name: String,
}

impl Position {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}
