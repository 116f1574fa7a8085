use std::collections::HashMap;

use tracing::{info, instrument, warn};

use crate::domain::{
    Department, DepartmentHeadcount, DepartmentId, Employee, EmployeeDetails, EmployeeNumber,
    EmployeeUpdate, NewEmployee, Position, PositionId, ValidationErrors,
    creates_manager_cycle,
    validation::{
        validate_department_name, validate_employee_update, validate_new_employee,
        validate_position_name,
    },
};
use crate::storage::Repository;

use super::AppError;

/// Departments, positions and employees, including the manager tree.
///
/// This is also the employee lookup the vacation ledger relies on.
#[derive(Clone)]
pub struct Directory {
    repo: Repository,
}

impl Directory {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    // ========================
    // Department operations
    // ========================

    /// Create a new department.
    pub async fn create_department(&self, name: &str) -> Result<Department, AppError> {
        validate_department_name(name)?;
        let name = name.trim();

        if self.repo.get_department_by_name(name).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Department already exists: {}",
                name
            )));
        }

        let mut department = Department::new(name);
        self.repo.save_department(&mut department).await?;
        info!(id = department.id, name = %department.name, "department created");
        Ok(department)
    }

    pub async fn get_department(&self, id: DepartmentId) -> Result<Department, AppError> {
        self.repo
            .get_department(id)
            .await?
            .ok_or_else(|| AppError::not_found("Department", id))
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        Ok(self.repo.list_departments().await?)
    }

    /// All departments with the number of employees in each.
    pub async fn departments_with_headcount(&self) -> Result<Vec<DepartmentHeadcount>, AppError> {
        Ok(self.repo.list_department_headcounts().await?)
    }

    /// A department and its members.
    pub async fn department_members(
        &self,
        id: DepartmentId,
    ) -> Result<(Department, Vec<Employee>), AppError> {
        let department = self.get_department(id).await?;
        let members = self
            .repo
            .list_employees()
            .await?
            .into_iter()
            .filter(|e| e.department_id == id)
            .collect();
        Ok((department, members))
    }

    pub async fn rename_department(
        &self,
        id: DepartmentId,
        name: &str,
    ) -> Result<Department, AppError> {
        validate_department_name(name)?;
        let mut department = self.get_department(id).await?;
        department.name = name.trim().to_string();
        self.repo.rename_department(id, &department.name).await?;
        Ok(department)
    }

    /// Delete a department. Refused while any employee still belongs to it.
    pub async fn delete_department(&self, id: DepartmentId) -> Result<Department, AppError> {
        let department = self.get_department(id).await?;

        let members = self.repo.count_employees_in_department(id).await?;
        if members > 0 {
            warn!(id, members, "refusing to delete non-empty department");
            return Err(AppError::conflict(format!(
                "Cannot delete department {} because it has employees",
                department.name
            )));
        }

        self.repo.delete_department(id).await?;
        info!(id, name = %department.name, "department deleted");
        Ok(department)
    }

    // ========================
    // Position operations
    // ========================

    pub async fn create_position(&self, name: &str) -> Result<Position, AppError> {
        validate_position_name(name)?;
        let name = name.trim();

        if self.repo.get_position_by_name(name).await?.is_some() {
            return Err(AppError::conflict(format!("Position already exists: {}", name)));
        }

        let mut position = Position::new(name);
        self.repo.save_position(&mut position).await?;
        Ok(position)
    }

    pub async fn get_position(&self, id: PositionId) -> Result<Position, AppError> {
        self.repo
            .get_position(id)
            .await?
            .ok_or_else(|| AppError::not_found("Position", id))
    }

    pub async fn list_positions(&self) -> Result<Vec<Position>, AppError> {
        Ok(self.repo.list_positions().await?)
    }

    /// Delete a position. Refused while any employee holds it.
    pub async fn delete_position(&self, id: PositionId) -> Result<Position, AppError> {
        let position = self.get_position(id).await?;

        if self.repo.count_employees_in_position(id).await? > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete position {} because employees hold it",
                position.name
            )));
        }

        self.repo.delete_position(id).await?;
        Ok(position)
    }

    // ========================
    // Employee operations
    // ========================

    /// Onboard a new employee.
    #[instrument(skip(self, input), fields(employee = %input.number))]
    pub async fn create_employee(&self, input: NewEmployee) -> Result<Employee, AppError> {
        let employee = validate_new_employee(&input)?;

        if self.repo.get_employee(&employee.number).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Employee already exists: {}",
                employee.number
            )));
        }

        self.ensure_references(&employee).await?;

        self.repo.save_employee(&employee).await?;
        info!("employee created");
        Ok(employee)
    }

    /// Get an employee by number.
    pub async fn get_employee(&self, number: &str) -> Result<Employee, AppError> {
        self.repo
            .get_employee(number)
            .await?
            .ok_or_else(|| AppError::not_found("Employee", number))
    }

    /// Get an employee with department, position and manager names resolved.
    pub async fn get_employee_details(&self, number: &str) -> Result<EmployeeDetails, AppError> {
        self.repo
            .get_employee_details(number)
            .await?
            .ok_or_else(|| AppError::not_found("Employee", number))
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.repo.list_employees().await?)
    }

    /// Employees whose manager is `manager`.
    pub async fn direct_reports(&self, manager: &str) -> Result<Vec<Employee>, AppError> {
        self.get_employee(manager).await?;
        Ok(self.repo.list_direct_reports(manager).await?)
    }

    /// Employees with at least one request awaiting a decision.
    pub async fn employees_with_pending_requests(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.repo.list_employees_with_pending_requests().await?)
    }

    /// Apply a partial update to an employee.
    #[instrument(skip(self, update))]
    pub async fn update_employee(
        &self,
        number: &str,
        update: EmployeeUpdate,
    ) -> Result<Employee, AppError> {
        let current = self.get_employee(number).await?;
        validate_employee_update(number, &update)?;
        let updated = update.apply_to(&current);

        self.ensure_references(&updated).await?;

        self.repo.update_employee(&updated).await?;
        info!("employee updated");
        Ok(updated)
    }

    /// Remove an employee.
    ///
    /// Refused while the employee has requests awaiting a decision. Otherwise their
    /// requests are removed with them and their subordinates lose their manager.
    #[instrument(skip(self))]
    pub async fn delete_employee(&self, number: &str) -> Result<Employee, AppError> {
        let employee = self.get_employee(number).await?;

        if self.repo.has_submitted_requests(number).await? {
            warn!("refusing to delete employee with active requests");
            return Err(AppError::conflict(format!(
                "Cannot delete employee {} because they have active vacation requests",
                number
            )));
        }

        if !self.repo.delete_employee(number).await? {
            return Err(AppError::not_found("Employee", number));
        }
        info!("employee deleted");
        Ok(employee)
    }

    /// Department, position and manager must exist, and the manager must not
    /// sit below the employee in the tree.
    async fn ensure_references(&self, employee: &Employee) -> Result<(), AppError> {
        self.get_department(employee.department_id).await?;
        self.get_position(employee.position_id).await?;

        let Some(manager) = &employee.manager else {
            return Ok(());
        };
        self.get_employee(manager).await?;

        let managers: HashMap<EmployeeNumber, Option<EmployeeNumber>> = self
            .repo
            .list_employees()
            .await?
            .into_iter()
            .map(|e| (e.number, e.manager))
            .collect();

        if creates_manager_cycle(&employee.number, manager, |n| {
            managers.get(n).cloned().flatten()
        }) {
            return Err(ValidationErrors::single(
                "manager",
                format!("Reporting to {} would create a management cycle", manager),
            )
            .into());
        }
        Ok(())
    }
}
