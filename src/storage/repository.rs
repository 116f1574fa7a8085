use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};

use crate::application::VacationTypeAggregate;
use crate::domain::{
    Department, DepartmentHeadcount, DepartmentId, Employee, EmployeeDetails, Gender, Position,
    PositionId, RequestId, RequestState, VacationRequest, VacationType,
};

use super::MIGRATION_001_INITIAL;

const DATE_FORMAT: &str = "%Y-%m-%d";

const EMPLOYEE_COLUMNS: &str = "employee_number, name, department_id, position_id, gender, manager_number, vacation_days_left, salary_cents";

const REQUEST_COLUMNS: &str = "id, employee_number, vacation_type, description, start_date, end_date, total_days, state, submitted_at, approved_by, declined_by";

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Fixed-width UTC timestamps keep lexical order equal to chronological order.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Repository for persisting and querying the HR schema.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Department operations
    // ========================

    /// Insert a department and assign its generated id.
    pub async fn save_department(&self, department: &mut Department) -> Result<()> {
        let row = sqlx::query("INSERT INTO departments (name) VALUES (?) RETURNING id")
            .bind(&department.name)
            .fetch_one(&self.pool)
            .await
            .context("Failed to save department")?;
        department.id = row.get("id");
        Ok(())
    }

    pub async fn get_department(&self, id: DepartmentId) -> Result<Option<Department>> {
        let row = sqlx::query("SELECT id, name FROM departments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch department")?;

        Ok(row.as_ref().map(Self::row_to_department))
    }

    pub async fn get_department_by_name(&self, name: &str) -> Result<Option<Department>> {
        let row = sqlx::query("SELECT id, name FROM departments WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch department by name")?;

        Ok(row.as_ref().map(Self::row_to_department))
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query("SELECT id, name FROM departments ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list departments")?;

        Ok(rows.iter().map(Self::row_to_department).collect())
    }

    /// Departments with their employee count, including empty ones.
    pub async fn list_department_headcounts(&self) -> Result<Vec<DepartmentHeadcount>> {
        let rows = sqlx::query(
            r#"
            SELECT d.id, d.name, COUNT(e.employee_number) as employee_count
            FROM departments d
            LEFT JOIN employees e ON e.department_id = d.id
            GROUP BY d.id, d.name
            ORDER BY d.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to count employees per department")?;

        Ok(rows
            .iter()
            .map(|row| DepartmentHeadcount {
                department: Self::row_to_department(row),
                employee_count: row.get("employee_count"),
            })
            .collect())
    }

    pub async fn rename_department(&self, id: DepartmentId, name: &str) -> Result<()> {
        sqlx::query("UPDATE departments SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to rename department")?;
        Ok(())
    }

    pub async fn delete_department(&self, id: DepartmentId) -> Result<()> {
        sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete department")?;
        Ok(())
    }

    pub async fn count_employees_in_department(&self, id: DepartmentId) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM employees WHERE department_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count department employees")?;
        Ok(row.get("count"))
    }

    fn row_to_department(row: &sqlx::sqlite::SqliteRow) -> Department {
        Department {
            id: row.get("id"),
            name: row.get("name"),
        }
    }

    // ========================
    // Position operations
    // ========================

    /// Insert a position and assign its generated id.
    pub async fn save_position(&self, position: &mut Position) -> Result<()> {
        let row = sqlx::query("INSERT INTO positions (name) VALUES (?) RETURNING id")
            .bind(&position.name)
            .fetch_one(&self.pool)
            .await
            .context("Failed to save position")?;
        position.id = row.get("id");
        Ok(())
    }

    pub async fn get_position(&self, id: PositionId) -> Result<Option<Position>> {
        let row = sqlx::query("SELECT id, name FROM positions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch position")?;

        Ok(row.as_ref().map(Self::row_to_position))
    }

    pub async fn get_position_by_name(&self, name: &str) -> Result<Option<Position>> {
        let row = sqlx::query("SELECT id, name FROM positions WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch position by name")?;

        Ok(row.as_ref().map(Self::row_to_position))
    }

    pub async fn list_positions(&self) -> Result<Vec<Position>> {
        let rows = sqlx::query("SELECT id, name FROM positions ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list positions")?;

        Ok(rows.iter().map(Self::row_to_position).collect())
    }

    pub async fn delete_position(&self, id: PositionId) -> Result<()> {
        sqlx::query("DELETE FROM positions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete position")?;
        Ok(())
    }

    pub async fn count_employees_in_position(&self, id: PositionId) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM employees WHERE position_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count position holders")?;
        Ok(row.get("count"))
    }

    fn row_to_position(row: &sqlx::sqlite::SqliteRow) -> Position {
        Position {
            id: row.get("id"),
            name: row.get("name"),
        }
    }

    // ========================
    // Employee operations
    // ========================

    /// Save a new employee.
    pub async fn save_employee(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (employee_number, name, department_id, position_id, gender, manager_number, vacation_days_left, salary_cents)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.number)
        .bind(&employee.name)
        .bind(employee.department_id)
        .bind(employee.position_id)
        .bind(employee.gender.as_code())
        .bind(&employee.manager)
        .bind(employee.vacation_days_left)
        .bind(employee.salary_cents)
        .execute(&self.pool)
        .await
        .context("Failed to save employee")?;
        Ok(())
    }

    /// Get an employee by number.
    pub async fn get_employee(&self, number: &str) -> Result<Option<Employee>> {
        let sql = format!(
            "SELECT {} FROM employees WHERE employee_number = ?",
            EMPLOYEE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(number)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch employee")?;

        row.as_ref().map(Self::row_to_employee).transpose()
    }

    /// Get an employee together with department, position and manager names.
    pub async fn get_employee_details(&self, number: &str) -> Result<Option<EmployeeDetails>> {
        let row = sqlx::query(
            r#"
            SELECT e.employee_number, e.name, e.department_id, e.position_id, e.gender,
                   e.manager_number, e.vacation_days_left, e.salary_cents,
                   d.name as department_name, p.name as position_name, m.name as manager_name
            FROM employees e
            JOIN departments d ON d.id = e.department_id
            JOIN positions p ON p.id = e.position_id
            LEFT JOIN employees m ON m.employee_number = e.manager_number
            WHERE e.employee_number = ?
            "#,
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch employee details")?;

        match row {
            Some(row) => Ok(Some(EmployeeDetails {
                employee: Self::row_to_employee(&row)?,
                department_name: row.get("department_name"),
                position_name: row.get("position_name"),
                manager_name: row.get("manager_name"),
            })),
            None => Ok(None),
        }
    }

    /// List all employees, ordered by employee number.
    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let sql = format!(
            "SELECT {} FROM employees ORDER BY employee_number",
            EMPLOYEE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list employees")?;

        rows.iter().map(Self::row_to_employee).collect()
    }

    /// Employees whose manager is `manager`.
    pub async fn list_direct_reports(&self, manager: &str) -> Result<Vec<Employee>> {
        let sql = format!(
            "SELECT {} FROM employees WHERE manager_number = ? ORDER BY employee_number",
            EMPLOYEE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(manager)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list direct reports")?;

        rows.iter().map(Self::row_to_employee).collect()
    }

    /// Employees with at least one request still awaiting a decision.
    pub async fn list_employees_with_pending_requests(&self) -> Result<Vec<Employee>> {
        let sql = format!(
            r#"
            SELECT {} FROM employees
            WHERE employee_number IN (
                SELECT employee_number FROM vacation_requests WHERE state = 'submitted'
            )
            ORDER BY employee_number
            "#,
            EMPLOYEE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list employees with pending requests")?;

        rows.iter().map(Self::row_to_employee).collect()
    }

    /// Overwrite every mutable column of an employee.
    pub async fn update_employee(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, department_id = ?, position_id = ?, gender = ?,
                manager_number = ?, vacation_days_left = ?, salary_cents = ?
            WHERE employee_number = ?
            "#,
        )
        .bind(&employee.name)
        .bind(employee.department_id)
        .bind(employee.position_id)
        .bind(employee.gender.as_code())
        .bind(&employee.manager)
        .bind(employee.vacation_days_left)
        .bind(employee.salary_cents)
        .bind(&employee.number)
        .execute(&self.pool)
        .await
        .context("Failed to update employee")?;
        Ok(())
    }

    /// Add `delta` (usually negative) to an employee's vacation balance.
    /// Returns false when no such employee exists.
    pub async fn adjust_vacation_days(&self, number: &str, delta: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE employees SET vacation_days_left = vacation_days_left + ? WHERE employee_number = ?",
        )
        .bind(delta)
        .bind(number)
        .execute(&self.pool)
        .await
        .context("Failed to update vacation balance")?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove an employee, their requests, and every reference to them.
    /// Subordinates keep existing with their manager cleared.
    /// Returns false when no such employee exists.
    pub async fn delete_employee(&self, number: &str) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start transaction")?;

        sqlx::query("DELETE FROM vacation_requests WHERE employee_number = ?")
            .bind(number)
            .execute(&mut *tx)
            .await
            .context("Failed to delete vacation requests")?;

        sqlx::query("UPDATE employees SET manager_number = NULL WHERE manager_number = ?")
            .bind(number)
            .execute(&mut *tx)
            .await
            .context("Failed to detach subordinates")?;

        sqlx::query(
            r#"
            UPDATE vacation_requests
            SET approved_by = CASE WHEN approved_by = ? THEN NULL ELSE approved_by END,
                declined_by = CASE WHEN declined_by = ? THEN NULL ELSE declined_by END
            WHERE approved_by = ? OR declined_by = ?
            "#,
        )
        .bind(number)
        .bind(number)
        .bind(number)
        .bind(number)
        .execute(&mut *tx)
        .await
        .context("Failed to clear approver references")?;

        let result = sqlx::query("DELETE FROM employees WHERE employee_number = ?")
            .bind(number)
            .execute(&mut *tx)
            .await
            .context("Failed to delete employee")?;

        tx.commit().await.context("Failed to commit employee removal")?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_employee(row: &sqlx::sqlite::SqliteRow) -> Result<Employee> {
        let gender_code: String = row.get("gender");

        Ok(Employee {
            number: row.get("employee_number"),
            name: row.get("name"),
            department_id: row.get("department_id"),
            position_id: row.get("position_id"),
            gender: Gender::from_code(&gender_code)
                .ok_or_else(|| anyhow::anyhow!("Invalid gender code: {}", gender_code))?,
            manager: row.get("manager_number"),
            vacation_days_left: row.get("vacation_days_left"),
            salary_cents: row.get("salary_cents"),
        })
    }

    // ========================
    // Vacation request operations
    // ========================

    /// Save a new vacation request and assign its generated id.
    pub async fn save_vacation_request(&self, request: &mut VacationRequest) -> Result<()> {
        let row = sqlx::query(
            r#"
            INSERT INTO vacation_requests (employee_number, vacation_type, description, start_date, end_date, total_days, state, submitted_at, approved_by, declined_by)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&request.employee)
        .bind(request.vacation_type.code())
        .bind(&request.description)
        .bind(format_date(request.start_date))
        .bind(format_date(request.end_date))
        .bind(request.total_days)
        .bind(request.state.as_str())
        .bind(format_timestamp(request.submitted_at))
        .bind(&request.approved_by)
        .bind(&request.declined_by)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save vacation request")?;

        request.id = row.get("id");
        Ok(())
    }

    /// Get a vacation request by id.
    pub async fn get_vacation_request(&self, id: RequestId) -> Result<Option<VacationRequest>> {
        let sql = format!("SELECT {} FROM vacation_requests WHERE id = ?", REQUEST_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch vacation request")?;

        row.as_ref().map(Self::row_to_request).transpose()
    }

    /// Persist a state transition (state, approver, decliner).
    pub async fn update_vacation_request(&self, request: &VacationRequest) -> Result<()> {
        sqlx::query(
            "UPDATE vacation_requests SET state = ?, approved_by = ?, declined_by = ? WHERE id = ?",
        )
        .bind(request.state.as_str())
        .bind(&request.approved_by)
        .bind(&request.declined_by)
        .bind(request.id)
        .execute(&self.pool)
        .await
        .context("Failed to update vacation request")?;
        Ok(())
    }

    /// Record an approval: deduct the request's days from its employee and
    /// persist the new state in a single transaction.
    /// Returns the remaining balance, or None when the employee does not exist.
    pub async fn approve_vacation_request(&self, request: &VacationRequest) -> Result<Option<i32>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start transaction")?;

        let row = sqlx::query(
            r#"
            UPDATE employees
            SET vacation_days_left = vacation_days_left - ?
            WHERE employee_number = ?
            RETURNING vacation_days_left
            "#,
        )
        .bind(request.total_days)
        .bind(&request.employee)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to update vacation balance")?;

        // Dropping the transaction rolls it back
        let Some(row) = row else {
            return Ok(None);
        };
        let remaining: i32 = row.get("vacation_days_left");

        let result = sqlx::query(
            "UPDATE vacation_requests SET state = ?, approved_by = ?, declined_by = ? WHERE id = ?",
        )
        .bind(request.state.as_str())
        .bind(&request.approved_by)
        .bind(&request.declined_by)
        .bind(request.id)
        .execute(&mut *tx)
        .await
        .context("Failed to update vacation request")?;

        if result.rows_affected() == 0 {
            anyhow::bail!("Vacation request {} does not exist", request.id);
        }

        tx.commit().await.context("Failed to commit approval")?;
        Ok(Some(remaining))
    }

    /// True if an approved request of `employee` shares a day with `[start, end]`.
    /// `exclude` skips one request id (the one being approved).
    pub async fn has_approved_overlap(
        &self,
        employee: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<RequestId>,
    ) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM vacation_requests
                WHERE employee_number = ?
                  AND state = 'approved'
                  AND start_date <= ?
                  AND end_date >= ?
                  AND (? IS NULL OR id <> ?)
            ) as overlapping
            "#,
        )
        .bind(employee)
        .bind(format_date(end))
        .bind(format_date(start))
        .bind(exclude)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check for overlapping vacations")?;

        Ok(row.get::<i64, _>("overlapping") != 0)
    }

    /// All requests of one employee, most recent start date first.
    pub async fn list_requests_for_employee(&self, employee: &str) -> Result<Vec<VacationRequest>> {
        let sql = format!(
            "SELECT {} FROM vacation_requests WHERE employee_number = ? ORDER BY start_date DESC, id DESC",
            REQUEST_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(employee)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list employee vacation history")?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// Submitted requests of `manager`'s direct reports, oldest submission first.
    pub async fn list_pending_for_manager(&self, manager: &str) -> Result<Vec<VacationRequest>> {
        let sql = format!(
            r#"
            SELECT {} FROM vacation_requests
            WHERE state = 'submitted'
              AND employee_number IN (
                  SELECT employee_number FROM employees WHERE manager_number = ?
              )
            ORDER BY submitted_at, id
            "#,
            REQUEST_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(manager)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list pending approvals")?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// Requests of any state that share a day with `[start, end]`, by start date.
    pub async fn list_requests_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<VacationRequest>> {
        let sql = format!(
            "SELECT {} FROM vacation_requests WHERE start_date <= ? AND end_date >= ? ORDER BY start_date, id",
            REQUEST_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(format_date(end))
            .bind(format_date(start))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list vacation requests in range")?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// Requests of every employee in a department, newest submission first.
    pub async fn list_requests_for_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<VacationRequest>> {
        let sql = format!(
            r#"
            SELECT {} FROM vacation_requests
            WHERE employee_number IN (
                SELECT employee_number FROM employees WHERE department_id = ?
            )
            ORDER BY submitted_at DESC, id DESC
            "#,
            REQUEST_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(department_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list department vacation requests")?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// List every vacation request, ordered by id.
    pub async fn list_vacation_requests(&self) -> Result<Vec<VacationRequest>> {
        let sql = format!("SELECT {} FROM vacation_requests ORDER BY id", REQUEST_COLUMNS);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list vacation requests")?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// True if the employee has a request still awaiting a decision.
    pub async fn has_submitted_requests(&self, employee: &str) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM vacation_requests
                WHERE employee_number = ? AND state = 'submitted'
            ) as pending
            "#,
        )
        .bind(employee)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check for pending requests")?;

        Ok(row.get::<i64, _>("pending") != 0)
    }

    /// Count and day totals of approved requests per vacation type,
    /// for requests starting within `[from, to]`.
    pub async fn aggregate_approved_by_type(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<VacationTypeAggregate>> {
        let rows = sqlx::query(
            r#"
            SELECT vacation_type, COUNT(*) as request_count, COALESCE(SUM(total_days), 0) as total_days
            FROM vacation_requests
            WHERE state = 'approved' AND start_date >= ? AND start_date <= ?
            GROUP BY vacation_type
            ORDER BY vacation_type
            "#,
        )
        .bind(format_date(from))
        .bind(format_date(to))
        .fetch_all(&self.pool)
        .await
        .context("Failed to aggregate vacation statistics")?;

        rows.iter()
            .map(|row| {
                let code: String = row.get("vacation_type");
                Ok(VacationTypeAggregate {
                    vacation_type: VacationType::from_code(&code)
                        .ok_or_else(|| anyhow::anyhow!("Invalid vacation type: {}", code))?,
                    request_count: row.get("request_count"),
                    total_days: row.get("total_days"),
                })
            })
            .collect()
    }

    fn row_to_request(row: &sqlx::sqlite::SqliteRow) -> Result<VacationRequest> {
        let type_code: String = row.get("vacation_type");
        let state_str: String = row.get("state");
        let start_str: String = row.get("start_date");
        let end_str: String = row.get("end_date");
        let submitted_at_str: String = row.get("submitted_at");

        Ok(VacationRequest {
            id: row.get("id"),
            employee: row.get("employee_number"),
            vacation_type: VacationType::from_code(&type_code)
                .ok_or_else(|| anyhow::anyhow!("Invalid vacation type: {}", type_code))?,
            description: row.get("description"),
            start_date: NaiveDate::parse_from_str(&start_str, DATE_FORMAT)
                .context("Invalid start_date")?,
            end_date: NaiveDate::parse_from_str(&end_str, DATE_FORMAT)
                .context("Invalid end_date")?,
            total_days: row.get("total_days"),
            state: RequestState::from_str(&state_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid request state: {}", state_str))?,
            submitted_at: DateTime::parse_from_rfc3339(&submitted_at_str)
                .context("Invalid submitted_at timestamp")?
                .with_timezone(&Utc),
            approved_by: row.get("approved_by"),
            declined_by: row.get("declined_by"),
        })
    }
}
