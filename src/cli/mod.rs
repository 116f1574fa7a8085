use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::application::HrDesk;
use crate::config::Config;
use crate::domain::{
    format_cents, parse_cents, DepartmentId, EmployeeUpdate, Gender, NewEmployee,
    NewVacationRequest, PositionId, RequestId, VacationRequest,
};

/// HR Desk - departments, employees and vacation requests
#[derive(Parser)]
#[command(name = "hrdesk")]
#[command(about = "A local HR tool for employee records and the vacation request workflow")]
#[command(version)]
pub struct Cli {
    /// Database file path (defaults to hrdesk.db)
    #[arg(short, long, global = true, env = "HRDESK_DATABASE")]
    pub database: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only approve or decline requests that are still submitted
    #[arg(long, global = true)]
    pub guard_transitions: Option<bool>,

    /// Refuse approvals exceeding the remaining vacation days
    #[arg(long, global = true)]
    pub require_sufficient_balance: Option<bool>,

    /// Refuse requests starting in the past
    #[arg(long, global = true)]
    pub require_future_start: Option<bool>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Department management commands
    #[command(subcommand)]
    Department(DepartmentCommands),

    /// Position management commands
    #[command(subcommand)]
    Position(PositionCommands),

    /// Employee management commands
    #[command(subcommand)]
    Employee(EmployeeCommands),

    /// Vacation request commands
    #[command(subcommand)]
    Vacation(VacationCommands),

    /// Export vacation requests
    Export {
        /// Only this employee's requests
        #[arg(long)]
        employee: Option<String>,

        /// Output format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DepartmentCommands {
    /// Create a new department
    Create {
        /// Department name (must be unique)
        name: String,
    },

    /// List departments with their headcount
    List,

    /// Show a department and its members
    Show {
        /// Department ID
        id: DepartmentId,
    },

    /// Rename a department
    Rename {
        /// Department ID
        id: DepartmentId,

        /// New name
        name: String,
    },

    /// Delete a department without employees
    Delete {
        /// Department ID
        id: DepartmentId,
    },
}

#[derive(Subcommand)]
pub enum PositionCommands {
    /// Create a new position
    Create {
        /// Position name (must be unique)
        name: String,
    },

    /// List positions
    List,

    /// Delete a position nobody holds
    Delete {
        /// Position ID
        id: PositionId,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// Onboard a new employee
    Create {
        /// Employee number (e.g. EMP001)
        number: String,

        /// Full name
        #[arg(long)]
        name: String,

        /// Department ID
        #[arg(long)]
        department: DepartmentId,

        /// Position ID
        #[arg(long)]
        position: PositionId,

        /// Gender: M or F
        #[arg(long)]
        gender: String,

        /// Monthly salary (e.g. "4250.50")
        #[arg(long)]
        salary: String,

        /// Employee number of the manager
        #[arg(long)]
        manager: Option<String>,

        /// Remaining vacation days (defaults to the yearly allotment)
        #[arg(long)]
        vacation_days: Option<i32>,
    },

    /// Show an employee
    Show {
        /// Employee number
        number: String,
    },

    /// List employees
    List {
        /// Only employees of this department
        #[arg(long)]
        department: Option<DepartmentId>,
    },

    /// Update an employee
    Update {
        /// Employee number
        number: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        department: Option<DepartmentId>,

        #[arg(long)]
        position: Option<PositionId>,

        /// Gender: M or F
        #[arg(long)]
        gender: Option<String>,

        /// Monthly salary (e.g. "4250.50")
        #[arg(long)]
        salary: Option<String>,

        /// Employee number of the new manager
        #[arg(long, conflicts_with = "no_manager")]
        manager: Option<String>,

        /// Remove the current manager
        #[arg(long)]
        no_manager: bool,

        #[arg(long)]
        vacation_days: Option<i32>,
    },

    /// Delete an employee without submitted requests
    Delete {
        /// Employee number
        number: String,
    },

    /// List employees waiting on a decision
    Pending,

    /// List the direct reports of a manager
    Reports {
        /// Manager's employee number
        number: String,
    },
}

#[derive(Subcommand)]
pub enum VacationCommands {
    /// Submit a vacation request
    Submit {
        /// Employee number of the requester
        employee: String,

        /// Type code: S (sick), U (unpaid), A (annual), O (day off), B (business trip)
        #[arg(long = "type", default_value = "A")]
        vacation_type: String,

        /// Reason for the request
        #[arg(long)]
        description: String,

        /// First day of leave (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last day of leave, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },

    /// Approve a submitted request
    Approve {
        /// Request ID
        id: RequestId,

        /// Employee number of the approver
        #[arg(long)]
        by: String,
    },

    /// Decline a submitted request
    Decline {
        /// Request ID
        id: RequestId,

        /// Employee number of the decliner
        #[arg(long)]
        by: String,
    },

    /// Show a request
    Show {
        /// Request ID
        id: RequestId,
    },

    /// Requests waiting on a manager, oldest first
    Pending {
        /// Manager's employee number
        approver: String,
    },

    /// Every request of an employee
    History {
        /// Employee number
        employee: String,
    },

    /// Requests overlapping a date range
    Range {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Only requests of this department
        #[arg(long)]
        department: Option<DepartmentId>,
    },

    /// Approved leave per type for a year
    Stats {
        /// Calendar year (defaults to the current one)
        #[arg(long)]
        year: Option<i32>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

impl Cli {
    /// Environment configuration with command line overrides applied.
    fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(path) = &self.database {
            config.database_path = path.clone();
        }
        if let Some(guard) = self.guard_transitions {
            config.policy.guard_transitions = guard;
        }
        if let Some(required) = self.require_sufficient_balance {
            config.policy.require_sufficient_balance = required;
        }
        if let Some(required) = self.require_future_start {
            config.policy.require_future_start = required;
        }
        Ok(config)
    }

    pub async fn run(self) -> Result<()> {
        let config = self.config()?;

        match self.command {
            Commands::Init => {
                HrDesk::init(&config.database_path, config.policy).await?;
                println!("Database initialized: {}", config.database_path);
            }

            Commands::Department(cmd) => {
                let desk = open(&config).await?;
                run_department_command(&desk, cmd).await?;
            }

            Commands::Position(cmd) => {
                let desk = open(&config).await?;
                run_position_command(&desk, cmd).await?;
            }

            Commands::Employee(cmd) => {
                let desk = open(&config).await?;
                run_employee_command(&desk, cmd).await?;
            }

            Commands::Vacation(cmd) => {
                let desk = open(&config).await?;
                run_vacation_command(&desk, cmd).await?;
            }

            Commands::Export {
                employee,
                format,
                output,
            } => {
                let desk = open(&config).await?;
                run_export_command(&desk, employee.as_deref(), &format, output.as_deref())
                    .await?;
            }
        }

        Ok(())
    }
}

async fn open(config: &Config) -> Result<HrDesk> {
    HrDesk::connect(&config.database_path, config.policy)
        .await
        .with_context(|| {
            format!(
                "Cannot open {} (run `hrdesk init` first)",
                config.database_path
            )
        })
}

async fn run_department_command(desk: &HrDesk, cmd: DepartmentCommands) -> Result<()> {
    let directory = desk.directory();

    match cmd {
        DepartmentCommands::Create { name } => {
            let department = directory.create_department(&name).await?;
            println!("Created department: {} ({})", department.name, department.id);
        }

        DepartmentCommands::List => {
            let departments = directory.departments_with_headcount().await?;
            if departments.is_empty() {
                println!("No departments found.");
            } else {
                println!("{:<6} {:<30} {:>9}", "ID", "NAME", "EMPLOYEES");
                println!("{}", "-".repeat(47));
                for entry in departments {
                    println!(
                        "{:<6} {:<30} {:>9}",
                        entry.department.id,
                        truncate(&entry.department.name, 30),
                        entry.employee_count
                    );
                }
            }
        }

        DepartmentCommands::Show { id } => {
            let (department, members) = directory.department_members(id).await?;

            println!("Department: {}", department.name);
            println!("  ID:        {}", department.id);
            println!("  Employees: {}", members.len());
            for member in members {
                println!("    {:<8} {}", member.number, member.name);
            }
        }

        DepartmentCommands::Rename { id, name } => {
            let department = directory.rename_department(id, &name).await?;
            println!("Renamed department {} to {}", department.id, department.name);
        }

        DepartmentCommands::Delete { id } => {
            let department = directory.delete_department(id).await?;
            println!("Deleted department: {}", department.name);
        }
    }
    Ok(())
}

async fn run_position_command(desk: &HrDesk, cmd: PositionCommands) -> Result<()> {
    let directory = desk.directory();

    match cmd {
        PositionCommands::Create { name } => {
            let position = directory.create_position(&name).await?;
            println!("Created position: {} ({})", position.name, position.id);
        }

        PositionCommands::List => {
            let positions = directory.list_positions().await?;
            if positions.is_empty() {
                println!("No positions found.");
            } else {
                println!("{:<6} {:<30}", "ID", "NAME");
                println!("{}", "-".repeat(37));
                for position in positions {
                    println!("{:<6} {:<30}", position.id, position.name);
                }
            }
        }

        PositionCommands::Delete { id } => {
            let position = directory.delete_position(id).await?;
            println!("Deleted position: {}", position.name);
        }
    }
    Ok(())
}

async fn run_employee_command(desk: &HrDesk, cmd: EmployeeCommands) -> Result<()> {
    let directory = desk.directory();

    match cmd {
        EmployeeCommands::Create {
            number,
            name,
            department,
            position,
            gender,
            salary,
            manager,
            vacation_days,
        } => {
            let employee = directory
                .create_employee(NewEmployee {
                    number,
                    name,
                    department_id: department,
                    position_id: position,
                    gender,
                    manager,
                    vacation_days_left: vacation_days,
                    salary,
                })
                .await?;
            println!("Created employee: {} {}", employee.number, employee.name);
        }

        EmployeeCommands::Show { number } => {
            let details = directory.get_employee_details(&number).await?;
            let employee = &details.employee;

            println!("Employee: {} {}", employee.number, employee.name);
            println!("  Department:    {}", details.department_name);
            println!("  Position:      {}", details.position_name);
            println!("  Gender:        {}", employee.gender.as_code());
            match (&employee.manager, &details.manager_name) {
                (Some(number), Some(name)) => println!("  Manager:       {} {}", number, name),
                (Some(number), None) => println!("  Manager:       {}", number),
                _ => println!("  Manager:       -"),
            }
            println!("  Vacation left: {} days", employee.vacation_days_left);
            println!("  Salary:        {}", format_cents(employee.salary_cents));
        }

        EmployeeCommands::List { department } => {
            let employees = match department {
                Some(id) => directory.department_members(id).await?.1,
                None => directory.list_employees().await?,
            };
            print_employees(&employees);
        }

        EmployeeCommands::Update {
            number,
            name,
            department,
            position,
            gender,
            salary,
            manager,
            no_manager,
            vacation_days,
        } => {
            let gender = gender
                .map(|code| {
                    Gender::from_code(&code)
                        .with_context(|| format!("Invalid gender '{}'. Use M or F", code))
                })
                .transpose()?;
            let salary_cents = salary
                .map(|s| parse_cents(&s))
                .transpose()
                .context("Invalid salary format. Use '4250.50' or '4250'")?;
            let manager = if no_manager {
                Some(None)
            } else {
                manager.map(Some)
            };

            let update = EmployeeUpdate {
                name,
                department_id: department,
                position_id: position,
                gender,
                manager,
                vacation_days_left: vacation_days,
                salary_cents,
            };
            let employee = directory.update_employee(&number, update).await?;
            println!("Updated employee: {} {}", employee.number, employee.name);
        }

        EmployeeCommands::Delete { number } => {
            let employee = directory.delete_employee(&number).await?;
            println!("Deleted employee: {} {}", employee.number, employee.name);
        }

        EmployeeCommands::Pending => {
            let employees = directory.employees_with_pending_requests().await?;
            print_employees(&employees);
        }

        EmployeeCommands::Reports { number } => {
            let reports = directory.direct_reports(&number).await?;
            print_employees(&reports);
        }
    }
    Ok(())
}

async fn run_vacation_command(desk: &HrDesk, cmd: VacationCommands) -> Result<()> {
    let workflow = desk.workflow();

    match cmd {
        VacationCommands::Submit {
            employee,
            vacation_type,
            description,
            from,
            to,
        } => {
            let request = workflow
                .submit(NewVacationRequest {
                    employee,
                    vacation_type,
                    description,
                    start_date: parse_date(&from)?,
                    end_date: parse_date(&to)?,
                })
                .await?;
            println!(
                "Submitted request {}: {} {} to {} ({})",
                request.id,
                request.vacation_type,
                request.start_date,
                request.end_date,
                request.duration_label()
            );
        }

        VacationCommands::Approve { id, by } => {
            let request = workflow.approve(id, &by).await?;
            let balance = desk.ledger().balance(&request.employee).await?;
            println!(
                "Approved request {} for {} ({}), {} days left",
                request.id,
                request.employee,
                request.duration_label(),
                balance
            );
        }

        VacationCommands::Decline { id, by } => {
            let request = workflow.decline(id, &by).await?;
            println!("Declined request {} for {}", request.id, request.employee);
        }

        VacationCommands::Show { id } => {
            let request = workflow.get_request(id).await?;

            println!("Vacation request: {}", request.id);
            println!("  Employee:    {}", request.employee);
            println!("  Type:        {}", request.vacation_type);
            println!("  Description: {}", request.description);
            println!(
                "  Dates:       {} to {} ({})",
                request.start_date,
                request.end_date,
                request.duration_label()
            );
            println!("  State:       {}", request.state);
            println!(
                "  Submitted:   {}",
                request.submitted_at.format("%Y-%m-%d %H:%M:%S")
            );
            if let Some(approver) = &request.approved_by {
                println!("  Approved by: {}", approver);
            }
            if let Some(decliner) = &request.declined_by {
                println!("  Declined by: {}", decliner);
            }
        }

        VacationCommands::Pending { approver } => {
            desk.directory().get_employee(&approver).await?;
            let requests = workflow.pending_approvals_for(&approver).await?;
            print_requests(&requests);
        }

        VacationCommands::History { employee } => {
            desk.directory().get_employee(&employee).await?;
            let requests = workflow.history_for(&employee).await?;
            print_requests(&requests);
        }

        VacationCommands::Range {
            from,
            to,
            department,
        } => {
            let start = parse_date(&from)?;
            let end = parse_date(&to)?;
            if end < start {
                anyhow::bail!("--to must not be before --from");
            }

            let mut requests = desk.reports().requests_in_range(start, end).await?;
            if let Some(id) = department {
                let (_, members) = desk.directory().department_members(id).await?;
                requests.retain(|r| members.iter().any(|m| m.number == r.employee));
            }
            print_requests(&requests);
        }

        VacationCommands::Stats { year, format } => {
            let year = year.unwrap_or_else(|| Utc::now().year());
            let stats = desk.reports().vacation_statistics(year).await?;

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
                "table" => {
                    println!("Approved leave in {}", stats.year);
                    println!("{:<16} {:>9} {:>6}", "TYPE", "REQUESTS", "DAYS");
                    println!("{}", "-".repeat(33));
                    for entry in &stats.by_type {
                        println!(
                            "{:<16} {:>9} {:>6}",
                            entry.vacation_type.name(),
                            entry.request_count,
                            entry.total_days
                        );
                    }
                    println!("{}", "-".repeat(33));
                    println!(
                        "{:<16} {:>9} {:>6}",
                        "Total", stats.total_requests, stats.total_days
                    );
                }
                other => anyhow::bail!("Unknown format '{}'. Use table or json", other),
            }
        }
    }
    Ok(())
}

async fn run_export_command(
    desk: &HrDesk,
    employee: Option<&str>,
    format: &str,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(desk);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match format {
        "csv" => exporter.export_requests_csv(writer, employee).await?,
        "json" => exporter.export_requests_json(writer, employee).await?,
        other => anyhow::bail!("Unknown export format '{}'. Use csv or json", other),
    };

    if output.is_some() {
        eprintln!("Exported {} vacation requests", count);
    }
    Ok(())
}

fn print_employees(employees: &[crate::domain::Employee]) {
    if employees.is_empty() {
        println!("No employees found.");
        return;
    }

    println!(
        "{:<8} {:<20} {:>5} {:>5} {:<8} {:>8}",
        "NUMBER", "NAME", "DEPT", "POS", "MANAGER", "VACATION"
    );
    println!("{}", "-".repeat(60));
    for employee in employees {
        println!(
            "{:<8} {:<20} {:>5} {:>5} {:<8} {:>8}",
            employee.number,
            truncate(&employee.name, 20),
            employee.department_id,
            employee.position_id,
            employee.manager.as_deref().unwrap_or("-"),
            employee.vacation_days_left
        );
    }
}

fn print_requests(requests: &[VacationRequest]) {
    if requests.is_empty() {
        println!("No vacation requests found.");
        return;
    }

    println!(
        "{:<6} {:<8} {:<14} {:<10} {:<10} {:>4} {:<9} {:<20}",
        "ID", "EMPLOYEE", "TYPE", "FROM", "TO", "DAYS", "STATE", "DESCRIPTION"
    );
    println!("{}", "-".repeat(88));
    for request in requests {
        println!(
            "{:<6} {:<8} {:<14} {:<10} {:<10} {:>4} {:<9} {:<20}",
            request.id,
            request.employee,
            request.vacation_type.name(),
            request.start_date,
            request.end_date,
            request.total_days,
            request.state,
            truncate(&request.description, 20)
        );
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", date_str))
}
