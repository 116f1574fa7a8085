mod common;

use anyhow::Result;
use common::{Team, annual, new_employee, test_desk};
use hrdesk::application::{AppError, ErrorKind};
use hrdesk::domain::{EmployeeUpdate, Gender, NewEmployee};

#[tokio::test]
async fn test_department_crud() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    let directory = desk.directory();

    let sales = directory.create_department("Sales").await?;
    directory.create_department("Support").await?;

    let err = directory.create_department("Sales").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let renamed = directory.rename_department(sales.id, "Field Sales").await?;
    assert_eq!(renamed.name, "Field Sales");
    assert_eq!(directory.get_department(sales.id).await?.name, "Field Sales");

    let names: Vec<_> = directory
        .list_departments()
        .await?
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Field Sales".to_string()));

    directory.delete_department(sales.id).await?;
    let err = directory.get_department(sales.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    Ok(())
}

#[tokio::test]
async fn test_department_name_rules() -> Result<()> {
    let (desk, _temp) = test_desk().await?;

    let err = desk.directory().create_department("  ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);

    let long_name = "x".repeat(101);
    let err = desk
        .directory()
        .create_department(&long_name)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);

    desk.directory().create_department(&"x".repeat(100)).await?;
    Ok(())
}

#[tokio::test]
async fn test_department_with_employees_cannot_be_deleted() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    let team = Team::create(&desk).await?;

    let err = desk
        .directory()
        .delete_department(team.department.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.to_string().contains("has employees"));

    let headcounts = desk.directory().departments_with_headcount().await?;
    assert_eq!(headcounts.len(), 1);
    assert_eq!(headcounts[0].employee_count, 2);
    Ok(())
}

#[tokio::test]
async fn test_position_crud() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    let team = Team::create(&desk).await?;
    let directory = desk.directory();

    let err = directory.create_position("Developer").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let err = directory
        .create_position(&"p".repeat(31))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);

    let err = directory.delete_position(team.position.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let tester = directory.create_position("Tester").await?;
    assert_eq!(directory.list_positions().await?.len(), 2);
    directory.delete_position(tester.id).await?;
    assert_eq!(directory.list_positions().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_employee_create_and_details() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    Team::create(&desk).await?;

    let details = desk.directory().get_employee_details("EMP001").await?;
    assert_eq!(details.employee.name, "Luca Bianchi");
    assert_eq!(details.employee.gender, Gender::Female);
    assert_eq!(details.employee.vacation_days_left, 24);
    assert_eq!(details.employee.salary_cents, 300000);
    assert_eq!(details.department_name, "Engineering");
    assert_eq!(details.position_name, "Developer");
    assert_eq!(details.manager_name.as_deref(), Some("Maria Rossi"));

    let top = desk.directory().get_employee_details("EMP002").await?;
    assert!(top.manager_name.is_none());
    Ok(())
}

#[tokio::test]
async fn test_employee_create_rejections() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    let team = Team::create(&desk).await?;
    let directory = desk.directory();

    let duplicate = new_employee("EMP001", "Someone", &team.department, &team.position, None);
    let err = directory.create_employee(duplicate).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let unknown_manager = new_employee(
        "EMP010",
        "Someone",
        &team.department,
        &team.position,
        Some("EMP999"),
    );
    let err = directory.create_employee(unknown_manager).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let unknown_department = NewEmployee {
        department_id: 999,
        ..new_employee("EMP011", "Someone", &team.department, &team.position, None)
    };
    let err = directory
        .create_employee(unknown_department)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let invalid = NewEmployee {
        gender: "X".to_string(),
        salary: "-5".to_string(),
        ..new_employee("EMP012", "Someone", &team.department, &team.position, None)
    };
    let AppError::ValidationFailed(errors) = directory.create_employee(invalid).await.unwrap_err()
    else {
        panic!("expected validation failure");
    };
    assert!(errors.has_field("gender"));
    assert!(errors.has_field("salary"));

    assert_eq!(directory.list_employees().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_employee_update() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    Team::create(&desk).await?;
    let directory = desk.directory();

    let updated = directory
        .update_employee(
            "EMP001",
            EmployeeUpdate {
                name: Some("Luca B.".to_string()),
                salary_cents: Some(320000),
                manager: Some(None),
                ..EmployeeUpdate::default()
            },
        )
        .await?;
    assert_eq!(updated.name, "Luca B.");
    assert!(updated.manager.is_none());

    let stored = directory.get_employee("EMP001").await?;
    assert_eq!(stored.salary_cents, 320000);
    assert!(stored.manager.is_none());
    assert!(directory.direct_reports("EMP002").await?.is_empty());

    let err = directory
        .update_employee(
            "EMP001",
            EmployeeUpdate {
                vacation_days_left: Some(25),
                ..EmployeeUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    Ok(())
}

#[tokio::test]
async fn test_update_with_negative_balance() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    Team::create(&desk).await?;
    let directory = desk.directory();

    // 30 days against a balance of 24
    let request = desk
        .workflow()
        .submit(annual("EMP001", "2024-07-01", "2024-07-30"))
        .await?;
    desk.workflow().approve(request.id, "EMP002").await?;
    assert_eq!(directory.get_employee("EMP001").await?.vacation_days_left, -6);

    let updated = directory
        .update_employee(
            "EMP001",
            EmployeeUpdate {
                name: Some("Luca B.".to_string()),
                ..EmployeeUpdate::default()
            },
        )
        .await?;
    assert_eq!(updated.name, "Luca B.");
    assert_eq!(updated.vacation_days_left, -6);

    let stored = directory.get_employee("EMP001").await?;
    assert_eq!(stored.name, "Luca B.");
    assert_eq!(stored.vacation_days_left, -6);
    Ok(())
}

#[tokio::test]
async fn test_manager_cycle_is_rejected() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    let team = Team::create(&desk).await?;
    let directory = desk.directory();

    // EMP003 -> EMP001 -> EMP002
    directory
        .create_employee(new_employee(
            "EMP003",
            "Giulia Verdi",
            &team.department,
            &team.position,
            Some("EMP001"),
        ))
        .await?;

    let err = directory
        .update_employee(
            "EMP002",
            EmployeeUpdate {
                manager: Some(Some("EMP003".to_string())),
                ..EmployeeUpdate::default()
            },
        )
        .await
        .unwrap_err();
    let AppError::ValidationFailed(errors) = err else {
        panic!("expected validation failure");
    };
    assert!(errors.has_field("manager"));

    let err = directory
        .update_employee(
            "EMP001",
            EmployeeUpdate {
                manager: Some(Some("EMP001".to_string())),
                ..EmployeeUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);

    assert!(directory.get_employee("EMP002").await?.manager.is_none());
    Ok(())
}

#[tokio::test]
async fn test_delete_employee_releases_subordinates() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    let team = Team::create(&desk).await?;
    team.hire(&desk, "EMP003", "Giulia Verdi").await?;

    let request = desk
        .workflow()
        .submit(annual("EMP001", "2024-01-01", "2024-01-03"))
        .await?;
    desk.workflow().approve(request.id, "EMP002").await?;

    let reports = desk.directory().direct_reports("EMP002").await?;
    assert_eq!(reports.len(), 2);

    desk.directory().delete_employee("EMP002").await?;

    let err = desk.directory().get_employee("EMP002").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(desk.directory().get_employee("EMP001").await?.manager.is_none());
    assert!(desk.directory().get_employee("EMP003").await?.manager.is_none());

    // The request survives with its approver cleared
    let stored = desk.workflow().get_request(request.id).await?;
    assert!(stored.is_approved());
    assert!(stored.approved_by.is_none());
    Ok(())
}

#[tokio::test]
async fn test_delete_employee_with_active_requests() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    Team::create(&desk).await?;

    let request = desk
        .workflow()
        .submit(annual("EMP001", "2024-01-01", "2024-01-03"))
        .await?;

    let err = desk.directory().delete_employee("EMP001").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let pending = desk.directory().employees_with_pending_requests().await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].number, "EMP001");

    // Once decided, the employee and their history can go
    desk.workflow().decline(request.id, "EMP002").await?;
    desk.directory().delete_employee("EMP001").await?;

    let err = desk.workflow().get_request(request.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(desk.directory().employees_with_pending_requests().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_department_members() -> Result<()> {
    let (desk, _temp) = test_desk().await?;
    let team = Team::create(&desk).await?;
    let directory = desk.directory();

    let other = directory.create_department("Finance").await?;
    directory
        .create_employee(new_employee(
            "EMP020",
            "Paolo Neri",
            &other,
            &team.position,
            None,
        ))
        .await?;

    let (department, members) = directory.department_members(team.department.id).await?;
    assert_eq!(department.name, "Engineering");
    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|m| m.department_id == team.department.id));

    let err = directory.department_members(999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}
