// tests/lifecycle.rs
//
// Testes com banco real. Rodar com DATABASE_URL definida:
//   cargo test -- --ignored

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use ems_backend::{
    common::error::AppError,
    config::AppState,
    models::{
        attendance::{AttendanceInput, AttendanceStatus, BarcodeOutcome, UpsertAction},
        employee::{
            AssignmentChanges, AssignmentFilter, AssignmentState, AssignmentStatus, EmploymentType,
            NewAssignment, NewEmployee, PersonalInfoChanges,
        },
        leave::{LeaveType, NewLeave},
        organization::{DepartmentPayload, DesignationPayload, RolePayload, SectionPayload},
    },
};

fn state(pool: PgPool) -> AppState {
    AppState::from_parts(pool, "segredo-de-teste".to_string(), "./fonts".into()).unwrap()
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn john() -> NewEmployee {
    NewEmployee {
        name: "John Doe".into(),
        national_id: "12345-6789012-3".into(),
        start_date: date("2025-01-01"),
        email: "john@x.com".into(),
        password: Some("segredo123".into()),
        assignment: None,
    }
}

fn assignment(section_id: i32, designation_id: i32) -> NewAssignment {
    NewAssignment {
        section_id,
        designation_id,
        employment_type: EmploymentType::Editable,
        work_start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        work_end_time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        salary: Decimal::from(50_000),
        bonus: Decimal::ZERO,
    }
}

/// Departamento -> seção, função -> cargo. Retorna (department, section, role, designation).
async fn hierarchy(state: &AppState) -> (i32, i32, i32, i32) {
    let org = &state.organization_service;
    let department = org
        .create_department(&DepartmentPayload { name: "Engineering".into() })
        .await
        .unwrap();
    let section = org
        .create_section(&SectionPayload { name: "Backend".into(), department_id: department.id })
        .await
        .unwrap();
    let role = org.create_role(&RolePayload { name: "Developer".into() }).await.unwrap();
    let designation = org
        .create_designation(&DesignationPayload { name: "Senior".into(), role_id: Some(role.id) })
        .await
        .unwrap();
    (department.id, section.id, role.id, designation.id)
}

async fn count(pool: &PgPool, sql: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await.unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn duplicate_identity_rolls_back_everything(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, designation) = hierarchy(&state).await;
    state.employee_service.add_employee(john()).await.unwrap();

    let clash = NewEmployee {
        name: "Jane Roe".into(),
        email: "jane@x.com".into(),
        assignment: Some(assignment(section, designation)),
        ..john()
    };
    let err = state.employee_service.add_employee(clash).await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate("national_id")));

    let clash = NewEmployee {
        name: "Jane Roe".into(),
        national_id: "99999".into(),
        assignment: Some(assignment(section, designation)),
        ..john()
    };
    let err = state.employee_service.add_employee(clash).await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate("email")));

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM employee_details").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM employee_assignments").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn many_employees_may_lack_a_barcode(pool: PgPool) {
    let state = state(pool);
    let a = state.employee_service.add_employee(john()).await.unwrap();
    let b = state
        .employee_service
        .add_employee(NewEmployee {
            name: "Jane Roe".into(),
            national_id: "222".into(),
            email: "jane@x.com".into(),
            ..john()
        })
        .await
        .unwrap();

    state.employee_service.set_barcode(a.detail_id, None).await.unwrap();
    state.employee_service.set_barcode(b.detail_id, None).await.unwrap();

    state.employee_service.set_barcode(a.detail_id, Some("EMP001123")).await.unwrap();
    let err = state
        .employee_service
        .set_barcode(b.detail_id, Some("EMP001123"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Duplicate("barcode")));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn unassigned_employee_is_listed_then_assigned_and_purged(pool: PgPool) {
    let state = state(pool.clone());
    let (department, section, role, designation) = hierarchy(&state).await;

    // Sem seção/cargo o funcionário aparece como não alocado
    let created = state.employee_service.add_employee(john()).await.unwrap();
    assert!(created.assignment_id.is_none());
    let listed = state.employee_service.list(None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].assignment, AssignmentState::Unassigned);
    assert_eq!(
        state.employee_service.list(Some(AssignmentFilter::Unassigned)).await.unwrap().len(),
        1
    );

    // A alocação deixa o status Active
    let assigned = state
        .employee_service
        .assign(created.detail_id, role, assignment(section, designation))
        .await
        .unwrap();
    assert_eq!(assigned.status, AssignmentStatus::Active);
    let listed = state.employee_service.list(None).await.unwrap();
    match &listed[0].assignment {
        AssignmentState::Assigned(view) => {
            assert!(view.assignment_id > 0);
            assert_eq!(view.status, AssignmentStatus::Active);
        }
        AssignmentState::Unassigned => panic!("deveria estar alocado"),
    }

    // Segunda alocação é recusada
    let err = state
        .employee_service
        .assign(created.detail_id, role, assignment(section, designation))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyAssigned));

    state
        .attendance_service
        .upsert(AttendanceInput {
            employee_id: assigned.id,
            date: date("2025-06-01"),
            status: AttendanceStatus::Present,
            check_in: None,
            check_out: None,
            notes: None,
        })
        .await
        .unwrap();

    // Excluir o departamento leva seções, funcionário, presença e credencial junto
    let summary = state.organization_service.delete_department(department).await.unwrap();
    assert_eq!(summary.departments, 1);
    assert_eq!(summary.sections, 1);
    assert_eq!(summary.employees, 1);
    assert_eq!(summary.attendance_records, 1);
    assert_eq!(summary.credentials, 1);

    assert!(state.employee_service.list(None).await.unwrap().is_empty());
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users WHERE email = 'john@x.com'").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM sections").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM attendance").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn failed_cascade_leaves_nothing_removed(pool: PgPool) {
    let state = state(pool.clone());
    let (department, section, _, designation) = hierarchy(&state).await;
    state
        .employee_service
        .add_employee(NewEmployee { assignment: Some(assignment(section, designation)), ..john() })
        .await
        .unwrap();

    // Falha forçada no último passo da cascata
    sqlx::raw_sql(
        r#"
        CREATE FUNCTION refuse_delete() RETURNS TRIGGER AS $$
        BEGIN
            RAISE EXCEPTION 'exclusão recusada';
        END;
        $$ LANGUAGE plpgsql;
        CREATE TRIGGER trg_refuse_delete BEFORE DELETE ON employee_details
            FOR EACH ROW EXECUTE FUNCTION refuse_delete();
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    assert!(state.organization_service.delete_department(department).await.is_err());

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM departments").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM sections").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM employee_assignments").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn attendance_upsert_keeps_one_row(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, designation) = hierarchy(&state).await;
    let created = state
        .employee_service
        .add_employee(NewEmployee { assignment: Some(assignment(section, designation)), ..john() })
        .await
        .unwrap();
    let employee_id = created.assignment_id.unwrap();

    let mark = |status| AttendanceInput {
        employee_id,
        date: date("2025-06-01"),
        status,
        check_in: chrono::NaiveTime::from_hms_opt(9, 0, 0),
        check_out: None,
        notes: None,
    };

    let first = state.attendance_service.upsert(mark(AttendanceStatus::Present)).await.unwrap();
    assert_eq!(first.action, UpsertAction::Added);
    let second = state.attendance_service.upsert(mark(AttendanceStatus::Late)).await.unwrap();
    assert_eq!(second.action, UpsertAction::Updated);
    assert_eq!(second.record.status, AttendanceStatus::Late);

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM attendance").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn barcode_marks_only_once_per_day(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, designation) = hierarchy(&state).await;
    let created = state
        .employee_service
        .add_employee(NewEmployee { assignment: Some(assignment(section, designation)), ..john() })
        .await
        .unwrap();
    state
        .employee_service
        .set_barcode(created.detail_id, Some("EMP001123"))
        .await
        .unwrap();

    // Segunda leitura no mesmo dia não altera o registro
    let day = Some(date("2025-06-01"));
    let first = state.attendance_service.barcode_check_in("EMP001123", day).await.unwrap();
    assert_eq!(first, BarcodeOutcome::Marked { employee_name: "John Doe".into() });

    let second = state.attendance_service.barcode_check_in("EMP001123", day).await.unwrap();
    assert_eq!(
        second,
        BarcodeOutcome::AlreadyMarked {
            employee_name: "John Doe".into(),
            date: date("2025-06-01"),
            status: AttendanceStatus::Present,
        }
    );
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM attendance").await, 1);

    let unknown = state.attendance_service.barcode_check_in("NOPE", day).await.unwrap();
    assert_eq!(unknown, BarcodeOutcome::NotFound);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn assignment_updates_end_active(pool: PgPool) {
    let state = state(pool.clone());
    let (department, section, _, designation) = hierarchy(&state).await;
    let other_section = state
        .organization_service
        .create_section(&SectionPayload { name: "Frontend".into(), department_id: department })
        .await
        .unwrap();
    let created = state
        .employee_service
        .add_employee(NewEmployee { assignment: Some(assignment(section, designation)), ..john() })
        .await
        .unwrap();
    let assignment_id = created.assignment_id.unwrap();

    // O trigger marcaria 'changed'; o serviço devolve 'active'
    let moved = state
        .employee_service
        .update_assignment(
            assignment_id,
            AssignmentChanges { section_id: Some(other_section.id), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(moved.section_id, other_section.id);
    assert_eq!(moved.status, AssignmentStatus::Active);

    let raised = state
        .employee_service
        .update_assignment(
            assignment_id,
            AssignmentChanges { salary: Some(Decimal::from(60_000)), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(raised.salary, Decimal::from(60_000));
    assert_eq!(raised.status, AssignmentStatus::Active);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn leave_lifecycle(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, designation) = hierarchy(&state).await;
    let created = state
        .employee_service
        .add_employee(NewEmployee { assignment: Some(assignment(section, designation)), ..john() })
        .await
        .unwrap();

    let leave = state
        .leave_service
        .apply(NewLeave {
            employee_id: created.assignment_id.unwrap(),
            leave_type: LeaveType::Holiday,
            start_date: date("2025-01-01"),
            end_date: date("2025-01-03"),
            reason: "Viagem".into(),
        })
        .await
        .unwrap();
    assert_eq!(leave.days_requested, 3);

    let approver = ems_backend::services::auth::AuthUser {
        id: sqlx::query_scalar::<_, uuid::Uuid>("SELECT id FROM users LIMIT 1")
            .fetch_one(&pool)
            .await
            .unwrap(),
        email: "john@x.com".into(),
        role: ems_backend::models::auth::UserRole::Hr,
    };

    let approved = state
        .leave_service
        .update_status(leave.id, "approved", &approver, Some("Boa viagem"))
        .await
        .unwrap();
    assert_eq!(approved.approved_by, Some(approver.id));

    let err = state
        .leave_service
        .update_status(leave.id, "rejected", &approver, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::LeaveTransitionNotAllowed { .. }));

    let err = state.leave_service.delete(leave.id).await.unwrap_err();
    assert!(matches!(err, AppError::LeaveNotDeletable(_)));
}

async fn assigned_john(state: &AppState, section: i32, designation: i32) -> (i32, i32) {
    let created = state
        .employee_service
        .add_employee(NewEmployee { assignment: Some(assignment(section, designation)), ..john() })
        .await
        .unwrap();
    (created.detail_id, created.assignment_id.unwrap())
}

async fn mark_present(state: &AppState, employee_id: i32, day: &str) {
    state
        .attendance_service
        .upsert(AttendanceInput {
            employee_id,
            date: date(day),
            status: AttendanceStatus::Present,
            check_in: None,
            check_out: None,
            notes: None,
        })
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn simultaneous_scans_mark_once(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, designation) = hierarchy(&state).await;
    let (detail_id, _) = assigned_john(&state, section, designation).await;
    state
        .employee_service
        .set_barcode(detail_id, Some("EMP001123"))
        .await
        .unwrap();

    for day in 1..=10 {
        let day = NaiveDate::from_ymd_opt(2025, 6, day);
        let (a, b) = tokio::join!(
            state.attendance_service.barcode_check_in("EMP001123", day),
            state.attendance_service.barcode_check_in("EMP001123", day),
        );
        let outcomes = [a.unwrap(), b.unwrap()];

        let marked = outcomes
            .iter()
            .filter(|o| matches!(o, BarcodeOutcome::Marked { .. }))
            .count();
        let already = outcomes
            .iter()
            .filter(|o| matches!(o, BarcodeOutcome::AlreadyMarked { status: AttendanceStatus::Present, .. }))
            .count();
        assert_eq!((marked, already), (1, 1));
    }
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM attendance").await, 10);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn token_stops_working_once_the_employee_is_deleted(pool: PgPool) {
    let state = state(pool.clone());
    let created = state.employee_service.add_employee(john()).await.unwrap();

    let token = state.auth_service.login_user("john@x.com", "segredo123").await.unwrap();
    let user = state.auth_service.validate_token(&token).await.unwrap();
    assert_eq!(user.email, "john@x.com");

    state.employee_service.delete_by_detail(created.detail_id).await.unwrap();

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users").await, 0);
    let err = state.auth_service.validate_token(&token).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidToken));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn deleting_a_role_removes_its_designations_and_employees(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, role, designation) = hierarchy(&state).await;
    let (_, assignment_id) = assigned_john(&state, section, designation).await;
    mark_present(&state, assignment_id, "2025-06-01").await;

    let summary = state.organization_service.delete_role(role).await.unwrap();
    assert_eq!(summary.roles, 1);
    assert_eq!(summary.designations, 1);
    assert_eq!(summary.employees, 1);
    assert_eq!(summary.attendance_records, 1);
    assert_eq!(summary.credentials, 1);
    assert_eq!(summary.sections, 0);

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM roles").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM designations").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM employee_details").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users").await, 0);
    // A seção não pertence à função
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM sections").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn deleting_a_designation_keeps_its_role(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, designation) = hierarchy(&state).await;
    let (_, assignment_id) = assigned_john(&state, section, designation).await;
    mark_present(&state, assignment_id, "2025-06-01").await;

    let summary = state.organization_service.delete_designation(designation).await.unwrap();
    assert_eq!(summary.designations, 1);
    assert_eq!(summary.roles, 0);
    assert_eq!(summary.employees, 1);
    assert_eq!(summary.attendance_records, 1);

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM roles").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM employee_assignments").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM attendance").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn deleting_a_section_keeps_its_department(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, designation) = hierarchy(&state).await;
    let (_, assignment_id) = assigned_john(&state, section, designation).await;
    mark_present(&state, assignment_id, "2025-06-01").await;

    let summary = state.organization_service.delete_section(section).await.unwrap();
    assert_eq!(summary.sections, 1);
    assert_eq!(summary.departments, 0);
    assert_eq!(summary.employees, 1);
    assert_eq!(summary.credentials, 1);

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM departments").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM designations").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM employee_details").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn missing_hierarchy_nodes_are_not_found(pool: PgPool) {
    let state = state(pool.clone());
    let org = &state.organization_service;

    assert!(matches!(org.delete_department(999).await, Err(AppError::NotFound("department"))));
    assert!(matches!(org.delete_section(999).await, Err(AppError::NotFound("section"))));
    assert!(matches!(org.delete_role(999).await, Err(AppError::NotFound("role"))));
    assert!(matches!(org.delete_designation(999).await, Err(AppError::NotFound("designation"))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn employee_is_deleted_by_assignment_id(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, designation) = hierarchy(&state).await;
    let (detail_id, assignment_id) = assigned_john(&state, section, designation).await;
    mark_present(&state, assignment_id, "2025-06-01").await;
    state
        .leave_service
        .apply(NewLeave {
            employee_id: assignment_id,
            leave_type: LeaveType::ShortLeave,
            start_date: date("2025-06-02"),
            end_date: date("2025-06-02"),
            reason: "Gripe".into(),
        })
        .await
        .unwrap();

    let deleted = state.employee_service.delete_by_assignment(assignment_id).await.unwrap();
    assert_eq!(deleted.detail_id, detail_id);
    assert_eq!(deleted.assignment_id, Some(assignment_id));
    assert_eq!(deleted.attendance_records, 1);
    assert_eq!(deleted.leave_applications, 1);
    assert_eq!(deleted.credentials, 1);

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM employee_details").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM leave_applications").await, 0);
    // Hierarquia intacta
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM sections").await, 1);

    let err = state.employee_service.delete_by_assignment(assignment_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("employee")));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn never_assigned_employee_is_deleted_by_detail_id(pool: PgPool) {
    let state = state(pool.clone());
    let created = state
        .employee_service
        .add_employee(NewEmployee { password: None, ..john() })
        .await
        .unwrap();

    let deleted = state.employee_service.delete_by_detail(created.detail_id).await.unwrap();
    assert_eq!(deleted.assignment_id, None);
    assert_eq!(deleted.attendance_records, 0);
    assert_eq!(deleted.credentials, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM employee_details").await, 0);

    let err = state.employee_service.delete_by_detail(created.detail_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("employee")));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn email_change_carries_the_credential(pool: PgPool) {
    let state = state(pool.clone());
    let created = state.employee_service.add_employee(john()).await.unwrap();

    let updated = state
        .employee_service
        .update_personal_info(
            created.detail_id,
            PersonalInfoChanges { name: None, email: Some("john.doe@x.com".into()) },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "john.doe@x.com");
    assert_eq!(updated.name, "John Doe");

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users WHERE email = 'john.doe@x.com'").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users WHERE email = 'john@x.com'").await, 0);
    assert!(state.auth_service.login_user("john.doe@x.com", "segredo123").await.is_ok());
    assert!(matches!(
        state.auth_service.login_user("john@x.com", "segredo123").await,
        Err(AppError::InvalidCredentials)
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn assign_rejects_an_unknown_role(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, _) = hierarchy(&state).await;
    let free = state
        .organization_service
        .create_designation(&DesignationPayload { name: "Intern".into(), role_id: None })
        .await
        .unwrap();
    let created = state.employee_service.add_employee(john()).await.unwrap();

    let err = state
        .employee_service
        .assign(created.detail_id, 4242, assignment(section, free.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReferenceNotFound { entity: "role", id: 4242 }));
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM employee_assignments").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn payslip_preview_reads_a_consistent_month(pool: PgPool) {
    let state = state(pool.clone());
    let (_, section, _, designation) = hierarchy(&state).await;
    let (_, assignment_id) = assigned_john(&state, section, designation).await;
    mark_present(&state, assignment_id, "2025-06-02").await;

    let payslip = state.payroll_service.preview(assignment_id, "2025-06").await.unwrap();
    assert_eq!(payslip.employee_id, assignment_id);
    assert_eq!(payslip.employee_name, "John Doe");
    assert_eq!(payslip.month, "2025-06");
    assert_eq!(payslip.base_salary, Decimal::from(50_000));
    assert_eq!(payslip.leave_days, 0);
}
