// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Employees ---
        handlers::employees::create_employee,
        handlers::employees::list_employees,
        handlers::employees::get_employee,
        handlers::employees::get_employee_by_detail,
        handlers::employees::update_assignment,
        handlers::employees::update_personal_info,
        handlers::employees::assign_employee,
        handlers::employees::delete_employee,
        handlers::employees::delete_employee_by_detail,
        handlers::employees::set_barcode,
        handlers::documents::employee_badge,

        // --- Hierarquia ---
        handlers::organization::create_department,
        handlers::organization::list_departments,
        handlers::organization::get_department,
        handlers::organization::update_department,
        handlers::organization::delete_department,
        handlers::organization::create_section,
        handlers::organization::list_sections,
        handlers::organization::get_section,
        handlers::organization::update_section,
        handlers::organization::delete_section,
        handlers::organization::create_role,
        handlers::organization::list_roles,
        handlers::organization::get_role,
        handlers::organization::update_role,
        handlers::organization::delete_role,
        handlers::organization::create_designation,
        handlers::organization::list_designations,
        handlers::organization::get_designation,
        handlers::organization::update_designation,
        handlers::organization::delete_designation,

        // --- Attendance ---
        handlers::attendance::upsert_attendance,
        handlers::attendance::barcode_check_in,
        handlers::attendance::list_attendance,
        handlers::attendance::check_out,
        handlers::attendance::delete_attendance,

        // --- Leaves ---
        handlers::leaves::apply_leave,
        handlers::leaves::list_leaves,
        handlers::leaves::get_leave,
        handlers::leaves::update_leave_status,
        handlers::leaves::delete_leave,

        // --- Policies ---
        handlers::policies::get_overtime_policy,
        handlers::policies::update_overtime_policy,
        handlers::policies::get_leave_policy,
        handlers::policies::update_leave_policy,
        handlers::policies::get_tax_policy,
        handlers::policies::update_tax_policy,

        // --- Payroll ---
        handlers::payroll::preview_payslip,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Employees ---
            models::employee::EmploymentType,
            models::employee::AssignmentStatus,
            models::employee::EmployeeDetails,
            models::employee::EmployeeAssignment,
            models::employee::AssignmentView,
            models::employee::AssignmentState,
            models::employee::Employee,
            models::employee::AssignmentFilter,
            models::employee::CreatedEmployee,
            models::employee::DeletedEmployee,
            handlers::employees::CreateEmployeePayload,
            handlers::employees::UpdateAssignmentPayload,
            handlers::employees::UpdatePersonalInfoPayload,
            handlers::employees::AssignEmployeePayload,
            handlers::employees::BarcodePayload,

            // --- Hierarquia ---
            models::organization::Department,
            models::organization::Section,
            models::organization::Role,
            models::organization::Designation,
            models::organization::DepartmentPayload,
            models::organization::SectionPayload,
            models::organization::RolePayload,
            models::organization::DesignationPayload,
            models::organization::CascadeSummary,

            // --- Attendance ---
            models::attendance::AttendanceStatus,
            models::attendance::Attendance,
            models::attendance::AttendanceEntry,
            models::attendance::UpsertAction,
            models::attendance::AttendanceUpsert,
            models::attendance::BarcodeResponse,
            handlers::attendance::UpsertAttendancePayload,
            handlers::attendance::BarcodeCheckInPayload,
            handlers::attendance::CheckOutPayload,

            // --- Leaves ---
            models::leave::LeaveType,
            models::leave::LeaveStatus,
            models::leave::LeaveApplication,
            handlers::leaves::ApplyLeavePayload,
            handlers::leaves::UpdateLeaveStatusPayload,

            // --- Policies ---
            models::policy::OvertimePolicy,
            models::policy::UpdateOvertimePolicy,
            models::policy::LeavePolicy,
            models::policy::UpdateLeavePolicy,
            models::policy::TaxPolicy,
            models::policy::UpdateTaxPolicy,

            // --- Payroll ---
            models::payroll::Payslip,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Employees", description = "Cadastro e Alocação de Funcionários"),
        (name = "Organization", description = "Departamentos, Seções, Funções e Cargos"),
        (name = "Attendance", description = "Controle de Presença"),
        (name = "Leaves", description = "Pedidos de Licença"),
        (name = "Policies", description = "Políticas de Horas Extras, Licenças e Imposto"),
        (name = "Payroll", description = "Prévia de Contracheque"),
        (name = "Dashboard", description = "Indicadores Gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
