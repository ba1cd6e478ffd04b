pub mod attendance_service;
pub mod auth;
pub mod dashboard_service;
pub mod document_service;
pub mod employee_service;
pub mod leave_service;
pub mod organization_service;
pub mod payroll_service;
pub mod policy_service;
