pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod leave;
pub mod organization;
pub mod payroll;
pub mod policy;
