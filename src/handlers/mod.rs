pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod employees;
pub mod leaves;
pub mod organization;
pub mod payroll;
pub mod policies;
