pub mod user_repo;
pub use user_repo::UserRepository;
pub mod employee_repo;
pub use employee_repo::{EmployeeLeaf, EmployeeRepository};
pub mod organization_repo;
pub use organization_repo::OrganizationRepository;
pub mod attendance_repo;
pub use attendance_repo::AttendanceRepository;
pub mod leave_repo;
pub use leave_repo::LeaveRepository;
pub mod policy_repo;
pub use policy_repo::PolicyRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
