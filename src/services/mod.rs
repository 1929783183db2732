pub mod assignments;
pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod outcome;
pub mod submissions;
pub(crate) mod views;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use dashboard::DashboardService;
pub use outcome::Outcome;
pub use submissions::SubmissionService;
