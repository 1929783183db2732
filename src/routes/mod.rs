pub mod assignments;

pub mod auth;

pub mod catalog;

pub mod dashboard;

pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use catalog::configure_catalog_routes;
pub use dashboard::configure_dashboard_routes;
pub use submissions::configure_submissions_routes;
