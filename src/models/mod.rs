pub mod assignments;
pub mod auth;
pub mod catalog;
pub mod common;
pub mod dashboard;
pub mod submissions;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, FlashLevel, PaginatedResponse, PaginationInfo, PaginationQuery,
    Redirect, locations,
};
