pub mod error_code;
pub mod pagination;
pub mod redirect;
pub mod response;

pub use error_code::ErrorCode;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use redirect::{FlashLevel, Redirect, locations};
pub use response::ApiResponse;
