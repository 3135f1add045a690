pub mod pagination;
pub mod patch;
pub mod response;

pub use pagination::{PaginationInfo, PaginationQuery};
pub use patch::deserialize_patch;
pub use response::ApiResponse;
