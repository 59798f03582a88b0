pub mod extract;
pub mod response;

pub use extract::{PathParam, QueryParams, ValidJson};
pub use response::{ApiResponse, ApiResult, CssResponse};
