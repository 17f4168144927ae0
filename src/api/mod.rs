pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
