pub mod response;
pub mod system;

pub use response::{ApiError, ApiErrorResponse, MessageResponse, create_error_response};
pub use system::{AppStartTime, HealthResponse};
