mod app_error;
mod response;

pub use app_error::{AppError, AppResult};
pub use response::ErrorResponse;
