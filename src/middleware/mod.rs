pub mod navigation;
pub mod response;
pub mod session;

pub use navigation::navigation_guard_middleware;
pub use response::{ApiResponse, ApiResult};
pub use session::CurrentSession;
