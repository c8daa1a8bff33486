pub mod auth;
pub mod cron;
pub mod gate;
pub mod response;

pub use auth::{AdminSession, CurrentSession};
pub use cron::require_cron_secret;
pub use gate::access_gate_middleware;
pub use response::{ApiResponse, ApiResult};
