pub mod api;
pub mod health;

pub use api::{create_router, ApiServer, ApiState};
pub use health::{HealthResponse, HealthState, HealthStatus};
