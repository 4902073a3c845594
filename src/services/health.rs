//! Liveness report for process supervision

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "betfoot";

/// Health status for the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Shared state for the health endpoint
#[derive(Debug, Clone)]
pub struct HealthState {
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
        }
    }

    pub fn report(&self) -> HealthResponse {
        let now = Utc::now();
        HealthResponse {
            status: HealthStatus::Healthy,
            service: SERVICE_NAME.to_string(),
            timestamp: now,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: (now - self.started_at).num_seconds().max(0) as u64,
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}
