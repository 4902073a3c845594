use thiserror::Error;

/// Main error type for the pricing service
#[derive(Error, Debug)]
pub enum BetFootError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Numeric faults inside the fair-odds model
    #[error("Model error: {0}")]
    Model(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl BetFootError {
    /// Whether this error came from the pricing model rather than the plumbing
    pub fn is_model_fault(&self) -> bool {
        matches!(self, BetFootError::Model(_))
    }
}

/// Result type alias for BetFootError
pub type Result<T> = std::result::Result<T, BetFootError>;
