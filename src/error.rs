use thiserror::Error;

/// Main error type for the order CLI
#[derive(Error, Debug)]
pub enum FutctlError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    // The exchange answered with a non-success status. Kept separate from
    // `Http` in the taxonomy even though the submitter reports both as one
    // failure category.
    #[error("Exchange rejected request: status={status} body={body}")]
    ExchangeRejected { status: u16, body: String },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for FutctlError
pub type Result<T> = std::result::Result<T, FutctlError>;
