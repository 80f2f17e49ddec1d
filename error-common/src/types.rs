use crate::codes;
use crate::context::ErrorContext;
use thiserror::Error;

/// Error enum shared across the Family Budget workspace
#[derive(Error, Debug)]
pub enum BudgetError {
    /// An authorization verdict was a denial and the caller enforced it
    #[error("Access denied ({code}): {reason}")]
    AccessDenied { code: &'static str, reason: String },

    /// A user status change that the lifecycle does not permit
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Malformed input at the deserialization boundary
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BudgetError {
    pub fn access_denied(code: &'static str, reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            code,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccessDenied { code, .. } => code,
            Self::InvalidTransition { .. } => codes::lifecycle::INVALID_STATUS_TRANSITION,
            Self::ValidationError(_) => codes::validation::INVALID_INPUT,
            Self::ConfigError(_) => codes::configuration::INVALID_CONFIG,
            Self::Other(_) => codes::validation::INVALID_FORMAT,
        }
    }

    /// HTTP status the API layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::AccessDenied { .. } => 403,
            Self::InvalidTransition { .. } => 409,
            Self::ValidationError(_) => 422,
            Self::ConfigError(_) | Self::Other(_) => 500,
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::ValidationError(err.to_string())
    }
}

/// Result type alias for Family Budget operations
pub type Result<T> = std::result::Result<T, BudgetError>;

/// Log an error together with its context
pub fn log_error(context: &ErrorContext, error: &BudgetError) {
    tracing::error!(
        error_code = error.code(),
        request_id = context.request_id.as_deref().unwrap_or("-"),
        user_id = context.user_id.as_deref().unwrap_or("-"),
        error = %error,
        "Family budget error occurred"
    );
}
