use error_common::{BudgetError, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub log_level: String,
    /// Structured JSON output instead of human-readable lines
    pub json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed; callers that may initialize
/// twice (tests) can ignore the error.
pub fn init_logging(config: &LoggerConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("family_access={}", config.log_level)))
        .map_err(|e| BudgetError::ConfigError(format!("invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.json {
        registry
            .with(fmt::layer().with_target(false).with_ansi(false).json())
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| BudgetError::ConfigError(format!("logging already initialized: {e}")))
}
