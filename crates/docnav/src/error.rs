//! CLI error types.

use docnav_config::ConfigError;
use docnav_site::ValidationErrors;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Check failed with {0} error(s)")]
    CheckFailed(usize),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}
