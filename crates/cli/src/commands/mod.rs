//! CLI subcommands.

pub mod auth;
pub mod catalog;
pub mod translate;

use souq_storefront::backend::BackendError;
use souq_storefront::config::ConfigError;
use thiserror::Error;

/// Errors that can end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is present but invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend call failed.
    #[error("{0}")]
    Backend(#[from] BackendError),

    /// A command-line value could not be parsed.
    #[error("Invalid {field}: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    /// Some requested translation keys do not exist.
    #[error("{0} translation key(s) missing")]
    MissingKeys(usize),
}
