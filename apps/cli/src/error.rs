//! # CLI Error Type
//!
//! Unified error type for shell commands and startup.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  stockroom> sell E1 50                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command::execute                                                │  │
//! │  │  Result<Outcome, CliError>                                       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog error? ── CatalogError::InsufficientStock ──┐           │  │
//! │  │         │                                            ▼           │  │
//! │  │  Bad input? ────── CliError::Usage ───────────── CliError ──────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Printed as: error [INSUFFICIENT_STOCK]: Insufficient stock for E1 ... │
//! │  The session keeps running; only startup errors end the process.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::{CatalogError, ValidationError};
use thiserror::Error;

/// Errors surfaced by the command shell.
#[derive(Debug, Error)]
pub enum CliError {
    /// A catalog operation was rejected.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Input could not be turned into a valid product or query.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Wrong arguments for a known command.
    #[error("usage: {0}")]
    Usage(String),

    /// First word of the line is not a command.
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config parsed but holds unusable values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading commands or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoadFailed(err.to_string())
    }
}

impl CliError {
    /// Short machine-readable code shown in front of the message.
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Catalog(err) => match err {
                CatalogError::DuplicateProduct { .. } => "DUPLICATE",
                CatalogError::ProductNotFound(_) => "NOT_FOUND",
                CatalogError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
                CatalogError::InvalidQuantity { .. } => "INVALID_QUANTITY",
                CatalogError::Validation(_) => "VALIDATION_ERROR",
            },
            CliError::Validation(_) => "VALIDATION_ERROR",
            CliError::Usage(_) | CliError::UnknownCommand(_) => "USAGE",
            CliError::ConfigLoadFailed(_) | CliError::InvalidConfig(_) => "CONFIG",
            CliError::Io(_) | CliError::Json(_) => "INTERNAL",
        }
    }

    /// True for errors a user can fix by retyping the command.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CliError::Io(_))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
