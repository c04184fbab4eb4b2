//! Application-wide error types.
//!
//! Subsystems use their own `thiserror` enums ([`CatalogError`],
//! [`PlayerError`], [`ConfigError`]); this module aggregates them for
//! code that crosses subsystem boundaries. The binary edge (CLI, main)
//! uses `anyhow`.
//!
//! Cursor index violations are not represented here: they are assertion
//! failures, never error values.

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::player::PlayerError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog could not be loaded; fatal at startup
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Playback failed; recoverable
    #[error("Playback error: {0}")]
    Playback(#[from] PlayerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Window or renderer failure
    #[error("GUI error: {0}")]
    Gui(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn gui(message: impl Into<String>) -> Self {
        Self::Gui(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ConfigError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Config(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, CatalogError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Catalog(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, PlayerError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Playback(e).context(ctx))
    }
}
