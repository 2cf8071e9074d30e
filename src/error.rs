//! Error types for the tour plugin.

use std::path::PathBuf;

/// Top-level error type for the plugin.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Locale error: {0}")]
    Locale(#[from] LocaleError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Message bundle loading errors.
///
/// A failure to load the selected locale's bundle is recoverable (the
/// fallback bundle is tried next); `Unavailable` means both failed and the
/// tour cannot render any text, so it propagates as fatal.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("Failed to read message bundle {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse message bundle {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No usable message bundle for locale {locale} or fallback {fallback}")]
    Unavailable { locale: String, fallback: String },
}

/// Remote client-settings errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to parse client settings document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for the plugin.
pub type Result<T> = std::result::Result<T, Error>;
