//! Error types for hints.
//!
//! This module defines all error types used throughout the hints crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hints operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Deck Errors ===
    /// Failed to read the hints directory.
    #[error("failed to read hints directory {path}: {source}")]
    DeckScan {
        /// The directory that could not be read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a hint image file.
    #[error("failed to read hint {path}: {source}")]
    HintRead {
        /// Path to the hint file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to decode a hint image.
    #[error("failed to decode hint {path}: {source}")]
    HintDecode {
        /// Path to the hint file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: image::ImageError,
    },

    /// A hint image exceeds the configured dimension limit.
    #[error("hint {path} is {width}x{height}, larger than the {max} pixel limit")]
    HintTooLarge {
        /// Path to the hint file.
        path: PathBuf,
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// The configured dimension limit.
        max: u32,
    },

    // === Window Errors ===
    /// Failed to read the stored window position.
    #[error("failed to read window position from {path}: {source}")]
    WindowRead {
        /// Path to the position file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The stored window position could not be parsed.
    #[error("window position file {path} is corrupt: {source}")]
    WindowParse {
        /// Path to the position file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A window rectangle failed validation.
    #[error("invalid window rectangle: {message}")]
    WindowValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Display Errors ===
    /// The host renderer failed to create a texture.
    #[error("failed to create texture: {message}")]
    Texture {
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for hints operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new texture error.
    #[must_use]
    pub fn texture(message: impl Into<String>) -> Self {
        Self::Texture {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a window validation error.
    #[must_use]
    pub fn window_validation(message: impl Into<String>) -> Self {
        Self::WindowValidation {
            message: message.into(),
        }
    }

    /// Check if this error is a hint load failure (read, decode, or size).
    #[must_use]
    pub fn is_hint_load_error(&self) -> bool {
        matches!(
            self,
            Self::HintRead { .. } | Self::HintDecode { .. } | Self::HintTooLarge { .. }
        )
    }
}
