//! Watermark error types.
//!
//! Defines errors that can occur while loading logo assets and compositing.

use super::LogoVariant;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the logo asset store.
///
/// Any of these is fatal at startup: no watermarking is possible without
/// both logo variants.
#[derive(Error, Debug)]
pub enum AssetError {
    /// A logo file could not be located or decoded
    #[error("Logo asset '{variant}' unavailable at {}: {reason}", path.display())]
    AssetMissing {
        variant: LogoVariant,
        path: PathBuf,
        reason: String,
    },
}

impl AssetError {
    pub fn missing(variant: LogoVariant, path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AssetError::AssetMissing {
            variant,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors that can occur while compositing a watermark onto one image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositeError {
    /// Source bytes are malformed or in an unsupported format
    #[error("Failed to decode source image: {0}")]
    Decode(String),

    /// Invariant violation during compositing (zero-sized source, resize failure)
    #[error("Failed to composite watermark: {0}")]
    Composite(String),
}
