// Error types module

use crate::batch::BatchError;
use crate::config::ConfigError;
use crate::watermark::AssetError;
use thiserror::Error;

/// Top-level error for the photomark library
///
/// Groups the failure domains a caller may need to tell apart: startup
/// (configuration, logo assets) versus export work (batch).
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Startup errors cannot be fixed by retrying with different inputs
    pub fn is_startup(&self) -> bool {
        matches!(self, Error::Config(_) | Error::Asset(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
