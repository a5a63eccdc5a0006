//! Batch export error types
//!
//! Every per-item failure names the identifier that caused it, so the caller
//! can report exactly which photograph could not be exported.

use crate::imaging::ImageError;
use crate::watermark::CompositeError;
use std::fmt;
use thiserror::Error;

/// Pipeline stage at which an item failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemErrorKind {
    /// Source bytes malformed or unsupported
    Decode,
    /// Compositing invariant violated (e.g. zero-sized source)
    Composite,
    /// Compression backend failed
    Encode,
}

impl ItemErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemErrorKind::Decode => "decode",
            ItemErrorKind::Composite => "composite",
            ItemErrorKind::Encode => "encode",
        }
    }
}

impl fmt::Display for ItemErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single item that could not be exported
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Item '{identifier}' failed at {kind}: {message}")]
pub struct ItemError {
    pub identifier: String,
    pub kind: ItemErrorKind,
    pub message: String,
}

impl ItemError {
    pub fn new(identifier: impl Into<String>, kind: ItemErrorKind, message: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn from_composite(identifier: impl Into<String>, err: CompositeError) -> Self {
        match err {
            CompositeError::Decode(message) => Self::new(identifier, ItemErrorKind::Decode, message),
            CompositeError::Composite(message) => {
                Self::new(identifier, ItemErrorKind::Composite, message)
            }
        }
    }

    pub fn from_encode(identifier: impl Into<String>, err: ImageError) -> Self {
        Self::new(identifier, ItemErrorKind::Encode, err.to_string())
    }
}

/// Errors that abort a batch call
#[derive(Error, Debug)]
pub enum BatchError {
    /// An item failed and the batch runs fail-fast
    #[error(transparent)]
    Item(#[from] ItemError),

    /// The archive container could not be written
    #[error("Failed to build archive: {0}")]
    Archive(String),

    /// The caller cancelled the batch between items
    #[error("Batch cancelled after {completed} of {total} items")]
    Cancelled { completed: usize, total: usize },

    /// The request itself is unusable (wrong item count, duplicate identifiers)
    #[error("Invalid batch input: {0}")]
    InvalidInput(String),
}

impl BatchError {
    /// The offending identifier, for per-item failures
    pub fn identifier(&self) -> Option<&str> {
        match self {
            BatchError::Item(err) => Some(&err.identifier),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for BatchError {
    fn from(err: zip::result::ZipError) -> Self {
        BatchError::Archive(err.to_string())
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        BatchError::Archive(err.to_string())
    }
}
