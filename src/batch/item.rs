//! Batch inputs and outputs

use super::ItemError;
use crate::watermark::{ConfigResolver, WatermarkConfig};

/// A caller-supplied photograph
#[derive(Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Identifier, typically the original file name
    pub identifier: String,
    /// Encoded image bytes
    pub data: Vec<u8>,
}

impl SourceImage {
    pub fn new(identifier: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            identifier: identifier.into(),
            data,
        }
    }
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("identifier", &self.identifier)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// A photograph paired with the settings it will be watermarked with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub source: SourceImage,
    pub config: WatermarkConfig,
}

impl BatchItem {
    pub fn new(source: SourceImage, config: WatermarkConfig) -> Self {
        Self { source, config }
    }

    pub fn identifier(&self) -> &str {
        &self.source.identifier
    }

    /// Pair every source with its resolved configuration, keeping input order.
    pub fn resolve_all(sources: Vec<SourceImage>, resolver: &ConfigResolver) -> Vec<BatchItem> {
        sources
            .into_iter()
            .map(|source| {
                let config = resolver.resolve(&source.identifier);
                BatchItem::new(source, config)
            })
            .collect()
    }
}

/// One encoded, watermarked photograph
#[derive(Debug, Clone)]
pub struct ExportedImage {
    /// Suggested output name
    pub file_name: String,
    pub data: Vec<u8>,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// A finished archive
#[derive(Debug, Clone)]
pub struct ArchiveArtifact {
    /// Suggested download name
    pub file_name: String,
    pub data: Vec<u8>,
    pub content_type: &'static str,
    /// Entry names in write order
    pub entries: Vec<String>,
    /// Items skipped under the collect failure policy
    pub failures: Vec<ItemError>,
}

impl ArchiveArtifact {
    pub const CONTENT_TYPE: &'static str = "application/zip";

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of [`BatchProcessor::process`](super::BatchProcessor::process)
#[derive(Debug, Clone)]
pub enum BatchOutput {
    Single(ExportedImage),
    Archive(ArchiveArtifact),
}

impl BatchOutput {
    pub fn file_name(&self) -> &str {
        match self {
            BatchOutput::Single(image) => &image.file_name,
            BatchOutput::Archive(archive) => &archive.file_name,
        }
    }

    pub fn data(&self) -> &[u8] {
        match self {
            BatchOutput::Single(image) => &image.data,
            BatchOutput::Archive(archive) => &archive.data,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            BatchOutput::Single(image) => image.content_type,
            BatchOutput::Archive(archive) => archive.content_type,
        }
    }
}
