//! Batch export of watermarked photographs.
//!
//! A batch is an ordered list of [`BatchItem`]s, each a source photograph
//! paired with its resolved [`WatermarkConfig`](crate::watermark::WatermarkConfig).
//! The [`BatchProcessor`] delivers the batch either as one encoded image
//! (single mode) or as a ZIP archive with one entry per item (archive mode).
//!
//! # Example
//!
//! ```no_run
//! use photomark::batch::{BatchItem, BatchProcessor, ExportMode, ExportOptions, NoProgress, SourceImage};
//! use photomark::imaging::QualitySettings;
//! use photomark::watermark::{Compositor, ConfigResolver, LogoAssets};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let assets = Arc::new(LogoAssets::load("logo_light.png", "logo_dark.png")?);
//! let processor = BatchProcessor::new(
//!     Compositor::new(assets),
//!     ExportOptions::default(),
//!     QualitySettings::default(),
//! );
//!
//! let sources = vec![SourceImage::new("IMG_2041.jpg", std::fs::read("IMG_2041.jpg")?)];
//! let items = BatchItem::resolve_all(sources, &ConfigResolver::default());
//! let output = processor.process(&items, ExportMode::Archive, &NoProgress)?;
//! std::fs::write(output.file_name(), output.data())?;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod error;
pub mod item;
pub mod options;
pub mod processor;
pub mod progress;

pub use archive::{entry_names, read_entry, ArchiveWriter};
pub use error::{BatchError, ItemError, ItemErrorKind};
pub use item::{ArchiveArtifact, BatchItem, BatchOutput, ExportedImage, SourceImage};
pub use options::{ExportOptions, FailurePolicy};
pub use processor::{BatchProcessor, ExportMode};
pub use progress::{CancellationToken, NoProgress, Progress, ProgressSink};
