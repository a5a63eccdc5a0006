//! Export settings and output naming

use crate::imaging::OutputFormat;
use serde::{Deserialize, Serialize};

/// What to do when one item of an archive batch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the whole batch on the first failure
    #[default]
    FailFast,
    /// Skip failed items and report them alongside the archive
    Collect,
}

/// Export settings shared by every mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Prepended to every output name (default: "Logo_")
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,

    /// Encoding for exported photographs
    #[serde(default)]
    pub format: OutputFormat,

    /// Suggested file name for archive downloads
    #[serde(default = "default_archive_name")]
    pub archive_name: String,

    /// Worker threads for archive batches; 1 processes items in sequence
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Deflate level for archive entries (0-9)
    #[serde(default = "default_compression_level")]
    pub compression_level: i64,
}

fn default_name_prefix() -> String {
    "Logo_".to_string()
}

fn default_archive_name() -> String {
    "watermarked_photos.zip".to_string()
}

fn default_workers() -> usize {
    1
}

fn default_compression_level() -> i64 {
    6
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            name_prefix: default_name_prefix(),
            format: OutputFormat::default(),
            archive_name: default_archive_name(),
            workers: default_workers(),
            failure_policy: FailurePolicy::default(),
            compression_level: default_compression_level(),
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.name_prefix.is_empty() {
            return Err("export.name_prefix cannot be empty".to_string());
        }
        if self.archive_name.is_empty() {
            return Err("export.archive_name cannot be empty".to_string());
        }
        if self.workers == 0 {
            return Err("export.workers must be at least 1".to_string());
        }
        if !(0..=9).contains(&self.compression_level) {
            return Err(format!(
                "export.compression_level must be between 0 and 9, got {}",
                self.compression_level
            ));
        }
        Ok(())
    }

    /// Suggested download name for a single export: prefix, then the
    /// identifier's base name up to its first dot, then the format extension.
    pub fn single_file_name(&self, identifier: &str) -> String {
        let base = base_name(identifier);
        let stem = match base.split('.').next() {
            Some(stem) if !stem.is_empty() => stem,
            _ => base,
        };
        format!("{}{}.{}", self.name_prefix, stem, self.format.extension())
    }

    /// Archive entry name: prefix followed by the identifier as given.
    pub fn archive_entry_name(&self, identifier: &str) -> String {
        format!("{}{}", self.name_prefix, identifier)
    }
}

fn base_name(identifier: &str) -> &str {
    identifier
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(identifier)
}
