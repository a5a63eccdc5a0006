//! Deterministic in-memory ZIP writer
//!
//! Entries carry a fixed timestamp and permission set, so identical inputs
//! produce byte-identical archives.

use super::BatchError;
use std::collections::HashSet;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

const ENTRY_PERMISSIONS: u32 = 0o644;

pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: Vec<String>,
    names: HashSet<String>,
}

impl ArchiveWriter {
    /// New empty archive using Deflate at `compression_level` (0-9)
    pub fn new(compression_level: i64) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level.clamp(0, 9)))
            .last_modified_time(DateTime::default())
            .unix_permissions(ENTRY_PERMISSIONS);

        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options,
            entries: Vec::new(),
            names: HashSet::new(),
        }
    }

    pub fn add_entry(&mut self, name: &str, data: &[u8]) -> Result<(), BatchError> {
        if !self.names.insert(name.to_string()) {
            return Err(BatchError::Archive(format!("duplicate entry name '{}'", name)));
        }

        self.zip.start_file(name, self.options)?;
        self.zip.write_all(data)?;
        self.entries.push(name.to_string());

        tracing::trace!(entry = name, bytes = data.len(), "Archive entry written");
        Ok(())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Finalize the central directory and return the archive bytes plus
    /// the entry names in write order.
    pub fn finish(self) -> Result<(Vec<u8>, Vec<String>), BatchError> {
        let cursor = self.zip.finish()?;
        Ok((cursor.into_inner(), self.entries))
    }
}

/// Entry names of an archive, in central directory order
pub fn entry_names(archive: &[u8]) -> Result<Vec<String>, BatchError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;
    let mut names = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        names.push(zip.by_index(i)?.name().to_string());
    }
    Ok(names)
}

/// Decompressed contents of one entry
pub fn read_entry(archive: &[u8], name: &str) -> Result<Vec<u8>, BatchError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;
    let mut file = zip.by_name(name)?;
    let mut data = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut data)?;
    Ok(data)
}
