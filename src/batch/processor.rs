//! Batch export pipeline
//!
//! Turns a list of [`BatchItem`]s into either one encoded photograph or a
//! ZIP archive holding one watermarked entry per item. Items are rendered
//! independently; with more than one worker they run on a dedicated rayon
//! pool, and results are always written back in input order.

use super::archive::ArchiveWriter;
use super::progress::{CancellationToken, ProgressAggregator, ProgressSink};
use super::{
    ArchiveArtifact, BatchError, BatchItem, BatchOutput, ExportOptions, ExportedImage,
    FailurePolicy, ItemError,
};
use crate::imaging::{EncoderFactory, ImageEncoder, QualitySettings, QualityTier};
use crate::metrics::ExportMetrics;
use crate::watermark::Compositor;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// How the caller wants the batch delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Exactly one item, returned as an encoded image
    Single,
    /// Any number of items, bundled into a ZIP archive
    Archive,
}

enum ItemOutcome {
    Done(Result<ExportedImage, ItemError>),
    Skipped,
}

pub struct BatchProcessor {
    compositor: Compositor,
    options: ExportOptions,
    quality: QualitySettings,
    encoder: Box<dyn ImageEncoder>,
    cancel: CancellationToken,
}

impl BatchProcessor {
    pub fn new(compositor: Compositor, options: ExportOptions, quality: QualitySettings) -> Self {
        let compositor = compositor.with_preview_max_dimension(quality.preview_max_dimension);
        let encoder = EncoderFactory::create(options.format);
        Self {
            compositor,
            options,
            quality,
            encoder,
            cancel: CancellationToken::new(),
        }
    }

    /// Use a caller-held token to cancel batches run by this processor
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn quality(&self) -> &QualitySettings {
        &self.quality
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn process(
        &self,
        items: &[BatchItem],
        mode: ExportMode,
        progress: &dyn ProgressSink,
    ) -> Result<BatchOutput, BatchError> {
        match mode {
            ExportMode::Single => {
                if items.len() != 1 {
                    return Err(BatchError::InvalidInput(format!(
                        "single export takes exactly one item, got {}",
                        items.len()
                    )));
                }
                let aggregator = ProgressAggregator::new(1, progress);
                if self.cancel.is_cancelled() {
                    return Err(BatchError::Cancelled {
                        completed: 0,
                        total: 1,
                    });
                }
                let image = self.export_single(&items[0])?;
                aggregator.item_done();
                Ok(BatchOutput::Single(image))
            }
            ExportMode::Archive => self
                .export_archive(items, progress)
                .map(BatchOutput::Archive),
        }
    }

    /// Full-resolution export of one item at single-download quality
    pub fn export_single(&self, item: &BatchItem) -> Result<ExportedImage, BatchError> {
        let file_name = self.options.single_file_name(item.identifier());
        let result = self.render_item(item, QualityTier::Single, file_name);
        ExportMetrics::global().record_item(result.is_ok());
        Ok(result?)
    }

    /// Reduced-size render for on-screen display; not counted as an export
    pub fn preview(&self, item: &BatchItem) -> Result<ExportedImage, BatchError> {
        let file_name = self.options.single_file_name(item.identifier());
        Ok(self.render_item(item, QualityTier::Preview, file_name)?)
    }

    pub fn export_archive(
        &self,
        items: &[BatchItem],
        progress: &dyn ProgressSink,
    ) -> Result<ArchiveArtifact, BatchError> {
        check_unique_identifiers(items)?;

        let total = items.len();
        let aggregator = ProgressAggregator::new(total, progress);
        let abort = AtomicBool::new(false);
        let started = Instant::now();

        tracing::info!(
            items = total,
            workers = self.options.workers,
            format = self.options.format.as_str(),
            "Starting archive export"
        );

        let run_one = |item: &BatchItem| -> ItemOutcome {
            if self.cancel.is_cancelled() || abort.load(Ordering::SeqCst) {
                return ItemOutcome::Skipped;
            }

            let entry_name = self.options.archive_entry_name(item.identifier());
            let result = self.render_item(item, QualityTier::Archive, entry_name);
            ExportMetrics::global().record_item(result.is_ok());

            if let Err(err) = &result {
                tracing::warn!(identifier = %err.identifier, kind = %err.kind, error = %err.message, "Item export failed");
                if self.options.failure_policy == FailurePolicy::FailFast {
                    abort.store(true, Ordering::SeqCst);
                }
            }

            aggregator.item_done();
            ItemOutcome::Done(result)
        };

        let outcomes: Vec<ItemOutcome> = if self.options.workers > 1 && total > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.workers)
                .thread_name(|i| format!("photomark-worker-{}", i))
                .build()
                .map_err(|e| BatchError::Archive(format!("failed to start worker pool: {}", e)))?;
            pool.install(|| items.par_iter().map(run_one).collect())
        } else {
            items.iter().map(run_one).collect()
        };

        let mut writer = ArchiveWriter::new(self.options.compression_level);
        let mut failures = Vec::new();
        let mut skipped = false;

        for outcome in outcomes {
            match outcome {
                ItemOutcome::Done(Ok(image)) => writer.add_entry(&image.file_name, &image.data)?,
                ItemOutcome::Done(Err(err)) => match self.options.failure_policy {
                    FailurePolicy::FailFast => return Err(BatchError::Item(err)),
                    FailurePolicy::Collect => failures.push(err),
                },
                ItemOutcome::Skipped => skipped = true,
            }
        }

        if skipped {
            let completed = aggregator.completed();
            tracing::info!(completed, total, "Archive export cancelled");
            return Err(BatchError::Cancelled { completed, total });
        }

        let (data, entries) = writer.finish()?;
        ExportMetrics::global().record_archive(data.len());

        tracing::info!(
            entries = entries.len(),
            failed = failures.len(),
            bytes = data.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Archive export complete"
        );

        Ok(ArchiveArtifact {
            file_name: self.options.archive_name.clone(),
            data,
            content_type: ArchiveArtifact::CONTENT_TYPE,
            entries,
            failures,
        })
    }

    fn render_item(
        &self,
        item: &BatchItem,
        tier: QualityTier,
        file_name: String,
    ) -> Result<ExportedImage, ItemError> {
        let span = tracing::info_span!(
            "export_item",
            identifier = %item.identifier(),
            tier = tier.as_str()
        );
        let _enter = span.enter();

        let rgb = self
            .compositor
            .render(&item.source.data, &item.config, tier)
            .map_err(|e| ItemError::from_composite(item.identifier(), e))?;

        let started = Instant::now();
        let encoded = self
            .encoder
            .encode(&rgb, self.quality.quality_for(tier))
            .map_err(|e| ItemError::from_encode(item.identifier(), e))?;
        ExportMetrics::global().observe_stage("encode", started.elapsed());

        tracing::debug!(
            width = rgb.width(),
            height = rgb.height(),
            bytes = encoded.data.len(),
            "Item encoded"
        );

        Ok(ExportedImage {
            file_name,
            data: encoded.data,
            content_type: encoded.content_type,
            width: rgb.width(),
            height: rgb.height(),
        })
    }
}

fn check_unique_identifiers(items: &[BatchItem]) -> Result<(), BatchError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.identifier()) {
            return Err(BatchError::InvalidInput(format!(
                "duplicate identifier '{}'",
                item.identifier()
            )));
        }
    }
    Ok(())
}
