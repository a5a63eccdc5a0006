//! Progress reporting and cooperative cancellation
//!
//! Progress updates from worker threads funnel through a single aggregator
//! so the `(completed, total)` stream a caller observes is strictly
//! increasing, whatever order items finish in.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One progress update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completion ratio in `[0.0, 1.0]`; an empty batch counts as done
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

/// Receiver of progress updates
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn on_progress(&self, progress: Progress) {
        self(progress)
    }
}

/// Sink that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _progress: Progress) {}
}

/// Serializes completion events from any number of workers
pub(crate) struct ProgressAggregator<'a> {
    completed: Mutex<usize>,
    total: usize,
    sink: &'a dyn ProgressSink,
}

impl<'a> ProgressAggregator<'a> {
    pub(crate) fn new(total: usize, sink: &'a dyn ProgressSink) -> Self {
        Self {
            completed: Mutex::new(0),
            total,
            sink,
        }
    }

    /// Count one finished item and notify the sink while holding the lock
    pub(crate) fn item_done(&self) {
        let mut completed = self.completed.lock();
        *completed += 1;
        self.sink.on_progress(Progress {
            completed: *completed,
            total: self.total,
        });
    }

    pub(crate) fn completed(&self) -> usize {
        *self.completed.lock()
    }
}

/// Shared flag a caller flips to stop a batch between items
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can drive another batch
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}
