//! Progress reporting between batches.
//!
//! The progress sink is the only notification channel this subsystem
//! exposes; logging and metrics are layered on top by external consumers.

use crate::error::Phase;
use serde::{Deserialize, Serialize};

/// A progress notification emitted between batches.
///
/// Events are emitted strictly in batch order, so `percentage` and
/// `items_done` are monotonically non-decreasing within one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Pipeline phase the event belongs to.
    pub phase: Phase,

    /// Completion percentage in `[0, 100]`.
    pub percentage: f64,

    /// Items processed so far.
    pub items_done: u64,

    /// Total items this call will process.
    pub items_total: u64,
}

impl ProgressEvent {
    /// Build an event, deriving the percentage from the item counts.
    pub fn new(phase: Phase, items_done: u64, items_total: u64) -> Self {
        let percentage = if items_total == 0 {
            100.0
        } else {
            (items_done as f64 / items_total as f64 * 100.0).clamp(0.0, 100.0)
        };
        Self {
            phase,
            percentage,
            items_done,
            items_total,
        }
    }
}

/// Synchronous progress sink invoked between batches.
pub type ProgressSink = Box<dyn Fn(&ProgressEvent) + Send + Sync>;
