//! Running progress total for one packaging job
//!
//! The accumulator is owned by the worker that feeds it; the presentation
//! layer only ever sees the [`ProgressEvent`]s derived from it.

use std::collections::HashSet;

use pypack_core::event::ProgressEvent;

use crate::classifier::{Classification, StageKey};

/// Display ceiling while the job is still running; the final 5% is reserved
/// for completion so the bar never shows 100 before the process exits.
const RUNNING_CAP: f64 = 95.0;

/// Terminal label published with the forced completion event
const FINISHED_LABEL: &str = "完成";

/// Monotonic progress total with first-seen gating for fixed stages
#[derive(Debug, Default)]
pub struct ProgressAccumulator {
    current: f64,
    seen: HashSet<StageKey>,
    completed: bool,
}

impl ProgressAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a fixed-weight stage the first time its key is seen
    ///
    /// Returns the stage label when the stage was newly credited; repeated
    /// calls for the same key are no-ops.
    pub fn record(
        &mut self,
        key: StageKey,
        weight: f64,
        label: &'static str,
    ) -> Option<&'static str> {
        if self.seen.insert(key) {
            self.current += weight;
            Some(label)
        } else {
            None
        }
    }

    /// Add a dynamic step contribution, unconditionally
    ///
    /// Repeated dynamic matches add up without any per-stage budget cap;
    /// only the running-snapshot ceiling bounds what is displayed.
    pub fn record_dynamic(&mut self, delta: f64) {
        self.current += delta;
    }

    /// Apply one classification and produce the event to publish
    ///
    /// Every classified line yields an event carrying the matched stage
    /// label, even when a fixed stage was already credited.
    pub fn apply(&mut self, classification: &Classification) -> ProgressEvent {
        match classification {
            Classification::Fixed { key, label, weight } => {
                self.record(*key, *weight, *label);
            }
            Classification::Dynamic { delta, .. } => {
                self.record_dynamic(*delta);
            }
        }

        ProgressEvent::new(self.snapshot(), classification.label())
    }

    /// Current progress as shown to the user
    ///
    /// Capped at 95 while the job is active; uncapped once completed.
    pub fn snapshot(&self) -> f64 {
        if self.completed {
            self.current
        } else {
            self.current.min(RUNNING_CAP)
        }
    }

    /// Force the terminal state and produce the completion event
    ///
    /// Always jumps to exactly 100, regardless of how much weight was ever
    /// accumulated.
    pub fn complete(&mut self) -> ProgressEvent {
        self.completed = true;
        self.current = 100.0;
        ProgressEvent::new(100.0, FINISHED_LABEL)
    }

    /// Whether `complete` has been called
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
