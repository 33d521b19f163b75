//! Event plumbing between the worker and the presentation layer
//!
//! Two independent unbounded channels, one per event type, with a
//! single-producer/single-consumer discipline: the worker owns the sending
//! half, the presentation layer drains the receiving half without blocking.
//! Each channel preserves FIFO order; log and progress events may interleave
//! arbitrarily relative to each other.

use pypack_core::event::{LogEvent, ProgressEvent};
use tokio::sync::mpsc;

/// Sending half, owned by the worker
#[derive(Debug, Clone)]
pub struct EventChannel {
    log_tx: mpsc::UnboundedSender<LogEvent>,
    progress_tx: mpsc::UnboundedSender<ProgressEvent>,
}

/// Receiving half, owned by the presentation layer
#[derive(Debug)]
pub struct EventReceiver {
    log_rx: mpsc::UnboundedReceiver<LogEvent>,
    progress_rx: mpsc::UnboundedReceiver<ProgressEvent>,
}

/// Create a connected channel pair
pub fn event_channel() -> (EventChannel, EventReceiver) {
    let (log_tx, log_rx) = mpsc::unbounded_channel();
    let (progress_tx, progress_rx) = mpsc::unbounded_channel();

    (
        EventChannel { log_tx, progress_tx },
        EventReceiver { log_rx, progress_rx },
    )
}

impl EventChannel {
    /// Push one raw output line
    ///
    /// A send failure means the consumer went away; the worker keeps
    /// draining the child regardless, so the failure is ignored.
    pub fn push_log(&self, text: impl Into<String>) {
        let _ = self.log_tx.send(LogEvent::new(text));
    }

    /// Push one progress update
    pub fn push_progress(&self, event: ProgressEvent) {
        let _ = self.progress_tx.send(event);
    }
}

impl EventReceiver {
    /// Drain all currently queued log events without blocking
    pub fn drain_logs(&mut self) -> Vec<LogEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.log_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Drain all currently queued progress events without blocking
    pub fn drain_progress(&mut self) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.progress_rx.try_recv() {
            events.push(event);
        }
        events
    }
}
