//! Job execution for pypack
//!
//! This crate turns the packaging tool's log output into progress events:
//! an ordered regex table classifies each line, a monotonic accumulator
//! maps classifications to an overall percentage, and the runner streams a
//! child process through both while publishing events for the presentation
//! layer.

pub mod channel;
pub mod classifier;
pub mod error;
pub mod progress;
pub mod runner;

pub use channel::{event_channel, EventChannel, EventReceiver};
pub use classifier::{Classification, StageClassifier, StageKey};
pub use error::{BuildError, Result};
pub use progress::ProgressAccumulator;
pub use runner::{probe, JobRunner, RunnerState, DEFAULT_TOOL};
