//! Collaborator contracts between the control core and its transport.
//!
//! The core only needs "deliver me face-detection events", "deliver me joint
//! feedback", "let me publish a command", and a monotonic clock. Everything
//! behind these traits is transport-specific and lives elsewhere.

use crate::command::{FeedbackSample, HeadCommand};
use crate::face::FaceBatch;
use crate::Result;
use std::time::Instant;

/// Monotonic time source for dt computation and staleness checks
pub trait Clock: Send + Sync {
    /// Current monotonic time
    fn now(&self) -> Instant;
}

/// System monotonic clock
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Accepts head commands for actuation; fire-and-forget
pub trait CommandSink: Send + Sync {
    /// Publish one command. No acknowledgment is modeled.
    fn publish(&self, cmd: HeadCommand);
}

/// Delivers face-detection batches at irregular intervals
pub trait DetectionSource: Send {
    /// Block until the next batch arrives
    ///
    /// `Ok(None)` means the stream has ended. Batches may be empty.
    fn recv(&mut self) -> Result<Option<FaceBatch>>;
}

/// Delivers actuator feedback samples
pub trait FeedbackSource: Send {
    /// Block until the next sample arrives
    ///
    /// `Ok(None)` means the stream has ended. A malformed sample surfaces as
    /// `Err` for that invocation; the stream itself continues.
    fn recv(&mut self) -> Result<Option<FeedbackSample>>;
}
