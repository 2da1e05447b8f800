//! Closed-loop pan-tilt head controller for face tracking.
//!
//! This library keeps a pan-tilt camera head pointed at the nearest detected
//! face and, absent detections, sweeps the head through a search pattern.
//! The control core fuses asynchronous sensor events with a periodic
//! actuation loop:
//!
//! 1. Face-detection batches arrive at irregular intervals; the nearest face
//!    is selected and an incremental, rate-limited, dead-zoned command is
//!    issued toward it
//! 2. Joint feedback resynchronizes the controller's pose belief with
//!    ground truth
//! 3. When tracking input goes stale, a fixed-rate search loop sweeps the
//!    pan axis back and forth between soft bounds
//!
//! Face detection itself is an external input; command publication goes to
//! an abstract sink. Both are expressed as the collaborator contracts in
//! [`io`], so any transport can drive the core.
//!
//! # Examples
//!
//! ## Driving the tracker directly
//!
//! ```
//! use face_tracking::command::{FeedbackSample, HeadCommand};
//! use face_tracking::config::Config;
//! use face_tracking::face::Face;
//! use face_tracking::io::{CommandSink, MonotonicClock};
//! use face_tracking::tracker::FaceTracker;
//! use std::sync::Arc;
//!
//! struct PrintSink;
//!
//! impl CommandSink for PrintSink {
//!     fn publish(&self, cmd: HeadCommand) {
//!         println!("pan {:.3} rad, tilt {:.3} rad", cmd.pan_pos, cmd.tilt_pos);
//!     }
//! }
//!
//! let config = Config::default();
//! config.validate().expect("default config is valid");
//!
//! let tracker = FaceTracker::new(config, Arc::new(MonotonicClock), Arc::new(PrintSink));
//!
//! // The first joint feedback seeds the pose; no command is produced before it
//! let seed = FeedbackSample::from_joints(&[0.0, 0.0], &[0.0, 0.0]).expect("well-formed sample");
//! tracker.on_feedback(seed);
//!
//! // A face off to the left produces an incremental pan command toward it
//! tracker.on_detections(&vec![Face::new(0.8, 0.0, 1.5)]);
//! ```
//!
//! ## Running with the stdio transport
//!
//! ```no_run
//! use face_tracking::{app::App, config::Config, transport};
//! use std::sync::Arc;
//!
//! # fn main() -> face_tracking::Result<()> {
//! let (detections, feedback, router) = transport::spawn_stdin_router();
//!
//! let mut app = App::new(Config::default(), Arc::new(transport::StdioSink::new()))?;
//! app.attach_detections(detections);
//! app.attach_feedback(feedback);
//! app.start_search();
//!
//! router.join().expect("router thread panicked");
//! app.shutdown();
//! # Ok(())
//! # }
//! ```

/// Face detection entities and nearest-face selection
pub mod face;

/// Head command, joint limits, and feedback sample types
pub mod command;

/// Incremental tracking control toward the nearest face
pub mod tracking;

/// Search sweep control for stale tracking input
pub mod search;

/// Orchestration of tracking, searching, and feedback
pub mod tracker;

/// Collaborator contracts: clock, sources, command sink
pub mod io;

/// Composition root and thread wiring
pub mod app;

/// JSON-lines stdio transport
pub mod transport;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
