//! JSON-lines transport over stdio.
//!
//! One detection subscription, one feedback subscription, one command
//! publication, multiplexed over a line protocol:
//!
//! ```text
//! {"type":"faces","points":[{"x":0.2,"y":0.0,"z":1.5}]}
//! {"type":"joints","position":[0.1,0.0],"velocity":[0.0,0.0]}
//! ```
//!
//! A router thread reads lines and demultiplexes them into channel-backed
//! sources the [`crate::app::App`] can drive. Published commands go to
//! stdout as one JSON object per line.

use crate::command::{FeedbackSample, HeadCommand};
use crate::face::{Face, FaceBatch};
use crate::io::{CommandSink, DetectionSource, FeedbackSource};
use crate::Result;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// A detected point on the wire (meters, camera frame)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointMsg {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Incoming wire messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputMessage {
    /// One face-detection batch; empty when no valid detection this cycle
    Faces { points: Vec<PointMsg> },
    /// Joint feedback, positions and velocities ordered `[pan, tilt]`
    Joints { position: Vec<f64>, velocity: Vec<f64> },
}

/// Detection events received through the stdin router
pub struct ChannelDetectionSource {
    rx: Receiver<FaceBatch>,
}

impl DetectionSource for ChannelDetectionSource {
    fn recv(&mut self) -> Result<Option<FaceBatch>> {
        Ok(self.rx.recv().ok())
    }
}

/// Feedback samples received through the stdin router
///
/// Arity violations travel through the channel as errors so the consuming
/// loop surfaces them per invocation.
pub struct ChannelFeedbackSource {
    rx: Receiver<Result<FeedbackSample>>,
}

impl FeedbackSource for ChannelFeedbackSource {
    fn recv(&mut self) -> Result<Option<FeedbackSample>> {
        match self.rx.recv() {
            Ok(sample) => sample.map(Some),
            Err(_) => Ok(None),
        }
    }
}

/// Command sink writing one JSON object per line to stdout
#[derive(Debug, Default)]
pub struct StdioSink;

impl StdioSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CommandSink for StdioSink {
    fn publish(&self, cmd: HeadCommand) {
        match encode_command(&cmd) {
            Ok(line) => {
                let mut stdout = io::stdout().lock();
                if writeln!(stdout, "{line}").is_err() {
                    error!("Failed to write command to stdout");
                }
            }
            Err(e) => error!("Failed to encode command: {e}"),
        }
    }
}

/// Decode one input line
pub fn decode_line(line: &str) -> Result<InputMessage> {
    Ok(serde_json::from_str(line)?)
}

/// Encode a command as one output line
pub fn encode_command(cmd: &HeadCommand) -> Result<String> {
    Ok(serde_json::to_string(cmd)?)
}

/// Spawn a router that demultiplexes a line stream into the two sources
///
/// Undecodable lines are logged and skipped; the next line proceeds. The
/// router ends at end of input, closing both channels and thereby both
/// source streams.
pub fn spawn_reader_router<R>(reader: R) -> (ChannelDetectionSource, ChannelFeedbackSource, JoinHandle<()>)
where
    R: BufRead + Send + 'static,
{
    let (face_tx, face_rx) = mpsc::channel();
    let (feedback_tx, feedback_rx) = mpsc::channel();

    let handle = thread::spawn(move || route_lines(reader, &face_tx, &feedback_tx));

    (
        ChannelDetectionSource { rx: face_rx },
        ChannelFeedbackSource { rx: feedback_rx },
        handle,
    )
}

/// Spawn the router over stdin
pub fn spawn_stdin_router() -> (ChannelDetectionSource, ChannelFeedbackSource, JoinHandle<()>) {
    spawn_reader_router(io::BufReader::new(io::stdin()))
}

fn route_lines<R: BufRead>(reader: R, face_tx: &Sender<FaceBatch>, feedback_tx: &Sender<Result<FeedbackSample>>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Input stream read failed: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match decode_line(&line) {
            Ok(InputMessage::Faces { points }) => {
                let batch: FaceBatch = points.iter().map(|p| Face::new(p.x, p.y, p.z)).collect();
                if face_tx.send(batch).is_err() {
                    break;
                }
            }
            Ok(InputMessage::Joints { position, velocity }) => {
                let sample = FeedbackSample::from_joints(&position, &velocity);
                if feedback_tx.send(sample).is_err() {
                    break;
                }
            }
            Err(e) => warn!("Skipping undecodable input line: {e}"),
        }
    }
}
