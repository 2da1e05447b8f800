//! Composition root wiring sources, sink, and the control loops.

use crate::config::Config;
use crate::io::{CommandSink, DetectionSource, FeedbackSource, MonotonicClock};
use crate::tracker::FaceTracker;
use crate::Result;
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Application object owning the tracker and its worker threads
///
/// Replaces any process-global node state: everything is constructed here at
/// startup and handed to the threads that need it.
pub struct App {
    tracker: Arc<FaceTracker>,
    shutdown: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl App {
    /// Validate the configuration and build the tracker
    pub fn new(config: Config, sink: Arc<dyn CommandSink>) -> Result<Self> {
        config.validate()?;
        info!("Initializing face tracking application");

        let tracker = Arc::new(FaceTracker::new(config, Arc::new(MonotonicClock), sink));
        Ok(Self {
            tracker,
            shutdown: Arc::new(AtomicBool::new(false)),
            handles: Vec::new(),
        })
    }

    /// Shared handle to the tracker
    pub fn tracker(&self) -> Arc<FaceTracker> {
        Arc::clone(&self.tracker)
    }

    /// Spawn the fixed-rate search loop
    pub fn start_search(&mut self) {
        let tracker = Arc::clone(&self.tracker);
        let shutdown = Arc::clone(&self.shutdown);
        self.handles.push(thread::spawn(move || {
            tracker.run_search_loop(&shutdown);
        }));
    }

    /// Drive a detection source on its own thread
    ///
    /// The thread ends when the source reports end of stream. Source errors
    /// are logged and the next event is awaited.
    pub fn attach_detections(&mut self, mut source: impl DetectionSource + 'static) {
        let tracker = Arc::clone(&self.tracker);
        self.handles.push(thread::spawn(move || loop {
            match source.recv() {
                Ok(Some(batch)) => tracker.on_detections(&batch),
                Ok(None) => break,
                Err(e) => warn!("Detection source error: {e}"),
            }
        }));
    }

    /// Drive a feedback source on its own thread
    ///
    /// A malformed sample aborts that update only: the violation is logged
    /// and the stream continues.
    pub fn attach_feedback(&mut self, mut source: impl FeedbackSource + 'static) {
        let tracker = Arc::clone(&self.tracker);
        self.handles.push(thread::spawn(move || loop {
            match source.recv() {
                Ok(Some(sample)) => tracker.on_feedback(sample),
                Ok(None) => break,
                Err(e) => error!("Rejected feedback sample: {e}"),
            }
        }));
    }

    /// Stop the search loop and join all worker threads
    ///
    /// Attached sources are expected to have reached end of stream; there is
    /// no cancellation concept beyond this flag and stream closure.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                error!("Worker thread panicked during shutdown");
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
