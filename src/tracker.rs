//! Orchestration of tracking, searching, and feedback over shared head state.

use crate::command::{FeedbackSample, HeadCommand};
use crate::config::Config;
use crate::face::{nearest_face, FaceBatch};
use crate::io::{Clock, CommandSink};
use crate::search::SearchController;
use crate::tracking::TrackingController;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

/// Owns the shared head state and arbitrates who writes it
///
/// Detection and feedback handlers are invoked by the transport threads;
/// the search sweep runs on its own fixed-rate loop. A single mutex guards
/// the head command, and every multi-field update happens as one critical
/// section. Publishes are issued from snapshots taken inside the critical
/// section, after the lock is released.
pub struct FaceTracker {
    config: Config,
    tracking: TrackingController,
    head_cmd: Mutex<HeadCommand>,
    last_tracking_time: Mutex<Instant>,
    seeded: AtomicBool,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn CommandSink>,
}

impl FaceTracker {
    /// Create a tracker from a validated configuration
    pub fn new(config: Config, clock: Arc<dyn Clock>, sink: Arc<dyn CommandSink>) -> Self {
        let tracking = TrackingController::new(&config);
        let now = clock.now();
        Self {
            config,
            tracking,
            head_cmd: Mutex::new(HeadCommand::default()),
            last_tracking_time: Mutex::new(now),
            seeded: AtomicBool::new(false),
            clock,
            sink,
        }
    }

    /// Whether the first feedback sample has arrived
    pub fn is_seeded(&self) -> bool {
        self.seeded.load(Ordering::SeqCst)
    }

    /// Locked snapshot of the current head command
    pub fn head_command(&self) -> HeadCommand {
        *self.head_cmd.lock().expect("head command lock poisoned")
    }

    /// Handle one face-detection batch
    ///
    /// Selects the nearest face and advances the tracking controller. An
    /// empty or unusable batch takes no controller action and does not count
    /// as fresh tracking input.
    pub fn on_detections(&self, batch: &FaceBatch) {
        if !self.is_seeded() {
            debug!("Ignoring detections before the first joint feedback");
            return;
        }

        let face = match nearest_face(batch) {
            Some(face) => face,
            None => {
                warn!("Detected face batch is empty, not usable for tracking");
                return;
            }
        };
        debug!(
            "Tracking nearest of {} face(s) at {:.2} m",
            batch.len(),
            face.dist
        );

        let now = self.clock.now();
        let elapsed = {
            let mut last = self.last_tracking_time.lock().expect("tracking time lock poisoned");
            let elapsed = now.saturating_duration_since(*last);
            *last = now;
            elapsed
        };

        let published = {
            let mut cmd = self.head_cmd.lock().expect("head command lock poisoned");
            self.tracking.step(face, elapsed, &mut cmd)
        };
        if let Some(snapshot) = published {
            self.sink.publish(snapshot);
        }
    }

    /// Handle one actuator feedback sample
    ///
    /// Overwrites the head state with the measured pose, resynchronizing the
    /// controller's belief with ground truth. The first sample seeds the
    /// tracker and starts the search countdown.
    pub fn on_feedback(&self, sample: FeedbackSample) {
        {
            let mut cmd = self.head_cmd.lock().expect("head command lock poisoned");
            sample.apply(&mut cmd);
        }

        if !self.seeded.swap(true, Ordering::SeqCst) {
            let mut last = self.last_tracking_time.lock().expect("tracking time lock poisoned");
            *last = self.clock.now();
            info!(
                "Head pose seeded from first joint feedback: pan {:.2} deg, tilt {:.2} deg",
                sample.pan_pos.to_degrees(),
                sample.tilt_pos.to_degrees()
            );
        }
    }

    /// Run one search tick
    ///
    /// No-op until seeded and while tracking input is still fresh; otherwise
    /// advances the sweep and publishes.
    pub fn search_tick(&self, search: &mut SearchController) {
        if !self.is_seeded() {
            return;
        }

        let idle = {
            let last = self.last_tracking_time.lock().expect("tracking time lock poisoned");
            self.clock.now().saturating_duration_since(*last)
        };
        if idle <= search.wait_time() {
            debug!(
                "Tracking input {:.1} s old, searching starts after {:.1} s",
                idle.as_secs_f64(),
                search.wait_time().as_secs_f64()
            );
            return;
        }

        let snapshot = {
            let mut cmd = self.head_cmd.lock().expect("head command lock poisoned");
            search.step(&mut cmd)
        };
        self.sink.publish(snapshot);
    }

    /// Run the fixed-rate search loop until the shutdown flag is set
    pub fn run_search_loop(&self, shutdown: &AtomicBool) {
        let mut search = SearchController::new(&self.config);
        let period = search.period();
        info!(
            "Search loop running at {:.0} Hz, sweep within ±{:.0} deg",
            1.0 / period.as_secs_f64(),
            self.config.search.sweep_limit_deg
        );

        while !shutdown.load(Ordering::SeqCst) {
            self.search_tick(&mut search);
            thread::sleep(period);
        }
        debug!("Search loop stopped");
    }
}
