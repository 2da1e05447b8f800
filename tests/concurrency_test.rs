//! Atomicity of the head state under concurrent feedback and search writes.
//!
//! The feedback handler overwrites all four command fields; a search tick
//! rewrites pan and forces tilt to zero. Whatever the interleaving, no
//! published command and no snapshot may ever show a torn mix of the two
//! write patterns.

use face_tracking::command::{FeedbackSample, HeadCommand};
use face_tracking::config::Config;
use face_tracking::io::{Clock, CommandSink};
use face_tracking::search::SearchController;
use face_tracking::tracker::FaceTracker;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

const FEEDBACK_VALUE: f64 = 0.2;
const ROUNDS: usize = 2000;

/// Manually advanced test clock
struct MockClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl MockClock {
    fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    fn advance(&self, d: Duration) {
        *self.offset.lock().unwrap() += d;
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().unwrap()
    }
}

/// Sink recording every published command
#[derive(Default)]
struct RecordingSink {
    published: Mutex<Vec<HeadCommand>>,
}

impl RecordingSink {
    fn commands(&self) -> Vec<HeadCommand> {
        self.published.lock().unwrap().clone()
    }
}

impl CommandSink for RecordingSink {
    fn publish(&self, cmd: HeadCommand) {
        self.published.lock().unwrap().push(cmd);
    }
}

/// A command written entirely by the feedback handler
fn is_feedback_shaped(cmd: &HeadCommand) -> bool {
    cmd.pan_vel == FEEDBACK_VALUE && cmd.tilt_pos == FEEDBACK_VALUE && cmd.tilt_vel == FEEDBACK_VALUE
}

/// A command written entirely by a search step
fn is_search_shaped(cmd: &HeadCommand) -> bool {
    let pan_vel_limit = 30.0_f64.to_radians();
    cmd.tilt_pos == 0.0 && cmd.tilt_vel == 0.0 && (cmd.pan_vel - pan_vel_limit).abs() < 1e-12
}

#[test]
fn test_concurrent_feedback_and_search_never_tear() {
    let clock = Arc::new(MockClock::new());
    let sink = Arc::new(RecordingSink::default());
    let tracker = Arc::new(FaceTracker::new(
        Config::default(),
        clock.clone(),
        sink.clone(),
    ));

    // Seed, then age the tracking input so every tick searches
    tracker.on_feedback(
        FeedbackSample::from_joints(&[FEEDBACK_VALUE, FEEDBACK_VALUE], &[FEEDBACK_VALUE, FEEDBACK_VALUE]).unwrap(),
    );
    clock.advance(Duration::from_secs(10));

    let feedback_tracker = Arc::clone(&tracker);
    let feedback_thread = thread::spawn(move || {
        let sample =
            FeedbackSample::from_joints(&[FEEDBACK_VALUE, FEEDBACK_VALUE], &[FEEDBACK_VALUE, FEEDBACK_VALUE])
                .unwrap();
        for _ in 0..ROUNDS {
            feedback_tracker.on_feedback(sample);
        }
    });

    let search_tracker = Arc::clone(&tracker);
    let search_thread = thread::spawn(move || {
        let mut search = SearchController::new(&Config::default());
        for _ in 0..ROUNDS {
            search_tracker.search_tick(&mut search);
        }
    });

    let reader_tracker = Arc::clone(&tracker);
    let reader_thread = thread::spawn(move || {
        for _ in 0..ROUNDS {
            let cmd = reader_tracker.head_command();
            assert!(
                is_feedback_shaped(&cmd) || is_search_shaped(&cmd),
                "torn head state observed: {cmd:?}"
            );
        }
    });

    feedback_thread.join().unwrap();
    search_thread.join().unwrap();
    reader_thread.join().unwrap();

    // Only search publishes here, and every publish must be whole
    let commands = sink.commands();
    assert_eq!(commands.len(), ROUNDS);
    for cmd in &commands {
        assert!(is_search_shaped(cmd), "torn command published: {cmd:?}");
    }
}
