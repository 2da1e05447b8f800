//! Back-and-forth pan sweep for when tracking input has gone stale.

use crate::command::{HeadCommand, JointLimits};
use crate::config::Config;
use std::time::Duration;

/// Sweeps the pan axis between soft bounds while no face is tracked
///
/// The signed increment is controller-local persistent state: its sign flips
/// when the sweep reaches a soft bound and survives across ticks, producing
/// a bounce rather than a reset to the opposite limit.
pub struct SearchController {
    increment: f64,
    sweep_limit: f64,
    pan_vel_limit: f64,
    limits: JointLimits,
    wait_time: Duration,
    period: Duration,
}

impl SearchController {
    /// Create a controller from a validated configuration
    ///
    /// The sweep starts in the positive pan direction.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            increment: config.search.increment_deg.to_radians(),
            sweep_limit: config.search.sweep_limit_deg.to_radians(),
            pan_vel_limit: config.tracking.pan_vel_limit_deg.to_radians(),
            limits: config.limits.joint_limits(),
            wait_time: config.search.wait_time(),
            period: config.search.period(),
        }
    }

    /// Idle time after which tracking counts as stale
    #[must_use]
    pub fn wait_time(&self) -> Duration {
        self.wait_time
    }

    /// Tick period of the search loop
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advance the sweep by one tick
    ///
    /// The caller must hold the command lock for the whole call and decides
    /// beforehand whether tracking is stale enough to search at all. Always
    /// returns a snapshot to publish.
    pub fn step(&mut self, cmd: &mut HeadCommand) -> HeadCommand {
        if cmd.pan_pos >= self.sweep_limit && self.increment >= 0.0 {
            self.increment = -self.increment;
        }
        if cmd.pan_pos <= -self.sweep_limit && self.increment <= 0.0 {
            self.increment = -self.increment;
        }

        cmd.pan_pos += self.increment;
        // Re-center tilt while scanning for faces
        cmd.tilt_pos = 0.0;
        self.limits.clamp(cmd);
        cmd.pan_vel = self.pan_vel_limit;
        cmd.tilt_vel = 0.0;

        *cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SearchController {
        SearchController::new(&Config::default())
    }

    #[test]
    fn test_first_tick_moves_positive() {
        let mut ctrl = controller();
        let mut cmd = HeadCommand::default();
        let published = ctrl.step(&mut cmd);
        assert!((published.pan_pos - 3.0_f64.to_radians()).abs() < 1e-12);
        assert_eq!(published.tilt_pos, 0.0);
        assert_eq!(published.tilt_vel, 0.0);
        assert_eq!(published.pan_vel, 30.0_f64.to_radians());
    }

    #[test]
    fn test_reverses_at_positive_bound() {
        let mut ctrl = controller();
        let mut cmd = HeadCommand {
            pan_pos: 60.0_f64.to_radians(),
            ..HeadCommand::default()
        };
        let published = ctrl.step(&mut cmd);
        // Flip happens before the step, so the head moves back inward
        assert!((published.pan_pos - 57.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_reverses_at_negative_bound() {
        let mut ctrl = controller();
        let mut cmd = HeadCommand {
            pan_pos: (-60.0_f64).to_radians(),
            ..HeadCommand::default()
        };
        // Force the sweep into the negative direction first
        ctrl.increment = -ctrl.increment;
        let published = ctrl.step(&mut cmd);
        assert!((published.pan_pos - (-57.0_f64).to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_no_reversal_when_moving_away_from_bound() {
        let mut ctrl = controller();
        // Already past the positive bound but moving negative: keep going
        ctrl.increment = -ctrl.increment;
        let mut cmd = HeadCommand {
            pan_pos: 61.0_f64.to_radians(),
            ..HeadCommand::default()
        };
        let published = ctrl.step(&mut cmd);
        assert!((published.pan_pos - 58.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_stays_within_soft_bounds() {
        let mut ctrl = controller();
        let mut cmd = HeadCommand::default();
        let ceiling = 63.0_f64.to_radians();
        // Two full sweeps
        for _ in 0..900 {
            let published = ctrl.step(&mut cmd);
            assert!(published.pan_pos.abs() <= ceiling);
            assert_eq!(published.tilt_pos, 0.0);
        }
    }

    #[test]
    fn test_tilt_recentered_every_tick() {
        let mut ctrl = controller();
        let mut cmd = HeadCommand {
            tilt_pos: 0.4,
            tilt_vel: 0.2,
            ..HeadCommand::default()
        };
        let published = ctrl.step(&mut cmd);
        assert_eq!(published.tilt_pos, 0.0);
        assert_eq!(published.tilt_vel, 0.0);
    }
}
