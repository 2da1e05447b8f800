//! Incremental tracking control toward the nearest face.

use crate::command::{HeadCommand, JointLimits};
use crate::config::Config;
use crate::face::Face;
use log::debug;
use std::time::Duration;

/// Computes rate-limited, clamped, dead-zoned pan-tilt increments
///
/// The bearing angle to the face is treated as a velocity-proportional
/// control signal, not an absolute target: each invocation nudges the
/// commanded pose toward the face by at most the velocity limit times the
/// elapsed time.
pub struct TrackingController {
    max_pan_view: f64,
    max_tilt_view: f64,
    pan_vel_limit: f64,
    tilt_vel_limit: f64,
    deadzone: f64,
    max_dt_lag: f64,
    limits: JointLimits,
}

impl TrackingController {
    /// Create a controller from a validated configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let t = &config.tracking;
        Self {
            max_pan_view: t.max_pan_view_deg.to_radians(),
            max_tilt_view: t.max_tilt_view_deg.to_radians(),
            pan_vel_limit: t.pan_vel_limit_deg.to_radians(),
            tilt_vel_limit: t.tilt_vel_limit_deg.to_radians(),
            deadzone: t.deadzone_deg.to_radians(),
            max_dt_lag: t.max_dt_lag_secs,
            limits: config.limits.joint_limits(),
        }
    }

    /// Advance the command toward the face
    ///
    /// `elapsed` is the wall time since the previous tracking dispatch; the
    /// integration step is bounded by `max_dt_lag` so a long silence cannot
    /// produce a runaway jump. The caller must hold the command lock for the
    /// whole call. Returns the snapshot to publish, or `None` when both
    /// bearings sit inside the dead-zone.
    pub fn step(&self, face: &Face, elapsed: Duration, cmd: &mut HeadCommand) -> Option<HeadCommand> {
        let dt = elapsed.as_secs_f64().min(self.max_dt_lag);

        let pan_angle = face.pan_bearing().clamp(-self.max_pan_view, self.max_pan_view);
        let tilt_angle = face.tilt_bearing().clamp(-self.max_tilt_view, self.max_tilt_view);
        debug!(
            "Camera view bearing [pan tilt] = [{:.2}, {:.2}] deg",
            pan_angle.to_degrees(),
            tilt_angle.to_degrees()
        );

        // Near-centered face: sending a command would only produce chatter
        if pan_angle.abs() <= self.deadzone && tilt_angle.abs() <= self.deadzone {
            return None;
        }

        let pan_increment = pan_angle.clamp(-self.pan_vel_limit, self.pan_vel_limit) * dt;
        let tilt_increment = tilt_angle.clamp(-self.tilt_vel_limit, self.tilt_vel_limit) * dt;
        debug!(
            "Increment over dt {:.3} s [pan tilt] = [{:.2}, {:.2}] deg",
            dt,
            pan_increment.to_degrees(),
            tilt_increment.to_degrees()
        );

        cmd.pan_pos += pan_increment;
        cmd.tilt_pos += tilt_increment;
        self.limits.clamp(cmd);
        cmd.pan_vel = self.pan_vel_limit;
        cmd.tilt_vel = self.tilt_vel_limit;

        Some(*cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::Face;

    fn controller() -> TrackingController {
        TrackingController::new(&Config::default())
    }

    #[test]
    fn test_deadzone_suppresses_publish() {
        let ctrl = controller();
        let mut cmd = HeadCommand::default();
        // Bearings well under 5 degrees
        let face = Face::new(0.01, 0.01, 5.0);
        let published = ctrl.step(&face, Duration::from_millis(100), &mut cmd);
        assert!(published.is_none());
        assert_eq!(cmd, HeadCommand::default());
    }

    #[test]
    fn test_side_face_clamps_to_view_angle() {
        let ctrl = controller();
        let mut cmd = HeadCommand::default();
        // Directly to the side: raw bearing 90 deg, clamped to 30 deg
        let face = Face::new(5.0, 0.0, 0.0);
        let published = ctrl.step(&face, Duration::from_millis(100), &mut cmd).unwrap();

        let expected = 30.0_f64.to_radians() * 0.1;
        assert!((published.pan_pos - expected).abs() < 1e-12);
        assert_eq!(published.tilt_pos, 0.0);
        assert_eq!(published.pan_vel, 30.0_f64.to_radians());
        assert_eq!(published.tilt_vel, 20.0_f64.to_radians());
    }

    #[test]
    fn test_dt_clamped_to_max_lag() {
        let ctrl = controller();
        let mut cmd = HeadCommand::default();
        let face = Face::new(5.0, 0.0, 0.0);
        // Ten seconds of silence integrates as only max_dt_lag
        let published = ctrl.step(&face, Duration::from_secs(10), &mut cmd).unwrap();

        let expected = 30.0_f64.to_radians() * 0.5;
        assert!((published.pan_pos - expected).abs() < 1e-12);
    }

    #[test]
    fn test_positions_never_exceed_hard_limits() {
        let ctrl = controller();
        let mut cmd = HeadCommand {
            pan_pos: 89.9_f64.to_radians(),
            pan_vel: 0.0,
            tilt_pos: 59.9_f64.to_radians(),
            tilt_vel: 0.0,
        };
        let face = Face::new(5.0, -5.0, 0.1);
        let published = ctrl.step(&face, Duration::from_millis(500), &mut cmd).unwrap();

        assert!(published.pan_pos <= 90.0_f64.to_radians());
        assert!(published.tilt_pos <= 60.0_f64.to_radians());
    }

    #[test]
    fn test_one_axis_outside_deadzone_publishes() {
        let ctrl = controller();
        let mut cmd = HeadCommand::default();
        // Pan bearing ~10 deg, tilt ~0: pan alone must trigger the command
        let face = Face::new(0.9, 0.0, 5.0);
        let published = ctrl.step(&face, Duration::from_millis(100), &mut cmd);
        assert!(published.is_some());
    }

    #[test]
    fn test_negative_bearing_moves_negative() {
        let ctrl = controller();
        let mut cmd = HeadCommand::default();
        let face = Face::new(-2.0, 0.0, 2.0);
        let published = ctrl.step(&face, Duration::from_millis(200), &mut cmd).unwrap();
        assert!(published.pan_pos < 0.0);
    }
}
