//! Pan-tilt head command and joint feedback types.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Position and velocity command for both head joints
///
/// This is the single piece of shared mutable state in the controller. It
/// holds the last feedback-reported pose and the next commanded pose in the
/// same fields; the two roles are distinguished only by write order. A
/// feedback overwrite landing between two command writes re-anchors the
/// integration to the measured pose and the next cycle re-converges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadCommand {
    /// Pan position (radians)
    pub pan_pos: f64,
    /// Pan velocity (radians per second)
    pub pan_vel: f64,
    /// Tilt position (radians)
    pub tilt_pos: f64,
    /// Tilt velocity (radians per second)
    pub tilt_vel: f64,
}

/// Hard position limits of the head, in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits {
    /// Pan lower bound
    pub pan_min: f64,
    /// Pan upper bound
    pub pan_max: f64,
    /// Tilt lower bound
    pub tilt_min: f64,
    /// Tilt upper bound
    pub tilt_max: f64,
}

impl JointLimits {
    /// Clamp both positions into the hard range
    pub fn clamp(&self, cmd: &mut HeadCommand) {
        cmd.pan_pos = cmd.pan_pos.clamp(self.pan_min, self.pan_max);
        cmd.tilt_pos = cmd.tilt_pos.clamp(self.tilt_min, self.tilt_max);
    }
}

/// One actuator feedback sample for both head joints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackSample {
    /// Measured pan position (radians)
    pub pan_pos: f64,
    /// Measured pan velocity (radians per second)
    pub pan_vel: f64,
    /// Measured tilt position (radians)
    pub tilt_pos: f64,
    /// Measured tilt velocity (radians per second)
    pub tilt_vel: f64,
}

impl FeedbackSample {
    /// Build a sample from raw joint arrays ordered `[pan, tilt]`
    ///
    /// Wrong arity is a precondition violation: the sample is rejected and
    /// no partial state is produced.
    pub fn from_joints(positions: &[f64], velocities: &[f64]) -> Result<Self> {
        if positions.len() < 2 || velocities.len() < 2 {
            return Err(Error::FeedbackError(format!(
                "expected 2 joint positions and velocities, got {} and {}",
                positions.len(),
                velocities.len()
            )));
        }

        Ok(Self {
            pan_pos: positions[0],
            pan_vel: velocities[0],
            tilt_pos: positions[1],
            tilt_vel: velocities[1],
        })
    }

    /// Overwrite the command with the measured pose
    pub fn apply(&self, cmd: &mut HeadCommand) {
        cmd.pan_pos = self.pan_pos;
        cmd.pan_vel = self.pan_vel;
        cmd.tilt_pos = self.tilt_pos;
        cmd.tilt_vel = self.tilt_vel;
    }
}
