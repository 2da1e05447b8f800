//! Configuration management for the face tracking controller

use crate::command::JointLimits;
use crate::constants::*;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Controller configuration
///
/// All angles are degrees in the file; controllers convert to radians once
/// at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Face tracking configuration
    pub tracking: TrackingConfig,

    /// Search sweep configuration
    pub search: SearchConfig,

    /// Hard position limits of the pan-tilt head
    pub limits: LimitsConfig,
}

/// Face tracking parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Largest pan bearing accepted from the camera view (degrees)
    pub max_pan_view_deg: f64,

    /// Largest tilt bearing accepted from the camera view (degrees)
    pub max_tilt_view_deg: f64,

    /// Pan velocity limit (degrees per second)
    pub pan_vel_limit_deg: f64,

    /// Tilt velocity limit (degrees per second)
    pub tilt_vel_limit_deg: f64,

    /// Bearing band around center within which no command is sent (degrees)
    pub deadzone_deg: f64,

    /// Upper bound on the integration step after long silences (seconds)
    pub max_dt_lag_secs: f64,
}

/// Search sweep parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Idle time after the last tracked face before searching starts (seconds)
    pub wait_time_secs: f64,

    /// Pan step per search tick (degrees)
    pub increment_deg: f64,

    /// Soft pan bound at which the sweep reverses (degrees)
    pub sweep_limit_deg: f64,

    /// Search loop rate (Hz)
    pub rate_hz: f64,
}

/// Hard position limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Pan lower bound (degrees)
    pub pan_min_deg: f64,

    /// Pan upper bound (degrees)
    pub pan_max_deg: f64,

    /// Tilt lower bound (degrees)
    pub tilt_min_deg: f64,

    /// Tilt upper bound (degrees)
    pub tilt_max_deg: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            search: SearchConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_pan_view_deg: DEFAULT_MAX_PAN_VIEW_DEG,
            max_tilt_view_deg: DEFAULT_MAX_TILT_VIEW_DEG,
            pan_vel_limit_deg: DEFAULT_PAN_VEL_LIMIT_DEG,
            tilt_vel_limit_deg: DEFAULT_TILT_VEL_LIMIT_DEG,
            deadzone_deg: DEFAULT_POSE_DEADZONE_DEG,
            max_dt_lag_secs: DEFAULT_MAX_DT_LAG_SECS,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            wait_time_secs: DEFAULT_SEARCH_WAIT_SECS,
            increment_deg: DEFAULT_SEARCH_INCREMENT_DEG,
            sweep_limit_deg: DEFAULT_SEARCH_SWEEP_LIMIT_DEG,
            rate_hz: DEFAULT_SEARCH_RATE_HZ,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            pan_min_deg: DEFAULT_PAN_MIN_DEG,
            pan_max_deg: DEFAULT_PAN_MAX_DEG,
            tilt_min_deg: DEFAULT_TILT_MIN_DEG,
            tilt_max_deg: DEFAULT_TILT_MAX_DEG,
        }
    }
}

impl LimitsConfig {
    /// Hard limits converted to radians
    pub fn joint_limits(&self) -> JointLimits {
        JointLimits {
            pan_min: self.pan_min_deg.to_radians(),
            pan_max: self.pan_max_deg.to_radians(),
            tilt_min: self.tilt_min_deg.to_radians(),
            tilt_max: self.tilt_max_deg.to_radians(),
        }
    }
}

impl SearchConfig {
    /// Staleness threshold as a duration
    pub fn wait_time(&self) -> Duration {
        Duration::from_secs_f64(self.wait_time_secs)
    }

    /// Tick period derived from the loop rate
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate_hz)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tracking.max_pan_view_deg <= 0.0 || self.tracking.max_tilt_view_deg <= 0.0 {
            return Err(Error::ConfigError(
                "View angle limits must be greater than 0".to_string(),
            ));
        }
        if self.tracking.pan_vel_limit_deg <= 0.0 || self.tracking.tilt_vel_limit_deg <= 0.0 {
            return Err(Error::ConfigError(
                "Velocity limits must be greater than 0".to_string(),
            ));
        }
        if self.tracking.deadzone_deg < 0.0 {
            return Err(Error::ConfigError("Deadzone must not be negative".to_string()));
        }
        if self.tracking.max_dt_lag_secs <= 0.0 {
            return Err(Error::ConfigError("Max dt lag must be greater than 0".to_string()));
        }

        if self.search.wait_time_secs < 0.0 {
            return Err(Error::ConfigError(
                "Search wait time must not be negative".to_string(),
            ));
        }
        if self.search.increment_deg <= 0.0 {
            return Err(Error::ConfigError(
                "Search increment must be greater than 0".to_string(),
            ));
        }
        if self.search.rate_hz <= 0.0 {
            return Err(Error::ConfigError("Search rate must be greater than 0".to_string()));
        }

        if self.limits.pan_min_deg >= self.limits.pan_max_deg {
            return Err(Error::ConfigError(
                "Pan limits must satisfy pan_min < pan_max".to_string(),
            ));
        }
        if self.limits.tilt_min_deg >= self.limits.tilt_max_deg {
            return Err(Error::ConfigError(
                "Tilt limits must satisfy tilt_min < tilt_max".to_string(),
            ));
        }

        // The sweep reverses inside the hard range, never at it
        if self.search.sweep_limit_deg <= 0.0
            || self.search.sweep_limit_deg > self.limits.pan_max_deg
            || -self.search.sweep_limit_deg < self.limits.pan_min_deg
        {
            return Err(Error::ConfigError(
                "Search sweep limit must be positive and within the pan hard limits".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face Tracking Configuration

# Face tracking parameters (angles in degrees)
tracking:
  max_pan_view_deg: 30.0
  max_tilt_view_deg: 20.0
  pan_vel_limit_deg: 30.0
  tilt_vel_limit_deg: 20.0
  deadzone_deg: 5.0
  max_dt_lag_secs: 0.5

# Search sweep parameters
search:
  wait_time_secs: 5.0
  increment_deg: 3.0
  sweep_limit_deg: 60.0
  rate_hz: 10.0

# Hard position limits of the pan-tilt head
limits:
  pan_min_deg: -90.0
  pan_max_deg: 90.0
  tilt_min_deg: -45.0
  tilt_max_deg: 60.0
"#;
