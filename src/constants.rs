//! Default controller parameters.
//!
//! Angles are degrees here and in the configuration file; they are converted
//! to radians once at controller construction.

/// Largest pan bearing accepted from the camera view (degrees)
pub const DEFAULT_MAX_PAN_VIEW_DEG: f64 = 30.0;

/// Largest tilt bearing accepted from the camera view (degrees)
pub const DEFAULT_MAX_TILT_VIEW_DEG: f64 = 20.0;

/// Pan velocity limit (degrees per second)
pub const DEFAULT_PAN_VEL_LIMIT_DEG: f64 = 30.0;

/// Tilt velocity limit (degrees per second)
pub const DEFAULT_TILT_VEL_LIMIT_DEG: f64 = 20.0;

/// Bearing band around center within which no command is sent (degrees)
pub const DEFAULT_POSE_DEADZONE_DEG: f64 = 5.0;

/// Upper bound on the integration step after long silences (seconds)
pub const DEFAULT_MAX_DT_LAG_SECS: f64 = 0.5;

/// Idle time after the last tracked face before searching starts (seconds)
pub const DEFAULT_SEARCH_WAIT_SECS: f64 = 5.0;

/// Pan step per search tick (degrees)
pub const DEFAULT_SEARCH_INCREMENT_DEG: f64 = 3.0;

/// Soft pan bound at which the search sweep reverses (degrees)
pub const DEFAULT_SEARCH_SWEEP_LIMIT_DEG: f64 = 60.0;

/// Search loop rate (Hz)
pub const DEFAULT_SEARCH_RATE_HZ: f64 = 10.0;

/// Pan hard position limit, lower bound (degrees)
pub const DEFAULT_PAN_MIN_DEG: f64 = -90.0;

/// Pan hard position limit, upper bound (degrees)
pub const DEFAULT_PAN_MAX_DEG: f64 = 90.0;

/// Tilt hard position limit, lower bound (degrees)
pub const DEFAULT_TILT_MIN_DEG: f64 = -45.0;

/// Tilt hard position limit, upper bound (degrees)
pub const DEFAULT_TILT_MAX_DEG: f64 = 60.0;
