//! Face detection entities and nearest-face selection.

/// A detected face as a 3D point in the camera frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// X coordinate (meters, camera frame)
    pub x: f64,
    /// Y coordinate (meters, camera frame)
    pub y: f64,
    /// Z coordinate (meters, camera frame, along the boresight)
    pub z: f64,
    /// Euclidean distance from the camera origin
    pub dist: f64,
    /// Reserved for matching faces across batches; always 0 for now
    pub id: u32,
}

impl Face {
    /// Create a face from its camera-frame position
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            dist: (x * x + y * y + z * z).sqrt(),
            id: 0,
        }
    }

    /// Horizontal bearing from the boresight to this face (radians)
    #[must_use]
    pub fn pan_bearing(&self) -> f64 {
        self.x.atan2(self.z)
    }

    /// Vertical bearing from the boresight to this face (radians)
    ///
    /// Positive tilt raises the head; camera-frame y points down, hence the
    /// sign flip.
    #[must_use]
    pub fn tilt_bearing(&self) -> f64 {
        -self.y.atan2(self.x.hypot(self.z))
    }
}

/// One batch of detections, possibly empty
pub type FaceBatch = Vec<Face>;

/// Select the face closest to the camera
///
/// Returns `None` for an empty batch. Ties resolve to the earliest index;
/// the scan is a strict-less-than comparison so the first minimum wins.
#[must_use]
pub fn nearest_face(batch: &[Face]) -> Option<&Face> {
    let mut nearest: Option<&Face> = None;
    for face in batch {
        if nearest.map_or(true, |best| face.dist < best.dist) {
            nearest = Some(face);
        }
    }
    nearest
}
