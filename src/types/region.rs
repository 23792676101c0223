//! Capture region type

use crate::error::{Error, Result};
use crate::types::SensorPoint;
use serde::{Deserialize, Serialize};

/// The active capture rectangle in sensor-space millimeters.
///
/// Points outside the region are discarded before centroid estimation. The
/// mapping stage divides by the region dimensions, so both must be strictly
/// positive; `validate` enforces this before a run is allowed to start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    /// Left edge in millimeters
    pub min_x: f32,
    /// Right edge in millimeters
    pub max_x: f32,
    /// Near edge in millimeters
    pub min_y: f32,
    /// Far edge in millimeters
    pub max_y: f32,
}

impl BoundingRegion {
    /// Create a new capture region
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Region width in millimeters
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Region height in millimeters
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Diagonal length in millimeters
    pub fn diagonal(&self) -> f32 {
        self.width().hypot(self.height())
    }

    /// Check whether a point lies inside the region (inclusive bounds)
    pub fn contains(&self, p: &SensorPoint) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Reject degenerate regions before they reach the mapping arithmetic
    pub fn validate(&self) -> Result<()> {
        if self.width() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "capture region width must be positive (min_x={}, max_x={})",
                self.min_x, self.max_x
            )));
        }
        if self.height() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "capture region height must be positive (min_y={}, max_y={})",
                self.min_y, self.max_y
            )));
        }
        Ok(())
    }
}
