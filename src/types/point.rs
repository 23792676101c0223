//! Sensor-space and screen-space coordinate types

use serde::{Deserialize, Serialize};

/// A point in sensor space (millimeters from the scanner origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorPoint {
    /// Millimeters along the capture surface
    pub x: f32,
    /// Millimeters away from the scanner
    pub y: f32,
}

impl SensorPoint {
    /// Create a new sensor point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Project an `(angle, distance)` reading into Cartesian coordinates
    pub fn from_polar(angle: f32, distance: f32) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self {
            x: cos_a * distance,
            y: sin_a * distance,
        }
    }

    /// Euclidean distance from the scanner origin
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }
}

/// Final pixel coordinate on the target display (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    /// Pixel column
    pub x: i32,
    /// Pixel row
    pub y: i32,
}

/// Target display dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
}
