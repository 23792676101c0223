//! Scan-window projection from polar distances to filtered sensor points
//!
//! Pure per-frame stage: selects the angular sub-window of a raw frame,
//! projects each reading into sensor-space millimeters, and keeps only the
//! points inside the capture region.

use crate::error::{Error, Result};
use crate::types::{BoundingRegion, ScanFrame, SensorPoint};
use std::f32::consts::TAU;

/// Angular sub-window of a raw frame considered relevant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanWindow {
    /// Readings skipped at the start of the frame
    pub start_index: usize,
    /// Readings taken after the skip
    pub count: usize,
    /// Arc covered by the window in radians
    pub arc: f32,
}

impl ScanWindow {
    /// Create a window with an explicit arc
    pub fn new(start_index: usize, count: usize, arc: f32) -> Self {
        Self {
            start_index,
            count,
            arc,
        }
    }

    /// Window derived from the device's angular resolution:
    /// `arc = count * (2π / steps_per_rev)`
    pub fn from_resolution(start_index: usize, count: usize, steps_per_rev: u32) -> Self {
        Self::new(
            start_index,
            count,
            count as f32 * (TAU / steps_per_rev as f32),
        )
    }

    /// Angle of the i-th reading inside the window
    pub fn angle_of(&self, i: usize) -> f32 {
        i as f32 * (self.arc / self.count as f32)
    }

    /// One past the last frame index the window touches
    pub fn end_index(&self) -> usize {
        self.start_index + self.count
    }
}

impl Default for ScanWindow {
    /// Skip 84 readings, take 256: the 90° forward arc of a 1024-step device
    fn default() -> Self {
        Self::from_resolution(84, 256, 1024)
    }
}

/// Project the window of a frame into sensor space, keeping only points
/// inside the capture region.
///
/// Returns a lazy, finite iterator; calling again on the same inputs yields
/// the same points. The frame must cover the window.
pub fn project(
    frame: &ScanFrame,
    window: ScanWindow,
    region: BoundingRegion,
) -> Result<impl Iterator<Item = SensorPoint> + '_> {
    if frame.len() < window.end_index() {
        return Err(Error::MalformedFrame {
            needed: window.end_index(),
            got: frame.len(),
        });
    }

    let readings = &frame.distances[window.start_index..window.end_index()];
    Ok(readings
        .iter()
        .enumerate()
        .map(move |(i, &distance)| SensorPoint::from_polar(window.angle_of(i), distance as f32))
        .filter(move |p| region.contains(p)))
}
