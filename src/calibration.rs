//! Shared calibration state
//!
//! Calibration is owned by a control surface (UI, RPC, test harness) and
//! mutated asynchronously while the polling loop runs. The loop never reads
//! fields individually: it takes one cloned snapshot per cycle through
//! `CalibrationHandle`, so a concurrent update can never tear a cycle's
//! view of the region or anchors. Mutators validate before publishing;
//! a rejected update leaves the previous snapshot live.

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::types::BoundingRegion;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Pixel offset correction tied to a radial-distance band
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationAnchor {
    /// Horizontal correction in pixels
    pub offset_x: f32,
    /// Vertical correction in pixels
    pub offset_y: f32,
}

impl CalibrationAnchor {
    /// Create a new anchor
    pub fn new(offset_x: f32, offset_y: f32) -> Self {
        Self { offset_x, offset_y }
    }
}

/// Near/mid/far anchors for piecewise radial offset interpolation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorBank {
    /// Correction at the scanner origin
    pub near: CalibrationAnchor,
    /// Correction at half the region diagonal
    pub mid: CalibrationAnchor,
    /// Correction at the full region diagonal
    pub far: CalibrationAnchor,
}

impl AnchorBank {
    /// Create a bank from three anchors
    pub fn new(near: CalibrationAnchor, mid: CalibrationAnchor, far: CalibrationAnchor) -> Self {
        Self { near, mid, far }
    }

    /// Single-anchor operation: the same correction at every distance
    pub fn uniform(anchor: CalibrationAnchor) -> Self {
        Self::new(anchor, anchor, anchor)
    }
}

impl Default for AnchorBank {
    fn default() -> Self {
        Self::uniform(CalibrationAnchor::default())
    }
}

/// Calibration snapshot read once per pipeline cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    /// Active capture rectangle
    pub region: BoundingRegion,
    /// Radial offset anchors
    pub anchors: AnchorBank,
    /// Smoothing buffer count (cycles per flush epoch)
    pub buffer_count: usize,
    /// Emit press+release after each cursor move
    pub auto_click: bool,
}

impl Calibration {
    /// Build the initial calibration from the application config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let near = config.calibration.near;
        let calibration = Self {
            region: config.region,
            anchors: AnchorBank::new(
                near,
                config.calibration.mid.unwrap_or(near),
                config.calibration.far.unwrap_or(near),
            ),
            buffer_count: config.smoothing.buffer_count,
            auto_click: config.pointer.auto_click,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Reject values the pipeline cannot run on
    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        if self.buffer_count == 0 {
            return Err(Error::InvalidConfig(
                "smoothing buffer count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Shared calibration handle: control surface writes, pipeline snapshots
#[derive(Clone)]
pub struct CalibrationHandle {
    inner: Arc<RwLock<Calibration>>,
}

impl CalibrationHandle {
    /// Wrap a validated calibration for sharing
    pub fn new(calibration: Calibration) -> Result<Self> {
        calibration.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(calibration)),
        })
    }

    /// Consistent copy of the current calibration
    pub fn snapshot(&self) -> Calibration {
        self.inner.read().clone()
    }

    /// Replace the capture region; degenerate regions are rejected
    pub fn set_region(&self, region: BoundingRegion) -> Result<()> {
        region.validate()?;
        self.inner.write().region = region;
        Ok(())
    }

    /// Replace the offset anchors
    pub fn set_anchors(&self, anchors: AnchorBank) {
        self.inner.write().anchors = anchors;
    }

    /// Replace the smoothing buffer count; zero is rejected
    pub fn set_buffer_count(&self, buffer_count: usize) -> Result<()> {
        if buffer_count == 0 {
            return Err(Error::InvalidConfig(
                "smoothing buffer count must be at least 1".into(),
            ));
        }
        self.inner.write().buffer_count = buffer_count;
        Ok(())
    }

    /// Toggle auto-click emission
    pub fn set_auto_click(&self, enabled: bool) {
        self.inner.write().auto_click = enabled;
    }
}
