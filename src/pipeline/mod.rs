//! Per-frame signal pipeline
//!
//! One cycle runs window projection, centroid estimation, temporal
//! smoothing, and calibration mapping in sequence:
//!
//! ```text
//! ScanFrame -> projector -> centroid -> smoother -> mapper -> ScreenPoint
//! ```
//!
//! Every stage is pure except the smoother, which owns the rolling epoch
//! buffer. Calibration is passed in as this cycle's snapshot.

pub mod centroid;
pub mod mapper;
pub mod projector;
pub mod smoother;

pub use projector::ScanWindow;
pub use smoother::{SmootherOutput, TemporalSmoother};

use crate::calibration::Calibration;
use crate::error::Result;
use crate::types::{ScanFrame, ScreenGeometry, ScreenPoint};

/// Outcome of one pipeline cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Smoothing epoch still filling; nothing to actuate
    Pending,
    /// Epoch flushed without any detection; an expected, skippable outcome
    NoDetection,
    /// Final screen position for the completed epoch
    Position(ScreenPoint),
}

/// The per-frame pipeline with its smoothing state
#[derive(Debug)]
pub struct PointerPipeline {
    window: ScanWindow,
    screen: ScreenGeometry,
    smoother: TemporalSmoother,
}

impl PointerPipeline {
    /// Create a pipeline for a fixed window and display geometry
    pub fn new(window: ScanWindow, screen: ScreenGeometry) -> Self {
        Self {
            window,
            screen,
            smoother: TemporalSmoother::new(),
        }
    }

    /// Run one frame through the full pipeline with this cycle's
    /// calibration snapshot
    pub fn process(&mut self, frame: &ScanFrame, calibration: &Calibration) -> Result<CycleOutcome> {
        let points = projector::project(frame, self.window, calibration.region)?;
        let centroid = centroid::centroid(points);

        match self.smoother.push(centroid, calibration.buffer_count) {
            SmootherOutput::Pending => Ok(CycleOutcome::Pending),
            SmootherOutput::Flush(None) => Ok(CycleOutcome::NoDetection),
            SmootherOutput::Flush(Some(position)) => Ok(CycleOutcome::Position(
                mapper::map_to_screen(position, calibration, self.screen),
            )),
        }
    }

    /// Clear smoothing state (run restart)
    pub fn reset(&mut self) {
        self.smoother.reset();
    }
}
