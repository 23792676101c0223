//! Temporal smoothing over a run of centroids
//!
//! The smoother decouples flush cadence from detection quality: its cycle
//! counter advances on every push, hit or miss, and an epoch flushes once
//! the configured number of cycles has elapsed. The flushed position
//! averages only the valid hits collected in the epoch; an epoch with no
//! hits flushes an explicit no-detection result instead of a stale or
//! zero-filled position.

use crate::types::SensorPoint;

/// Result of pushing one cycle's centroid into the smoother
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmootherOutput {
    /// Epoch still filling; the pipeline skips mapping this cycle
    Pending,
    /// Epoch complete: averaged position, or `None` when no cycle in the
    /// epoch produced a detection
    Flush(Option<SensorPoint>),
}

/// Rolling accumulator owned by the polling worker
#[derive(Debug, Clone, Default)]
pub struct TemporalSmoother {
    cycles: usize,
    hits: usize,
    sum_x: f32,
    sum_y: f32,
}

impl TemporalSmoother {
    /// Create an empty smoother
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one cycle's centroid.
    ///
    /// `window` is the configured buffer count, re-read from calibration
    /// each cycle; a window shrunk below the cycles already accumulated
    /// flushes immediately. Windows below 1 are treated as 1.
    pub fn push(&mut self, sample: Option<SensorPoint>, window: usize) -> SmootherOutput {
        self.cycles += 1;
        if let Some(p) = sample {
            self.hits += 1;
            self.sum_x += p.x;
            self.sum_y += p.y;
        }

        if self.cycles < window.max(1) {
            return SmootherOutput::Pending;
        }

        let position = if self.hits > 0 {
            Some(SensorPoint::new(
                self.sum_x / self.hits as f32,
                self.sum_y / self.hits as f32,
            ))
        } else {
            None
        };
        self.reset();
        SmootherOutput::Flush(position)
    }

    /// Clear accumulated state (pipeline restart)
    pub fn reset(&mut self) {
        self.cycles = 0;
        self.hits = 0;
        self.sum_x = 0.0;
        self.sum_y = 0.0;
    }
}
