//! Raw scan frame type

/// One raw distance sweep from the rangefinder, one reading per angular step.
///
/// Distances are millimeters. Produced once per polling cycle, consumed by
/// the projection stage, then discarded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanFrame {
    /// Distance readings in millimeters, ordered by angular step
    pub distances: Vec<u32>,
    /// Device timestamp in milliseconds (if reported)
    pub timestamp_ms: Option<u64>,
}

impl ScanFrame {
    /// Create a frame from raw distance readings
    pub fn new(distances: Vec<u32>) -> Self {
        Self {
            distances,
            timestamp_ms: None,
        }
    }

    /// Number of readings in the frame
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if the frame carries no readings
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
