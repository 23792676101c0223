//! Mock scanner for hardware-free testing

use super::scip::ScannerInfo;
use super::Scanner;
use crate::error::{Error, Result};
use crate::types::ScanFrame;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock scanner with frame injection
#[derive(Clone)]
pub struct MockScanner {
    state: Arc<Mutex<MockScannerState>>,
    info: ScannerInfo,
}

struct MockScannerState {
    frames: VecDeque<ScanFrame>,
    disconnected: bool,
}

impl MockScanner {
    /// Create a mock presenting URG-04LX-like parameters
    pub fn new() -> Self {
        Self::with_info(ScannerInfo {
            model: "MOCK".to_string(),
            min_distance_mm: 20,
            max_distance_mm: 5600,
            steps_per_rev: 1024,
            first_step: 44,
            last_step: 725,
            front_step: 384,
        })
    }

    /// Create a mock with explicit device parameters
    pub fn with_info(info: ScannerInfo) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockScannerState {
                frames: VecDeque::new(),
                disconnected: false,
            })),
            info,
        }
    }

    /// Queue a frame for a later `get_frame` call
    pub fn inject_frame(&self, frame: ScanFrame) {
        let mut state = self.state.lock().unwrap();
        state.frames.push_back(frame);
    }

    /// Whether `disconnect` has been called
    pub fn is_disconnected(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.disconnected
    }
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner for MockScanner {
    fn info(&self) -> &ScannerInfo {
        &self.info
    }

    fn get_frame(&mut self) -> Result<ScanFrame> {
        let mut state = self.state.lock().unwrap();
        state.frames.pop_front().ok_or(Error::Timeout)
    }

    fn disconnect(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.disconnected = true;
        Ok(())
    }
}
