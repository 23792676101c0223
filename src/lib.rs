//! SparshIO - virtual touch pointer for a 2D scanning rangefinder
//!
//! Turns the raw distance sweeps of a scanning rangefinder mounted over a
//! capture surface into stabilized, calibrated cursor positions:
//!
//! ```text
//! Scanner -> projector -> centroid -> smoother -> mapper -> cursor
//! ```
//!
//! The pipeline stages are pure except the smoother; hardware access and
//! cursor actuation sit behind traits so the whole path runs against mocks.

pub mod app;
pub mod calibration;
pub mod config;
pub mod cursor;
pub mod error;
pub mod pipeline;
pub mod scanner;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use calibration::{Calibration, CalibrationAnchor, CalibrationHandle};
pub use config::AppConfig;
pub use error::{Error, Result};
