//! Configuration for the SparshIO daemon
//!
//! Loads configuration from a TOML file. The calibration-related sections
//! seed the shared calibration state; the rest parameterizes hardware
//! access, the scan window and the polling loop.

use crate::calibration::CalibrationAnchor;
use crate::error::{Error, Result};
use crate::types::{BoundingRegion, ScreenGeometry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub hardware: HardwareConfig,
    pub screen: ScreenGeometry,
    pub window: WindowConfig,
    pub region: BoundingRegion,
    pub smoothing: SmoothingConfig,
    pub calibration: CalibrationConfig,
    pub pointer: PointerConfig,
    pub logging: LoggingConfig,
}

/// Hardware configuration (serial link to the rangefinder)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HardwareConfig {
    /// Serial port path, or "auto" to discover the device by USB vendor id
    pub port: String,
    /// Baud rate (115200 for USB-attached URG devices)
    pub baud_rate: u32,
    /// Deadline for one frame acquisition in milliseconds.
    ///
    /// A miss is a skipped cycle, not a fatal error; it also bounds stop
    /// latency, since the stop flag is checked once per cycle.
    pub frame_timeout_ms: u64,
}

/// Angular sub-window of each raw frame
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Readings skipped at the start of the frame
    pub start_index: usize,
    /// Readings taken after the skip
    pub count: usize,
}

/// Temporal smoothing configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SmoothingConfig {
    /// Cycles per flush epoch (at least 1)
    pub buffer_count: usize,
}

/// Offset-correction anchors.
///
/// `mid` and `far` default to `near`, which degenerates the piecewise
/// radial model into a single uniform offset.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CalibrationConfig {
    /// Correction at the scanner origin
    pub near: CalibrationAnchor,
    /// Correction at half the region diagonal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<CalibrationAnchor>,
    /// Correction at the full region diagonal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub far: Option<CalibrationAnchor>,
}

/// Polling loop configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PointerConfig {
    /// Emit press+release after each cursor move
    pub auto_click: bool,
    /// Polling cadence in milliseconds; 0 runs as fast as the scanner
    /// supplies frames
    pub poll_interval_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log output (stdout or stderr)
    pub output: String,
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration for a URG-04LX mounted over a tabletop capture
    /// surface.
    ///
    /// Suitable for testing and development. Production deployments should
    /// use a proper TOML configuration file.
    pub fn urg04lx_defaults() -> Self {
        Self {
            hardware: HardwareConfig {
                port: "auto".to_string(),
                baud_rate: 115_200,
                frame_timeout_ms: 500,
            },
            screen: ScreenGeometry {
                width: 1024,
                height: 768,
            },
            window: WindowConfig {
                // Steps 128..384 of a 1024-step revolution: the 90° forward arc
                start_index: 84,
                count: 256,
            },
            region: BoundingRegion::new(0.0, 410.0, 120.0, 440.0),
            smoothing: SmoothingConfig { buffer_count: 3 },
            calibration: CalibrationConfig {
                near: CalibrationAnchor::default(),
                mid: None,
                far: None,
            },
            pointer: PointerConfig {
                auto_click: false,
                poll_interval_ms: 120,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                output: "stdout".to_string(),
            },
        }
    }

    /// Reject configurations the pipeline cannot run on.
    ///
    /// Called before the polling loop starts, so degenerate values never
    /// reach the mapping arithmetic.
    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        if self.smoothing.buffer_count == 0 {
            return Err(Error::InvalidConfig(
                "smoothing buffer count must be at least 1".into(),
            ));
        }
        if self.window.count == 0 {
            return Err(Error::InvalidConfig(
                "scan window count must be at least 1".into(),
            ));
        }
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "screen dimensions must be positive ({}x{})",
                self.screen.width, self.screen.height
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::urg04lx_defaults()
    }
}
