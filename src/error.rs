//! Error types for SparshIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// SparshIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rangefinder not found or connect failed; fatal to starting a run
    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Communication timeout; treated as a missed frame mid-run
    #[error("Communication timeout")]
    Timeout,

    /// Malformed or unexpected protocol reply
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Checksum mismatch in a protocol reply line
    #[error("Checksum error: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumError {
        /// Expected checksum value
        expected: u8,
        /// Actual checksum value
        actual: u8,
    },

    /// Frame too short for the configured scan window
    #[error("Malformed frame: {got} readings, window needs {needed}")]
    MalformedFrame {
        /// Readings required by the window
        needed: usize,
        /// Readings actually present
        got: usize,
    },

    /// Rejected configuration (degenerate region, zero buffer count)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file write error
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
