//! Scanner abstraction over the rangefinder hardware

mod discovery;
mod mock;
pub mod scip;
mod urg;

pub use discovery::{find_scanner_port, URG_VENDOR_ID};
pub use mock::MockScanner;
pub use scip::ScannerInfo;
pub use urg::UrgScanner;

use crate::error::Result;
use crate::types::ScanFrame;

/// Scanning rangefinder interface
pub trait Scanner: Send {
    /// Device parameters (step range, angular resolution, distance limits)
    fn info(&self) -> &ScannerInfo;

    /// Acquire one raw distance sweep.
    ///
    /// May block waiting for hardware I/O, bounded by the driver's frame
    /// deadline; a deadline miss is reported as `Error::Timeout` and treated
    /// by the caller as a skipped cycle.
    fn get_frame(&mut self) -> Result<ScanFrame>;

    /// Stop measurement and release the device
    fn disconnect(&mut self) -> Result<()>;
}
