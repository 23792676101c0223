//! One-shot rangefinder discovery
//!
//! Not part of the real-time path: runs once at start-up to locate the
//! device by its USB vendor id when no port is configured explicitly.

use crate::error::{Error, Result};
use serialport::SerialPortType;

/// Hokuyo USB vendor id
pub const URG_VENDOR_ID: u16 = 0x15D1;

/// Scan serial ports for the rangefinder and return its port name
pub fn find_scanner_port() -> Result<String> {
    let ports = serialport::available_ports()?;

    for port in ports {
        if let SerialPortType::UsbPort(usb) = &port.port_type {
            log::debug!(
                "serial port {}: vid {:#06x} pid {:#06x}",
                port.port_name,
                usb.vid,
                usb.pid
            );
            if usb.vid == URG_VENDOR_ID {
                log::info!("Found rangefinder on {}", port.port_name);
                return Ok(port.port_name);
            }
        }
    }

    Err(Error::DeviceUnavailable(
        "no rangefinder on any serial port".into(),
    ))
}
