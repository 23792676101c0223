//! Hokuyo URG rangefinder driver
//!
//! Drives a URG-series device over any byte transport using the SCIP 2.0
//! protocol: BM/PP handshake on connect, one GD request per frame, QT on
//! disconnect.

use super::scip::{self, ScannerInfo};
use super::Scanner;
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::ScanFrame;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// URG rangefinder speaking SCIP 2.0 over a transport
pub struct UrgScanner {
    transport: Box<dyn Transport>,
    pending: VecDeque<u8>,
    info: ScannerInfo,
    frame_timeout: Duration,
}

impl UrgScanner {
    /// Connect to the device: switch the laser on and read its parameters.
    ///
    /// Any handshake failure is a start-up failure and is reported as
    /// `DeviceUnavailable`; the polling loop is never entered.
    pub fn connect<T: Transport + 'static>(transport: T, frame_timeout: Duration) -> Result<Self> {
        let mut scanner = UrgScanner {
            transport: Box::new(transport),
            pending: VecDeque::new(),
            info: ScannerInfo::default(),
            frame_timeout,
        };

        scanner
            .handshake()
            .map_err(|e| Error::DeviceUnavailable(format!("handshake failed: {}", e)))?;

        log::info!(
            "URG connected: {} ({} steps/rev, steps {}..{}, {}-{}mm)",
            scanner.info.model,
            scanner.info.steps_per_rev,
            scanner.info.first_step,
            scanner.info.last_step,
            scanner.info.min_distance_mm,
            scanner.info.max_distance_mm,
        );

        Ok(scanner)
    }

    fn handshake(&mut self) -> Result<()> {
        let deadline = Instant::now() + self.frame_timeout;

        self.send(scip::CMD_LASER_ON)?;
        let reply = self.read_reply(deadline)?;
        let status = Self::reply_status(&reply, "BM")?;
        if status != scip::STATUS_OK && status != scip::STATUS_ALREADY_ON {
            return Err(Error::InvalidResponse(format!("BM status {}", status)));
        }

        self.send(scip::CMD_PARAMS)?;
        let reply = self.read_reply(deadline)?;
        let status = Self::reply_status(&reply, "PP")?;
        if status != scip::STATUS_OK {
            return Err(Error::InvalidResponse(format!("PP status {}", status)));
        }
        let payloads = reply[2..]
            .iter()
            .map(|line| scip::decode_line(line))
            .collect::<Result<Vec<_>>>()?;
        self.info = scip::parse_pp(&payloads)?;

        Ok(())
    }

    /// Echo check plus checksum-verified status payload of a reply block
    fn reply_status<'r>(reply: &'r [String], cmd: &str) -> Result<&'r str> {
        if reply.len() < 2 {
            return Err(Error::InvalidResponse(format!(
                "truncated {} reply ({} lines)",
                cmd,
                reply.len()
            )));
        }
        if !reply[0].starts_with(cmd) {
            return Err(Error::InvalidResponse(format!(
                "unexpected echo for {}: {}",
                cmd, reply[0]
            )));
        }
        scip::decode_line(&reply[1])
    }

    fn send(&mut self, cmd: &str) -> Result<()> {
        self.transport.write(cmd.as_bytes())?;
        self.transport.flush()
    }

    /// Read reply lines until the empty line closing the block
    fn read_reply(&mut self, deadline: Instant) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line(deadline)?;
            if line.is_empty() {
                // Stray blank between blocks; a block never starts empty
                if lines.is_empty() {
                    continue;
                }
                return Ok(lines);
            }
            lines.push(line);
        }
    }

    fn read_line(&mut self, deadline: Instant) -> Result<String> {
        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.pending.drain(..pos).collect();
                let _ = self.pending.pop_front();
                return String::from_utf8(line)
                    .map_err(|_| Error::InvalidResponse("non-UTF8 reply line".into()));
            }

            let mut buf = [0u8; 256];
            let n = self.transport.read(&mut buf)?;
            if n == 0 {
                if Instant::now() >= deadline {
                    return Err(Error::Timeout);
                }
                std::thread::sleep(Duration::from_millis(1));
            } else {
                self.pending.extend(&buf[..n]);
            }
        }
    }
}

impl Scanner for UrgScanner {
    fn info(&self) -> &ScannerInfo {
        &self.info
    }

    fn get_frame(&mut self) -> Result<ScanFrame> {
        let deadline = Instant::now() + self.frame_timeout;

        let cmd = scip::encode_gd(self.info.first_step, self.info.last_step, 0);
        self.send(&cmd)?;

        let reply = self.read_reply(deadline)?;
        let status = Self::reply_status(&reply, "GD")?;
        if status != scip::STATUS_OK {
            return Err(Error::InvalidResponse(format!("GD status {}", status)));
        }
        if reply.len() < 3 {
            return Err(Error::InvalidResponse("GD reply missing timestamp".into()));
        }

        let timestamp = scip::decode_timestamp(scip::decode_line(&reply[2])?)?;

        let mut data = String::new();
        for line in &reply[3..] {
            data.push_str(scip::decode_line(line)?);
        }
        let distances = scip::decode_distances(&data)?;

        let mut frame = ScanFrame::new(distances);
        frame.timestamp_ms = Some(u64::from(timestamp));
        Ok(frame)
    }

    fn disconnect(&mut self) -> Result<()> {
        self.send(scip::CMD_LASER_OFF)?;
        // Reply is best-effort; the device may already be gone
        let deadline = Instant::now() + Duration::from_millis(100);
        match self.read_reply(deadline) {
            Ok(_) | Err(Error::Timeout) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
