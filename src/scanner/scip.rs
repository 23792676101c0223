//! SCIP 2.0 protocol for Hokuyo URG rangefinders
//!
//! Line-oriented ASCII protocol over a serial link:
//! - A request is one short command line terminated by LF ("GD0044072500").
//! - The reply echoes the request line, then a status line, then payload
//!   lines, closed by one empty line.
//! - Every reply line after the echo ends with a checksum character:
//!   (sum of the preceding bytes & 0x3F) + 0x30.
//! - Distance readings are packed three characters each, six bits per
//!   character, offset by 0x30.

use crate::error::{Error, Result};
use std::f32::consts::TAU;

/// Switch the laser on (required before measurement requests)
pub const CMD_LASER_ON: &str = "BM\n";
/// Switch the laser off and stop measurement
pub const CMD_LASER_OFF: &str = "QT\n";
/// Request device parameters
pub const CMD_PARAMS: &str = "PP\n";

/// Status payload of a successful reply
pub const STATUS_OK: &str = "00";
/// BM status when the laser is already on
pub const STATUS_ALREADY_ON: &str = "02";

/// Device parameters reported by the PP command
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScannerInfo {
    /// Model string (MODL)
    pub model: String,
    /// Minimum measurable distance in millimeters (DMIN)
    pub min_distance_mm: u32,
    /// Maximum measurable distance in millimeters (DMAX)
    pub max_distance_mm: u32,
    /// Angular steps per full revolution (ARES)
    pub steps_per_rev: u32,
    /// First measurable step (AMIN)
    pub first_step: u32,
    /// Last measurable step (AMAX)
    pub last_step: u32,
    /// Step index pointing straight ahead (AFRT)
    pub front_step: u32,
}

impl ScannerInfo {
    /// Angle between consecutive steps in radians
    pub fn angle_increment(&self) -> f32 {
        TAU / self.steps_per_rev as f32
    }

    /// Number of readings in a full-range frame
    pub fn step_count(&self) -> usize {
        (self.last_step - self.first_step) as usize + 1
    }
}

/// Checksum character for a reply-line payload
pub fn checksum(payload: &[u8]) -> u8 {
    let sum: u32 = payload.iter().map(|&b| u32::from(b)).sum();
    (sum & 0x3F) as u8 + 0x30
}

/// Build a GD distance request for the step range `[start, end]`
pub fn encode_gd(start: u32, end: u32, cluster: u32) -> String {
    format!("GD{:04}{:04}{:02}\n", start, end, cluster)
}

/// Verify and strip the trailing checksum character of a reply line
pub fn decode_line(line: &str) -> Result<&str> {
    if line.len() < 2 || !line.is_ascii() {
        return Err(Error::InvalidResponse(format!(
            "short reply line: {:?}",
            line
        )));
    }
    let (payload, check) = line.split_at(line.len() - 1);
    let expected = checksum(payload.as_bytes());
    let actual = check.as_bytes()[0];
    if expected != actual {
        return Err(Error::ChecksumError { expected, actual });
    }
    Ok(payload)
}

/// Decode packed six-bit characters into an integer
fn decode_chars(data: &[u8]) -> Result<u32> {
    let mut value = 0u32;
    for &c in data {
        if !(0x30..=0x6F).contains(&c) {
            return Err(Error::InvalidResponse(format!(
                "encoded byte {:#04x} out of range",
                c
            )));
        }
        value = (value << 6) | u32::from(c - 0x30);
    }
    Ok(value)
}

/// Decode a run of three-character packed readings into millimeters
pub fn decode_distances(data: &str) -> Result<Vec<u32>> {
    let bytes = data.as_bytes();
    if bytes.len() % 3 != 0 {
        return Err(Error::InvalidResponse(format!(
            "distance data length {} is not a multiple of 3",
            bytes.len()
        )));
    }
    bytes.chunks_exact(3).map(decode_chars).collect()
}

/// Decode the four-character timestamp payload (device milliseconds)
pub fn decode_timestamp(data: &str) -> Result<u32> {
    if data.len() != 4 {
        return Err(Error::InvalidResponse(format!(
            "timestamp payload {:?} is not 4 characters",
            data
        )));
    }
    decode_chars(data.as_bytes())
}

/// Parse the checksum-stripped payload lines of a PP reply.
///
/// Each line carries one `KEY:value;` pair. Keys beyond the ones needed to
/// parameterize the pipeline (e.g. SCAN, vendor extensions) are ignored.
pub fn parse_pp(lines: &[&str]) -> Result<ScannerInfo> {
    let mut model = None;
    let mut dmin = None;
    let mut dmax = None;
    let mut ares = None;
    let mut amin = None;
    let mut amax = None;
    let mut afrt = None;

    for line in lines {
        let entry = line.trim_end_matches(';');
        let (key, value) = entry.split_once(':').ok_or_else(|| {
            Error::InvalidResponse(format!("malformed parameter line: {}", line))
        })?;
        match key {
            "MODL" => model = Some(value.to_string()),
            "DMIN" => dmin = Some(parse_u32(key, value)?),
            "DMAX" => dmax = Some(parse_u32(key, value)?),
            "ARES" => ares = Some(parse_u32(key, value)?),
            "AMIN" => amin = Some(parse_u32(key, value)?),
            "AMAX" => amax = Some(parse_u32(key, value)?),
            "AFRT" => afrt = Some(parse_u32(key, value)?),
            _ => {}
        }
    }

    Ok(ScannerInfo {
        model: require("MODL", model)?,
        min_distance_mm: require("DMIN", dmin)?,
        max_distance_mm: require("DMAX", dmax)?,
        steps_per_rev: require("ARES", ares)?,
        first_step: require("AMIN", amin)?,
        last_step: require("AMAX", amax)?,
        front_step: require("AFRT", afrt)?,
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| Error::InvalidResponse(format!("bad {} value: {}", key, value)))
}

fn require<T>(key: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::InvalidResponse(format!("PP reply missing {}", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Append the checksum character to a payload, as the device would
    fn sealed(payload: &str) -> String {
        format!("{}{}", payload, checksum(payload.as_bytes()) as char)
    }

    #[test]
    fn test_checksum_status_line() {
        // '0' + '0' = 0x60, & 0x3F = 0x20, + 0x30 = 'P'
        assert_eq!(checksum(b"00"), b'P');
    }

    #[test]
    fn test_decode_line_roundtrip() {
        assert_eq!(decode_line("00P").unwrap(), "00");
        let line = sealed("AMIN:44;");
        assert_eq!(decode_line(&line).unwrap(), "AMIN:44;");
    }

    #[test]
    fn test_decode_line_rejects_bad_checksum() {
        match decode_line("00Q") {
            Err(Error::ChecksumError { expected, actual }) => {
                assert_eq!(expected, b'P');
                assert_eq!(actual, b'Q');
            }
            other => panic!("expected checksum error, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_gd() {
        assert_eq!(encode_gd(44, 725, 0), "GD0044072500\n");
        assert_eq!(encode_gd(128, 383, 1), "GD0128038301\n");
    }

    #[test]
    fn test_decode_distances() {
        // 1234 = 0b000000_010011_010010 -> '0' 'C' 'B'
        let distances = decode_distances("0CB").unwrap();
        assert_eq!(distances, vec![1234]);

        // Two readings: 0 and 4095 (0b111111_111111 -> '0' 'o' 'o')
        let distances = decode_distances("0000oo").unwrap();
        assert_eq!(distances, vec![0, 4095]);
    }

    #[test]
    fn test_decode_distances_rejects_partial_reading() {
        assert!(decode_distances("0C").is_err());
    }

    #[test]
    fn test_decode_distances_rejects_out_of_range_byte() {
        assert!(decode_distances("0C\x7F").is_err());
    }

    #[test]
    fn test_decode_timestamp() {
        assert_eq!(decode_timestamp("0000").unwrap(), 0);
        // 1 ms: last character carries the low six bits
        assert_eq!(decode_timestamp("0001").unwrap(), 1);
    }

    #[test]
    fn test_parse_pp_urg04lx() {
        let payloads = vec![
            sealed("MODL:URG-04LX-UG01;"),
            sealed("DMIN:20;"),
            sealed("DMAX:5600;"),
            sealed("ARES:1024;"),
            sealed("AMIN:44;"),
            sealed("AMAX:725;"),
            sealed("AFRT:384;"),
            sealed("SCAN:600;"),
        ];
        let stripped: Vec<&str> = payloads
            .iter()
            .map(|l| decode_line(l).unwrap())
            .collect();

        let info = parse_pp(&stripped).unwrap();
        assert_eq!(info.model, "URG-04LX-UG01");
        assert_eq!(info.min_distance_mm, 20);
        assert_eq!(info.max_distance_mm, 5600);
        assert_eq!(info.steps_per_rev, 1024);
        assert_eq!(info.first_step, 44);
        assert_eq!(info.last_step, 725);
        assert_eq!(info.front_step, 384);
        assert_eq!(info.step_count(), 682);
    }

    #[test]
    fn test_parse_pp_missing_key() {
        let stripped = vec!["MODL:URG-04LX;", "DMIN:20;"];
        assert!(parse_pp(&stripped).is_err());
    }

    #[test]
    fn test_angle_increment() {
        let info = ScannerInfo {
            steps_per_rev: 1024,
            ..Default::default()
        };
        let quarter = info.angle_increment() * 256.0;
        assert!((quarter - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
