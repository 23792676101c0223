//! Sensor-space to screen-space calibration mapping
//!
//! Two-part model: a linear scaling of the capture region onto the display
//! (with y inverted, since screen y grows downward), plus a radial offset
//! correction interpolated piecewise across the near/mid/far anchors. The
//! radial distance is measured from the scanner origin to the pre-offset
//! sensor position.

use crate::calibration::{AnchorBank, Calibration};
use crate::types::{ScreenGeometry, ScreenPoint, SensorPoint};

/// Interpolated pixel offset for a radial distance.
///
/// `max_length` is the capture region diagonal. The near anchor applies at
/// the origin, the mid anchor at half the diagonal, the far anchor at the
/// full diagonal; each half interpolates linearly between its endpoints and
/// distances beyond the diagonal extrapolate on the far segment.
pub fn radial_offset(anchors: &AnchorBank, length: f32, max_length: f32) -> (f32, f32) {
    let half = max_length / 2.0;
    if half <= 0.0 {
        return (anchors.near.offset_x, anchors.near.offset_y);
    }

    if length < half {
        let t = length / half;
        (
            anchors.near.offset_x + (anchors.mid.offset_x - anchors.near.offset_x) * t,
            anchors.near.offset_y + (anchors.mid.offset_y - anchors.near.offset_y) * t,
        )
    } else {
        let t = (length - half) / half;
        (
            anchors.mid.offset_x + (anchors.far.offset_x - anchors.mid.offset_x) * t,
            anchors.mid.offset_y + (anchors.far.offset_y - anchors.mid.offset_y) * t,
        )
    }
}

/// Map a smoothed sensor-space position to a screen pixel
pub fn map_to_screen(
    point: SensorPoint,
    calibration: &Calibration,
    screen: ScreenGeometry,
) -> ScreenPoint {
    let region = &calibration.region;
    let dx = screen.width as f32 / region.width();
    let dy = screen.height as f32 / region.height();

    let scaled_x = ((point.x - region.min_x) * dx).abs();
    let scaled_y = screen.height as f32 - ((point.y - region.min_y) * dy).abs();

    let (off_x, off_y) = radial_offset(&calibration.anchors, point.length(), region.diagonal());

    // Round to the nearest pixel; truncation would let sub-ulp scaling
    // error flip exact boundary positions down a pixel
    ScreenPoint {
        x: (scaled_x + off_x).round() as i32,
        y: (scaled_y - off_y).round() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationAnchor;
    use crate::types::BoundingRegion;
    use approx::assert_relative_eq;

    fn screen() -> ScreenGeometry {
        ScreenGeometry {
            width: 1024,
            height: 768,
        }
    }

    fn uniform_calibration() -> Calibration {
        Calibration {
            region: BoundingRegion::new(0.0, 410.0, 120.0, 440.0),
            anchors: AnchorBank::default(),
            buffer_count: 1,
            auto_click: false,
        }
    }

    fn banded_anchors() -> AnchorBank {
        AnchorBank::new(
            CalibrationAnchor::new(10.0, 2.0),
            CalibrationAnchor::new(30.0, -6.0),
            CalibrationAnchor::new(90.0, 14.0),
        )
    }

    #[test]
    fn test_region_center_maps_to_screen_center() {
        let p = map_to_screen(SensorPoint::new(205.0, 280.0), &uniform_calibration(), screen());
        assert_eq!(p, ScreenPoint { x: 512, y: 384 });
    }

    #[test]
    fn test_region_near_edge_maps_to_screen_bottom() {
        // min_y edge scales to zero offset from the bottom of the screen
        let p = map_to_screen(SensorPoint::new(0.0, 120.0), &uniform_calibration(), screen());
        assert_eq!(p, ScreenPoint { x: 0, y: 768 });
    }

    #[test]
    fn test_region_far_edge_maps_to_screen_top() {
        let p = map_to_screen(SensorPoint::new(410.0, 440.0), &uniform_calibration(), screen());
        assert_eq!(p, ScreenPoint { x: 1024, y: 0 });
    }

    #[test]
    fn test_radial_offset_at_origin_is_near_anchor() {
        let anchors = banded_anchors();
        let (x, y) = radial_offset(&anchors, 0.0, 500.0);
        assert_relative_eq!(x, 10.0);
        assert_relative_eq!(y, 2.0);
    }

    #[test]
    fn test_radial_offset_at_half_diagonal_is_mid_anchor() {
        let anchors = banded_anchors();
        let (x, y) = radial_offset(&anchors, 250.0, 500.0);
        assert_relative_eq!(x, 30.0);
        assert_relative_eq!(y, -6.0);
    }

    #[test]
    fn test_radial_offset_at_full_diagonal_is_far_anchor() {
        let anchors = banded_anchors();
        let (x, y) = radial_offset(&anchors, 500.0, 500.0);
        assert_relative_eq!(x, 90.0);
        assert_relative_eq!(y, 14.0);
    }

    #[test]
    fn test_radial_offset_is_continuous_at_the_branch_point() {
        let anchors = banded_anchors();
        let (below_x, below_y) = radial_offset(&anchors, 249.999, 500.0);
        let (at_x, at_y) = radial_offset(&anchors, 250.0, 500.0);
        assert_relative_eq!(below_x, at_x, epsilon = 1e-2);
        assert_relative_eq!(below_y, at_y, epsilon = 1e-2);
    }

    #[test]
    fn test_radial_offset_interpolates_within_bands() {
        let anchors = banded_anchors();
        let (x, _) = radial_offset(&anchors, 125.0, 500.0);
        assert_relative_eq!(x, 20.0, epsilon = 1e-4);
        let (x, _) = radial_offset(&anchors, 375.0, 500.0);
        assert_relative_eq!(x, 60.0, epsilon = 1e-4);
    }

    #[test]
    fn test_uniform_bank_degenerates_to_single_offset() {
        let anchors = AnchorBank::uniform(CalibrationAnchor::new(25.0, -13.0));
        for length in [0.0, 100.0, 250.0, 499.0, 500.0, 700.0] {
            let (x, y) = radial_offset(&anchors, length, 500.0);
            assert_relative_eq!(x, 25.0);
            assert_relative_eq!(y, -13.0);
        }
    }

    #[test]
    fn test_offsets_shift_the_scaled_position() {
        let mut calibration = uniform_calibration();
        calibration.anchors = AnchorBank::uniform(CalibrationAnchor::new(100.0, 50.0));

        let p = map_to_screen(SensorPoint::new(205.0, 280.0), &calibration, screen());
        // x adds its offset, y subtracts (screen y grows downward)
        assert_eq!(p, ScreenPoint { x: 612, y: 334 });
    }
}
