//! Centroid reduction of the filtered point set

use crate::types::SensorPoint;

/// Arithmetic mean of x and y over the points.
///
/// An empty point set is an expected outcome (nothing on the capture
/// surface) and returns `None` explicitly rather than letting a division by
/// zero produce NaN for downstream stages to trip over.
pub fn centroid<I>(points: I) -> Option<SensorPoint>
where
    I: IntoIterator<Item = SensorPoint>,
{
    let mut count = 0u32;
    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;

    for p in points {
        count += 1;
        sum_x += p.x;
        sum_y += p.y;
    }

    if count == 0 {
        return None;
    }
    Some(SensorPoint::new(
        sum_x / count as f32,
        sum_y / count as f32,
    ))
}
