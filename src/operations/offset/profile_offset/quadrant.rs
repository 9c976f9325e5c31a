use crate::compensation::Quadrant;
use crate::geometry::OffsetSegment;
use crate::math::Vector2;

/// Unit `(x, z)` shift from the nose center to the programmed point.
///
/// Lathe view, X up and Z right. Quadrant 9 is the nose center itself.
#[must_use]
pub fn unit_shift(quadrant: Quadrant) -> Vector2 {
    let (x, z) = match quadrant.number() {
        1 => (1.0, 1.0),
        2 => (1.0, -1.0),
        3 => (-1.0, -1.0),
        4 => (-1.0, 1.0),
        5 => (0.0, 1.0),
        6 => (1.0, 0.0),
        7 => (0.0, -1.0),
        8 => (-1.0, 0.0),
        _ => (0.0, 0.0),
    };
    Vector2::new(x, z)
}

/// Translates every segment by the quadrant shift scaled by `nose_radius`.
#[must_use]
pub fn shift(chain: &[OffsetSegment], quadrant: Quadrant, nose_radius: f64) -> Vec<OffsetSegment> {
    let delta = unit_shift(quadrant) * nose_radius;
    chain
        .iter()
        .map(|seg| seg.replaced(seg.segment.translated(delta)))
        .collect()
}
