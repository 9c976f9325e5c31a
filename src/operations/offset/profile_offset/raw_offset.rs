use crate::diagnostics::{Phase, Trace};
use crate::error::{GeometryError, Recovery};
use crate::geometry::{ArcSegment, LineSegment, OffsetSegment, Profile, Segment};
use crate::math::arc_2d::{project_to_radius, resolve_midpoint, MidpointRule};
use crate::math::{left_normal, TOLERANCE};

/// Output of the raw offset pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOffset {
    /// One offset segment per input segment, same order.
    pub segments: Vec<OffsetSegment>,
    /// Input indices of arcs whose radius the offset drove to zero or below.
    /// Their entries in `segments` carry the clamped floor radius.
    pub collapsed: Vec<usize>,
}

/// Builds the raw (unjoined) offset of every segment.
///
/// `distance` is the signed offset, positive to the left of travel. Segments
/// that cannot be offset are passed through unchanged and reported.
pub fn build(
    profile: &Profile,
    distance: f64,
    radius_floor: f64,
    trace: &mut Trace,
) -> RawOffset {
    let mut collapsed = Vec::new();
    let segments = profile
        .segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let shifted = match offset_segment(segment, distance, radius_floor) {
                Ok(shifted) => shifted,
                Err(err) => {
                    trace.recover(
                        Phase::Offset,
                        Recovery::DegenerateGeometry {
                            segment: i,
                            reason: err.to_string(),
                        },
                    );
                    *segment
                }
            };
            if let (Segment::Arc(before), Segment::Arc(after)) = (segment, &shifted) {
                trace.note(
                    Phase::Offset,
                    format!(
                        "segment {i}: arc radius {:.4} -> {:.4}",
                        before.radius(),
                        after.radius()
                    ),
                );
                if collapses(before, distance) {
                    trace.note(Phase::Offset, format!("segment {i}: arc collapsed"));
                    collapsed.push(i);
                }
            }
            OffsetSegment::from_source(i, shifted)
        })
        .collect();
    RawOffset {
        segments,
        collapsed,
    }
}

/// Whether offsetting `arc` by `distance` leaves no positive radius.
#[must_use]
pub fn collapses(arc: &ArcSegment, distance: f64) -> bool {
    arc.radius() >= TOLERANCE && offset_radius(arc, distance) <= TOLERANCE
}

/// Radius of `arc` after an offset of `distance` to the left of travel.
///
/// `Left` lies to the right of travel in the lathe view, which is away from
/// the center of a counter-clockwise arc and toward the center of a
/// clockwise one.
fn offset_radius(arc: &ArcSegment, distance: f64) -> f64 {
    let delta = if arc.clockwise { -distance } else { distance };
    arc.radius() + delta
}

/// Offsets one segment by `distance` to the left of its travel direction.
///
/// Lines shift along their left normal. Arcs keep their center and change
/// radius; a radius driven to zero or below is clamped to `radius_floor`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] for a zero-length line and
/// [`GeometryError::Degenerate`] for an arc whose start lies on its center.
pub fn offset_segment(
    segment: &Segment,
    distance: f64,
    radius_floor: f64,
) -> Result<Segment, GeometryError> {
    match segment {
        Segment::Line(line) => {
            let shift = left_normal(line.direction()?) * distance;
            Ok(Segment::Line(LineSegment::new(
                line.p1 + shift,
                line.p2 + shift,
            )))
        }
        Segment::Arc(arc) => offset_arc(arc, distance, radius_floor).map(Segment::Arc),
    }
}

fn offset_arc(
    arc: &ArcSegment,
    distance: f64,
    radius_floor: f64,
) -> Result<ArcSegment, GeometryError> {
    let base = arc.radius();
    if base < TOLERANCE {
        return Err(GeometryError::Degenerate("arc start lies on its center"));
    }

    let mut radius = offset_radius(arc, distance);
    if radius <= TOLERANCE {
        radius = radius_floor;
    }

    let degenerate = || GeometryError::Degenerate("arc endpoint lies on its center");
    let p1 = project_to_radius(&arc.center, radius, &arc.p1).ok_or_else(degenerate)?;
    let p2 = project_to_radius(&arc.center, radius, &arc.p2).ok_or_else(degenerate)?;
    let hint = project_to_radius(&arc.center, radius, &arc.pm).unwrap_or(arc.pm);

    let mid = resolve_midpoint(
        &arc.center,
        radius,
        &p1,
        &p2,
        arc.clockwise,
        MidpointRule::Hint(hint),
    );
    Ok(ArcSegment::new(p1, mid.point, p2, arc.center, mid.clockwise))
}
