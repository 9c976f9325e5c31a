use crate::diagnostics::{Phase, Trace};
use crate::error::Recovery;
use crate::geometry::{ArcSegment, OffsetSegment, Segment};
use crate::math::arc_2d::{angle_in_sweep, polar_angle};

/// Angular margin (radians) excluded at both ends of a sweep.
const CONTAINMENT_TOL: f64 = 1e-9;

/// Sense implied by where the midpoint lies, or `None` when the midpoint is
/// inside both sweeps or neither.
#[must_use]
pub fn implied_sense(arc: &ArcSegment) -> Option<bool> {
    let start = polar_angle(&arc.center, &arc.p1);
    let end = polar_angle(&arc.center, &arc.p2);
    let mid = polar_angle(&arc.center, &arc.pm);
    let in_cw = angle_in_sweep(mid, start, end, true, CONTAINMENT_TOL);
    let in_ccw = angle_in_sweep(mid, start, end, false, CONTAINMENT_TOL);
    match (in_cw, in_ccw) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

/// Re-derives the sense of every arc from its final geometry.
pub fn fix_directions(chain: &[OffsetSegment], trace: &mut Trace) -> Vec<OffsetSegment> {
    chain
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let Segment::Arc(arc) = seg.segment else {
                return *seg;
            };
            match implied_sense(&arc) {
                Some(clockwise) if clockwise != arc.clockwise => {
                    trace.note(
                        Phase::Direction,
                        format!(
                            "segment {i}: sense set to {}",
                            if clockwise { "cw" } else { "ccw" }
                        ),
                    );
                    seg.replaced(Segment::Arc(ArcSegment { clockwise, ..arc }))
                }
                Some(_) => *seg,
                None => {
                    trace.recover(
                        Phase::Direction,
                        Recovery::AmbiguousArcDirection { segment: i },
                    );
                    *seg
                }
            }
        })
        .collect()
}
