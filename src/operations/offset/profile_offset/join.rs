use super::corners::{CornerClass, CornerEntry};
use crate::diagnostics::{Phase, Trace};
use crate::error::Recovery;
use crate::geometry::{ArcSegment, OffsetSegment, Profile, Segment};
use crate::math::arc_2d::{project_to_radius, resolve_midpoint, MidpointRule};
use crate::math::intersect_2d::{
    circle_circle_intersect_2d, line_circle_intersect_2d, line_line_intersect_2d, nearest_to,
};
use crate::math::{cross, Point2, Vector2};

/// Projections closer than this are treated as one point.
const COINCIDENT: f64 = 1e-9;

/// Tangent cross products below this cannot orient a fillet.
const PARALLEL_CROSS: f64 = 1e-12;

/// Unbounded carrier of an offset segment.
#[derive(Debug, Clone, Copy)]
enum Primitive {
    Line { origin: Point2, dir: Vector2 },
    Circle { center: Point2, radius: f64 },
}

impl Primitive {
    fn of(segment: &Segment) -> Option<Self> {
        match segment {
            Segment::Line(l) => l.direction().ok().map(|dir| Self::Line {
                origin: l.p1,
                dir,
            }),
            Segment::Arc(a) => Some(Self::Circle {
                center: a.center,
                radius: a.radius(),
            }),
        }
    }

    fn intersect(self, other: Self) -> Vec<Point2> {
        match (self, other) {
            (Self::Line { origin: o1, dir: d1 }, Self::Line { origin: o2, dir: d2 }) => {
                line_line_intersect_2d(&o1, &d1, &o2, &d2)
                    .map(|(t, _)| vec![o1 + d1 * t])
                    .unwrap_or_default()
            }
            (Self::Line { origin, dir }, Self::Circle { center, radius })
            | (Self::Circle { center, radius }, Self::Line { origin, dir }) => {
                line_circle_intersect_2d(&origin, &dir, &center, radius)
            }
            (
                Self::Circle {
                    center: c1,
                    radius: r1,
                },
                Self::Circle {
                    center: c2,
                    radius: r2,
                },
            ) => circle_circle_intersect_2d(&c1, r1, &c2, r2),
        }
    }
}

/// Joins the raw offset segments at every corner.
///
/// `raw` must be the output of the raw offset pass for `original`, and
/// `corners` its classification. Fillets at outer corners have radius
/// `nose_radius` and are centered on the original vertex. A junction that
/// cannot be resolved falls back to a snap and is recorded; the pass never
/// fails.
pub fn join(
    raw: &[OffsetSegment],
    original: &Profile,
    corners: &[CornerEntry],
    nose_radius: f64,
    trace: &mut Trace,
) -> Vec<OffsetSegment> {
    let Some((first, rest)) = raw.split_first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(raw.len() * 2);
    let mut current = *first;

    for (corner, next) in corners.iter().zip(rest) {
        let i = corner.index;
        let vertex = original.vertex(i).unwrap_or_else(|| current.segment.end());

        match corner.class {
            CornerClass::Tangent => {
                trace.note(Phase::Join, format!("corner {i}: snapped"));
                let (a, b) = snap(&current, next);
                out.push(a);
                current = b;
            }
            CornerClass::Unknown => {
                trace.recover(
                    Phase::Join,
                    Recovery::UnresolvedJunction {
                        corner: i,
                        reason: "travel tangent undefined".to_owned(),
                    },
                );
                let (a, b) = snap(&current, next);
                out.push(a);
                current = b;
            }
            CornerClass::Inner => match trim(&current.segment, &next.segment, &vertex) {
                Some((a, b)) => {
                    trace.note(
                        Phase::Join,
                        format!("corner {i}: trimmed at ({:.4}, {:.4})", b.start().x, b.start().y),
                    );
                    out.push(current.replaced(a));
                    current = next.replaced(b);
                }
                None => {
                    trace.recover(
                        Phase::Join,
                        Recovery::UnresolvedJunction {
                            corner: i,
                            reason: "offset carriers do not intersect".to_owned(),
                        },
                    );
                    let (a, b) = snap(&current, next);
                    out.push(a);
                    current = b;
                }
            },
            CornerClass::Outer => {
                match fillet(&current.segment, &next.segment, &vertex, nose_radius) {
                    Ok(Some((a, arc, b))) => {
                        trace.note(
                            Phase::Join,
                            format!(
                                "corner {i}: fillet r={nose_radius} {}",
                                if arc.clockwise { "cw" } else { "ccw" }
                            ),
                        );
                        out.push(current.replaced(a));
                        out.push(OffsetSegment::fillet(Segment::Arc(arc)));
                        current = next.replaced(b);
                    }
                    Ok(None) => {
                        trace.note(Phase::Join, format!("corner {i}: fillet too small, snapped"));
                        let (a, b) = snap(&current, next);
                        out.push(a);
                        current = b;
                    }
                    Err(reason) => {
                        trace.recover(
                            Phase::Join,
                            Recovery::UnresolvedJunction {
                                corner: i,
                                reason: reason.to_owned(),
                            },
                        );
                        let (a, b) = snap(&current, next);
                        out.push(a);
                        current = b;
                    }
                }
            }
        }
    }

    out.push(current);
    out
}

/// Moves the start of `b` onto the end of `a`.
fn snap(a: &OffsetSegment, b: &OffsetSegment) -> (OffsetSegment, OffsetSegment) {
    (*a, b.replaced(b.segment.with_start(a.segment.end())))
}

/// Trims `a` and `b` to the intersection of their carriers nearest `vertex`.
fn trim(a: &Segment, b: &Segment, vertex: &Point2) -> Option<(Segment, Segment)> {
    let hits = Primitive::of(a)?.intersect(Primitive::of(b)?);
    let x = nearest_to(&hits, vertex)?;
    Some((a.with_end(on_own_radius(a, x)), b.with_start(on_own_radius(b, x))))
}

/// Clamps `p` onto the circle an arc segment lies on.
fn on_own_radius(segment: &Segment, p: Point2) -> Point2 {
    match segment {
        Segment::Line(_) => p,
        Segment::Arc(a) => project_to_radius(&a.center, a.radius(), &p).unwrap_or(p),
    }
}

/// Builds the fillet arc around `vertex` joining `a` to `b`.
///
/// Returns `Ok(None)` when the fillet endpoints coincide.
fn fillet(
    a: &Segment,
    b: &Segment,
    vertex: &Point2,
    radius: f64,
) -> Result<Option<(Segment, ArcSegment, Segment)>, &'static str> {
    let pa = project_to_radius(vertex, radius, &a.end()).ok_or("offset end lies on the vertex")?;
    let pb =
        project_to_radius(vertex, radius, &b.start()).ok_or("offset start lies on the vertex")?;
    if (pa - pb).norm() < COINCIDENT {
        return Ok(None);
    }

    let a = a.with_end(pa);
    let b = b.with_start(pb);
    let (Ok(ta), Ok(tb)) = (a.end_tangent(), b.start_tangent()) else {
        return Err("travel tangent undefined at fillet");
    };
    let turn = cross(&ta, &tb);
    if turn.abs() < PARALLEL_CROSS {
        return Err("parallel tangents at outer corner");
    }

    let mid = resolve_midpoint(vertex, radius, &pa, &pb, turn > 0.0, MidpointRule::PreferMinor);
    let arc = ArcSegment::new(pa, mid.point, pb, *vertex, mid.clockwise);
    Ok(Some((a, arc, b)))
}
