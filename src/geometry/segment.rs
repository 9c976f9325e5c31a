use crate::error::GeometryError;
use crate::math::arc_2d::{arc_length, resolve_midpoint, MidpointRule};
use crate::math::{normalize, rotate_ccw, rotate_cw, Point2, Vector2};

/// A straight profile segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p1: Point2,
    pub p2: Point2,
}

impl LineSegment {
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Unit travel direction, identical at both ends.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] for a zero-length line.
    pub fn direction(&self) -> Result<Vector2, GeometryError> {
        normalize(self.p2 - self.p1)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }
}

/// A circular profile segment.
///
/// `center` always arrives from the segment's source; it is never fitted
/// from the three points. `pm` is kept consistent with the sweep by every
/// operation that moves an endpoint, and `clockwise` follows the lathe view
/// (Z to the right, X upward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub p1: Point2,
    pub pm: Point2,
    pub p2: Point2,
    pub center: Point2,
    pub clockwise: bool,
}

impl ArcSegment {
    #[must_use]
    pub fn new(p1: Point2, pm: Point2, p2: Point2, center: Point2, clockwise: bool) -> Self {
        Self {
            p1,
            pm,
            p2,
            center,
            clockwise,
        }
    }

    /// Radius measured at the start point.
    #[must_use]
    pub fn radius(&self) -> f64 {
        (self.p1 - self.center).norm()
    }

    /// Travel tangent at the start point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the start lies on the center.
    pub fn start_tangent(&self) -> Result<Vector2, GeometryError> {
        arc_tangent(&self.center, &self.p1, self.clockwise)
    }

    /// Travel tangent at the end point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the end lies on the center.
    pub fn end_tangent(&self) -> Result<Vector2, GeometryError> {
        arc_tangent(&self.center, &self.p2, self.clockwise)
    }

    /// `radius × directed sweep` in the arc's own sense.
    #[must_use]
    pub fn length(&self) -> f64 {
        arc_length(&self.center, &self.p1, &self.p2, self.clockwise)
    }

    /// `(center − p1, center − p2)`.
    #[must_use]
    pub fn radial_vectors(&self) -> (Vector2, Vector2) {
        (self.center - self.p1, self.center - self.p2)
    }

    /// Returns a copy with new endpoints and a midpoint re-walked from them.
    ///
    /// The previous midpoint is the hint that picks the sweep, so the sense
    /// may flip if the new endpoints leave the old midpoint on the other side.
    #[must_use]
    pub fn with_endpoints(&self, p1: Point2, p2: Point2) -> Self {
        let radius = (p1 - self.center).norm();
        let mid = resolve_midpoint(
            &self.center,
            radius,
            &p1,
            &p2,
            self.clockwise,
            MidpointRule::Hint(self.pm),
        );
        Self {
            p1,
            pm: mid.point,
            p2,
            center: self.center,
            clockwise: mid.clockwise,
        }
    }
}

/// Tangent at `p`: the radius vector `center − p` rotated a quarter turn,
/// −90° for clockwise and +90° for counter-clockwise travel.
fn arc_tangent(center: &Point2, p: &Point2, clockwise: bool) -> Result<Vector2, GeometryError> {
    let radial = center - p;
    let rotated = if clockwise {
        rotate_cw(radial)
    } else {
        rotate_ccw(radial)
    };
    normalize(rotated)
}

/// Segment type tag used in corner reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Line,
    ArcCw,
    ArcCcw,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line => write!(f, "L"),
            Self::ArcCw => write!(f, "CW"),
            Self::ArcCcw => write!(f, "CCW"),
        }
    }
}

/// A profile segment: a line or a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(LineSegment),
    Arc(ArcSegment),
}

impl Segment {
    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Self::Line(l) => l.p1,
            Self::Arc(a) => a.p1,
        }
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::Line(l) => l.p2,
            Self::Arc(a) => a.p2,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Line(_) => SegmentKind::Line,
            Self::Arc(a) if a.clockwise => SegmentKind::ArcCw,
            Self::Arc(_) => SegmentKind::ArcCcw,
        }
    }

    /// Unit travel direction leaving the start point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the direction is undefined.
    pub fn start_tangent(&self) -> Result<Vector2, GeometryError> {
        match self {
            Self::Line(l) => l.direction(),
            Self::Arc(a) => a.start_tangent(),
        }
    }

    /// Unit travel direction arriving at the end point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the direction is undefined.
    pub fn end_tangent(&self) -> Result<Vector2, GeometryError> {
        match self {
            Self::Line(l) => l.direction(),
            Self::Arc(a) => a.end_tangent(),
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line(l) => l.length(),
            Self::Arc(a) => a.length(),
        }
    }

    /// Returns a copy whose start point is `p`.
    #[must_use]
    pub fn with_start(&self, p: Point2) -> Self {
        match self {
            Self::Line(l) => Self::Line(LineSegment::new(p, l.p2)),
            Self::Arc(a) => Self::Arc(a.with_endpoints(p, a.p2)),
        }
    }

    /// Returns a copy whose end point is `p`.
    #[must_use]
    pub fn with_end(&self, p: Point2) -> Self {
        match self {
            Self::Line(l) => Self::Line(LineSegment::new(l.p1, p)),
            Self::Arc(a) => Self::Arc(a.with_endpoints(a.p1, p)),
        }
    }

    /// Returns a copy with every position moved by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vector2) -> Self {
        match self {
            Self::Line(l) => Self::Line(LineSegment::new(l.p1 + delta, l.p2 + delta)),
            Self::Arc(a) => Self::Arc(ArcSegment {
                p1: a.p1 + delta,
                pm: a.pm + delta,
                p2: a.p2 + delta,
                center: a.center + delta,
                clockwise: a.clockwise,
            }),
        }
    }
}
