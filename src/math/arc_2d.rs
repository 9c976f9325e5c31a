//! 2D arc math in lathe coordinates.
//!
//! Angles are measured in the lathe view (Z to the right, X upward):
//! `angle = atan2(p.x − c.x, p.z − c.z)`. Counter-clockwise travel increases
//! the angle, clockwise travel decreases it.

use std::f64::consts::TAU;

use super::{xz, Point2, TOLERANCE};

/// Sweeps closer than this (radians) are considered equal.
const SWEEP_TIE: f64 = 1e-9;

/// Returns the polar angle of `p` around `center`, in `(−π, π]`.
#[must_use]
pub fn polar_angle(center: &Point2, p: &Point2) -> f64 {
    (p.x - center.x).atan2(p.y - center.y)
}

/// Returns the point at `angle` on the circle `(center, radius)`.
#[must_use]
pub fn point_at_angle(center: &Point2, radius: f64, angle: f64) -> Point2 {
    xz(
        center.x + radius * angle.sin(),
        center.y + radius * angle.cos(),
    )
}

/// Angular travel from `from` to `to` in the given sense, in `[0, 2π)`.
#[must_use]
pub fn directed_sweep(from: f64, to: f64, clockwise: bool) -> f64 {
    let raw = if clockwise { from - to } else { to - from };
    let sweep = raw.rem_euclid(TAU);
    // rem_euclid can round a tiny negative up to exactly TAU.
    if sweep >= TAU - SWEEP_TIE {
        0.0
    } else {
        sweep
    }
}

/// Whether `angle` lies strictly inside the directed sweep `from → to`.
///
/// `tol` (radians) is excluded at both ends of the sweep.
#[must_use]
pub fn angle_in_sweep(angle: f64, from: f64, to: f64, clockwise: bool, tol: f64) -> bool {
    let total = directed_sweep(from, to, clockwise);
    let offset = directed_sweep(from, angle, clockwise);
    offset > tol && offset < total - tol
}

/// Projects `p` radially onto the circle `(center, radius)`.
///
/// Returns `None` when `p` coincides with the center.
#[must_use]
pub fn project_to_radius(center: &Point2, radius: f64, p: &Point2) -> Option<Point2> {
    let d = p - center;
    let len = d.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(center + d * (radius / len))
}

/// Length of the arc `start → end` around `center` in the given sense.
#[must_use]
pub fn arc_length(center: &Point2, start: &Point2, end: &Point2, clockwise: bool) -> f64 {
    let radius = (start - center).norm();
    let sweep = directed_sweep(
        polar_angle(center, start),
        polar_angle(center, end),
        clockwise,
    );
    radius * sweep
}

/// How [`resolve_midpoint`] chooses between the two sweeps joining the
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MidpointRule {
    /// Keep the current rotational sense.
    Directed,
    /// Pick the sweep whose midpoint is nearest to this point.
    Hint(Point2),
    /// Pick the shorter sweep.
    PreferMinor,
}

/// A resolved arc midpoint and the rotational sense it implies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcMidpoint {
    pub point: Point2,
    pub clockwise: bool,
}

/// Computes the midpoint of an arc by walking half of the directed sweep
/// from the start angle.
///
/// Both senses are evaluated; `rule` decides which one the arc follows.
/// Near-ties keep `clockwise`.
#[must_use]
pub fn resolve_midpoint(
    center: &Point2,
    radius: f64,
    start: &Point2,
    end: &Point2,
    clockwise: bool,
    rule: MidpointRule,
) -> ArcMidpoint {
    let a0 = polar_angle(center, start);
    let a1 = polar_angle(center, end);

    let walk = |cw: bool| {
        let sweep = directed_sweep(a0, a1, cw);
        let half = if cw { -0.5 * sweep } else { 0.5 * sweep };
        (point_at_angle(center, radius, a0 + half), sweep)
    };

    let (own_point, own_sweep) = walk(clockwise);
    let (alt_point, alt_sweep) = walk(!clockwise);

    let take_alt = match rule {
        MidpointRule::Directed => false,
        MidpointRule::PreferMinor => alt_sweep < own_sweep - SWEEP_TIE,
        MidpointRule::Hint(hint) => match project_to_radius(center, radius, &hint) {
            Some(hint) => {
                let own_d = (own_point - hint).norm();
                let alt_d = (alt_point - hint).norm();
                alt_d < own_d - TOLERANCE * radius.max(1.0)
            }
            None => false,
        },
    };

    if take_alt {
        ArcMidpoint {
            point: alt_point,
            clockwise: !clockwise,
        }
    } else {
        ArcMidpoint {
            point: own_point,
            clockwise,
        }
    }
}
