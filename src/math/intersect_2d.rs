use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Intersection of the infinite line `origin + t * dir` with a full circle.
///
/// Returns 0, 1 (tangent) or 2 points.
#[must_use]
pub fn line_circle_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    center: &Point2,
    radius: f64,
) -> Vec<Point2> {
    let a = dir.norm_squared();
    if a < TOLERANCE * TOLERANCE || radius < TOLERANCE {
        return Vec::new();
    }

    // (origin + t*dir - center)² = r²
    let f = origin - center;
    let b = 2.0 * f.dot(dir);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    // Scale-aware: discriminant carries units of length⁴.
    let disc_tol = TOLERANCE * a * radius.max(1.0) * radius.max(1.0);
    if discriminant < -disc_tol {
        return Vec::new();
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    if disc_sqrt < TOLERANCE * 100.0 {
        let t = -b / (2.0 * a);
        return vec![origin + dir * t];
    }

    [(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
        .into_iter()
        .map(|t| origin + dir * t)
        .collect()
}

/// Intersection of two full circles.
///
/// Concentric circles yield no points. Circles that touch yield one.
#[must_use]
pub fn circle_circle_intersect_2d(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return Vec::new();
    }

    let d = c2 - c1;
    let dist_sq = d.norm_squared();
    let dist = dist_sq.sqrt();
    if dist < TOLERANCE {
        return Vec::new();
    }

    let slack = TOLERANCE * 100.0 * r1.max(r2).max(1.0);
    if dist > r1 + r2 + slack || dist < (r1 - r2).abs() - slack {
        return Vec::new();
    }

    // Distance from c1 along c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let unit = d / dist;
    let foot = c1 + unit * a;
    if h < TOLERANCE * 100.0 {
        return vec![foot];
    }

    let perp = Vector2::new(-unit.y, unit.x);
    vec![foot + perp * h, foot - perp * h]
}

/// Returns the candidate closest to `target`.
#[must_use]
pub fn nearest_to(candidates: &[Point2], target: &Point2) -> Option<Point2> {
    candidates.iter().copied().min_by(|a, b| {
        (a - target)
            .norm_squared()
            .total_cmp(&(b - target).norm_squared())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::xz;

    #[test]
    fn line_line_perpendicular() {
        let p1 = xz(0.0, 0.0);
        let d1 = Vector2::new(1.0, 0.0);
        let p2 = xz(0.5, -1.0);
        let d2 = Vector2::new(0.0, 1.0);
        let (t, u) = line_line_intersect_2d(&p1, &d1, &p2, &d2).unwrap();
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let p1 = xz(0.0, 0.0);
        let d1 = Vector2::new(1.0, 0.0);
        let p2 = xz(0.0, 1.0);
        assert!(line_line_intersect_2d(&p1, &d1, &p2, &d1).is_none());
    }

    #[test]
    fn line_circle_two_crossings() {
        let hits = line_circle_intersect_2d(
            &xz(-2.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &xz(0.0, 0.0),
            1.0,
        );
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        let near = nearest_to(&hits, &xz(0.9, 0.1)).unwrap();
        assert!((near - xz(1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn line_circle_tangent_and_miss() {
        let tangent = line_circle_intersect_2d(
            &xz(1.0, -1.0),
            &Vector2::new(0.0, 1.0),
            &xz(0.0, 0.0),
            1.0,
        );
        assert_eq!(tangent.len(), 1, "hits={tangent:?}");
        assert!((tangent[0] - xz(1.0, 0.0)).norm() < 1e-6);

        let miss = line_circle_intersect_2d(
            &xz(3.0, 0.0),
            &Vector2::new(0.0, 1.0),
            &xz(0.0, 0.0),
            1.0,
        );
        assert!(miss.is_empty());
    }

    #[test]
    fn circle_circle_two_crossings() {
        let hits = circle_circle_intersect_2d(&xz(0.0, 0.0), 1.0, &xz(1.0, 0.0), 1.0);
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        let half_sqrt3 = 3.0_f64.sqrt() / 2.0;
        let mut zs: Vec<f64> = hits.iter().map(|p| p.y).collect();
        zs.sort_by(f64::total_cmp);
        assert!((zs[0] + half_sqrt3).abs() < 1e-9);
        assert!((zs[1] - half_sqrt3).abs() < 1e-9);
        assert!(hits.iter().all(|p| (p.x - 0.5).abs() < 1e-9));
    }

    #[test]
    fn circle_circle_tangent_and_apart() {
        let touch = circle_circle_intersect_2d(&xz(0.0, 0.0), 1.0, &xz(2.0, 0.0), 1.0);
        assert_eq!(touch.len(), 1);
        assert!((touch[0] - xz(1.0, 0.0)).norm() < 1e-9);

        let apart = circle_circle_intersect_2d(&xz(0.0, 0.0), 1.0, &xz(5.0, 0.0), 1.0);
        assert!(apart.is_empty());

        let concentric = circle_circle_intersect_2d(&xz(0.0, 0.0), 1.0, &xz(0.0, 0.0), 2.0);
        assert!(concentric.is_empty());
    }
}
