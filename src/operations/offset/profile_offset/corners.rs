use crate::geometry::{Profile, Segment, SegmentKind};
use crate::math::cross;

/// How two adjacent offset segments are joined at a shared vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerClass {
    /// Tangents agree within tolerance: snap.
    Tangent,
    /// Tool rides inside the turn: trim to the intersection.
    Inner,
    /// Tool rides outside the turn: insert a fillet.
    Outer,
    /// A tangent could not be computed.
    Unknown,
}

impl std::fmt::Display for CornerClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Tangent => "tangent",
            Self::Inner => "inner",
            Self::Outer => "outer",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Classification of the junction between segments `index` and `index + 1`.
///
/// Angles are in degrees. For an `Unknown` corner the angles and `cross`
/// are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerEntry {
    pub index: usize,
    pub pair: (SegmentKind, SegmentKind),
    pub class: CornerClass,
    /// Deviation between the travel directions, `0..=180`.
    pub delta_deg: f64,
    pub inner_deg: f64,
    pub outer_deg: f64,
    /// 2D cross product of the arriving and leaving tangents.
    pub cross: f64,
}

/// Classifies every junction of `profile`.
///
/// `offset_dir` is `+1` for left and `−1` for right compensation.
#[must_use]
pub fn classify(
    profile: &Profile,
    offset_dir: f64,
    tangent_tolerance_deg: f64,
) -> Vec<CornerEntry> {
    profile
        .segments
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            classify_corner(i, &pair[0], &pair[1], offset_dir, tangent_tolerance_deg)
        })
        .collect()
}

/// Classifies the junctions between consecutive segments listed in `kept`.
///
/// Segments left out of `kept` are bridged: the entry at index `i` joins
/// segment `i` to the next kept segment, which need not be `i + 1`.
#[must_use]
pub fn classify_kept(
    profile: &Profile,
    kept: &[usize],
    offset_dir: f64,
    tangent_tolerance_deg: f64,
) -> Vec<CornerEntry> {
    kept.windows(2)
        .filter_map(|pair| {
            let a = profile.segments.get(pair[0])?;
            let b = profile.segments.get(pair[1])?;
            Some(classify_corner(pair[0], a, b, offset_dir, tangent_tolerance_deg))
        })
        .collect()
}

/// Classifies the junction where `a` ends and `b` starts.
#[must_use]
pub fn classify_corner(
    index: usize,
    a: &Segment,
    b: &Segment,
    offset_dir: f64,
    tangent_tolerance_deg: f64,
) -> CornerEntry {
    let pair = (a.kind(), b.kind());
    let (Ok(v1), Ok(v2)) = (a.end_tangent(), b.start_tangent()) else {
        return CornerEntry {
            index,
            pair,
            class: CornerClass::Unknown,
            delta_deg: 0.0,
            inner_deg: 0.0,
            outer_deg: 0.0,
            cross: 0.0,
        };
    };

    let delta_deg = v1.dot(&v2).clamp(-1.0, 1.0).acos().to_degrees();
    let turn = cross(&v1, &v2);

    let class = if delta_deg <= tangent_tolerance_deg {
        CornerClass::Tangent
    } else if offset_dir * turn < 0.0 {
        CornerClass::Outer
    } else {
        CornerClass::Inner
    };

    CornerEntry {
        index,
        pair,
        class,
        delta_deg,
        inner_deg: 180.0 - delta_deg,
        outer_deg: 180.0 + delta_deg,
        cross: turn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ArcSegment, LineSegment};
    use crate::math::xz;
    use approx::assert_relative_eq;

    fn line(x1: f64, z1: f64, x2: f64, z2: f64) -> Segment {
        Segment::Line(LineSegment::new(xz(x1, z1), xz(x2, z2)))
    }

    #[test]
    fn colinear_lines_are_tangent() {
        let a = line(0.0, 0.0, 0.0, -5.0);
        let b = line(0.0, -5.0, 0.0, -9.0);
        let c = classify_corner(0, &a, &b, 1.0, 0.5);
        assert_eq!(c.class, CornerClass::Tangent);
        assert_relative_eq!(c.delta_deg, 0.0);
        assert_relative_eq!(c.inner_deg, 180.0);
    }

    #[test]
    fn shoulder_flips_with_side() {
        // Turn toward the chuck, then face up the shoulder.
        let a = line(10.0, 0.0, 10.0, -10.0);
        let b = line(10.0, -10.0, 20.0, -10.0);
        let left = classify_corner(0, &a, &b, 1.0, 0.5);
        let right = classify_corner(0, &a, &b, -1.0, 0.5);
        assert_eq!(left.class, CornerClass::Inner);
        assert_eq!(right.class, CornerClass::Outer);
        assert_relative_eq!(left.delta_deg, 90.0, epsilon = 1e-9);
        assert_relative_eq!(left.outer_deg, 270.0, epsilon = 1e-9);
        assert!(left.cross > 0.0);
        assert_eq!(left.pair, (SegmentKind::Line, SegmentKind::Line));
    }

    #[test]
    fn tangent_arc_blend() {
        // Line along -Z, then a clockwise quarter arc rising to +X.
        let a = line(10.0, 0.0, 10.0, -10.0);
        let b = Segment::Arc(ArcSegment::new(
            xz(10.0, -10.0),
            xz(10.0 + 2.0 * (1.0 - 0.5_f64.sqrt()), -10.0 - 2.0 * 0.5_f64.sqrt()),
            xz(12.0, -12.0),
            xz(12.0, -10.0),
            true,
        ));
        let c = classify_corner(0, &a, &b, -1.0, 0.5);
        assert_eq!(c.class, CornerClass::Tangent, "delta={}", c.delta_deg);
        assert_eq!(c.pair, (SegmentKind::Line, SegmentKind::ArcCw));
    }

    #[test]
    fn degenerate_segment_is_unknown() {
        let c = classify_corner(3, &line(1.0, 1.0, 1.0, 1.0), &line(1.0, 1.0, 2.0, 1.0), 1.0, 0.5);
        assert_eq!(c.class, CornerClass::Unknown);
        assert_eq!(c.index, 3);
    }

    #[test]
    fn classify_yields_one_entry_per_junction() {
        let profile = Profile::new(vec![
            line(0.0, 0.0, 0.0, -5.0),
            line(0.0, -5.0, 5.0, -5.0),
            line(5.0, -5.0, 5.0, -10.0),
        ]);
        let corners = classify(&profile, 1.0, 0.5);
        assert_eq!(corners.len(), 2);
        assert_eq!(corners[1].index, 1);
        assert_ne!(corners[0].class, corners[1].class);
    }

    #[test]
    fn kept_segments_bridge_a_removed_one() {
        // The middle blend is skipped, so its neighbours meet at 90 degrees.
        let profile = Profile::new(vec![
            line(10.0, 0.0, 10.0, -5.0),
            line(10.0, -5.0, 10.3, -5.3),
            line(10.3, -5.3, 15.3, -5.3),
        ]);
        let corners = classify_kept(&profile, &[0, 2], 1.0, 0.5);
        assert_eq!(corners.len(), 1);
        assert_eq!(corners[0].index, 0);
        assert_eq!(corners[0].class, CornerClass::Inner);
        assert_relative_eq!(corners[0].delta_deg, 90.0, epsilon = 1e-9);

        let all = classify_kept(&profile, &[0, 1, 2], 1.0, 0.5);
        assert_eq!(all, classify(&profile, 1.0, 0.5));
    }
}
