pub mod cleanup;
pub mod corners;
pub mod direction;
pub mod join;
pub mod quadrant;
pub mod raw_offset;

use crate::compensation::{CompensationSide, OffsetOptions, Quadrant, ToolCompensation};
use crate::diagnostics::{Phase, Trace};
use crate::error::Result;
use crate::geometry::{OffsetSegment, Profile};

pub use corners::{CornerClass, CornerEntry};

/// Counts gathered over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetStats {
    pub input_segments: usize,
    pub tangent_corners: usize,
    pub inner_corners: usize,
    pub outer_corners: usize,
    pub unknown_corners: usize,
    pub fillets: usize,
    pub removed: usize,
    pub output_segments: usize,
}

/// Output of [`ProfileOffset::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetResult {
    /// The compensated chain, in travel order.
    pub segments: Vec<OffsetSegment>,
    /// Classification of every input junction. Empty when compensation is off.
    pub corners: Vec<CornerEntry>,
    pub trace: Trace,
    pub stats: OffsetStats,
}

/// Tool-nose radius compensation of an open lathe profile.
///
/// Runs corner classification, raw offset, corner joining, short-segment
/// cleanup, arc sense repair and the quadrant shift, in that order. Only
/// invalid parameters are errors; geometric trouble is recovered locally and
/// reported in the trace.
#[derive(Debug)]
pub struct ProfileOffset {
    profile: Profile,
    compensation: ToolCompensation,
    options: OffsetOptions,
}

impl ProfileOffset {
    /// Creates a new compensation operation with default options.
    #[must_use]
    pub fn new(profile: Profile, compensation: ToolCompensation) -> Self {
        Self {
            profile,
            compensation,
            options: OffsetOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: OffsetOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the compensation.
    ///
    /// # Errors
    ///
    /// Returns [`LatheCompError::InvalidParameter`](crate::LatheCompError) if
    /// the compensation parameters or the options are out of range. Nothing
    /// is computed in that case.
    pub fn execute(&self) -> Result<OffsetResult> {
        self.compensation.validate()?;
        self.options.validate()?;

        let mut trace = Trace::new();
        let mut stats = OffsetStats {
            input_segments: self.profile.len(),
            ..OffsetStats::default()
        };

        trace.note(Phase::Parse, format!("{} segments", self.profile.len()));
        for (i, gap) in self.profile.gaps(self.options.min_segment_length) {
            trace.warn(
                Phase::Parse,
                format!("gap of {gap:.4} between segments {i} and {}", i + 1),
            );
        }

        if self.compensation.side == CompensationSide::Off || self.profile.is_empty() {
            return Ok(self.passthrough(trace, stats));
        }

        let ToolCompensation {
            side,
            nose_radius,
            quadrant: nose_quadrant,
        } = self.compensation;

        let corners = corners::classify(
            &self.profile,
            side.offset_dir(),
            self.options.tangent_tolerance_deg,
        );
        record_corners(&corners, &mut trace, &mut stats);

        let raw_offset::RawOffset {
            segments: raw,
            collapsed,
        } = raw_offset::build(
            &self.profile,
            self.compensation.signed_offset(),
            self.options.collapse_radius_floor(),
            &mut trace,
        );

        let (raw, junctions) = if collapsed.is_empty() {
            (raw, corners.clone())
        } else {
            self.bridge_collapsed(&raw, &collapsed, &corners, &mut trace)
        };

        let joined = join::join(&raw, &self.profile, &junctions, nose_radius, &mut trace);
        stats.fillets = joined.iter().filter(|s| s.source.is_none()).count();

        let cleaned =
            cleanup::remove_short(&joined, self.options.min_segment_length, &mut trace);
        stats.removed = collapsed.len() + joined.len() - cleaned.len();

        let directed = direction::fix_directions(&cleaned, &mut trace);

        let segments = if nose_quadrant == Quadrant::CENTER {
            directed
        } else {
            let delta = quadrant::unit_shift(nose_quadrant) * nose_radius;
            trace.note(
                Phase::Quadrant,
                format!(
                    "quadrant {nose_quadrant}: shift ({:.4}, {:.4})",
                    delta.x, delta.y
                ),
            );
            quadrant::shift(&directed, nose_quadrant, nose_radius)
        };

        stats.output_segments = segments.len();
        trace.note(
            Phase::Result,
            format!(
                "{} segments out, {} fillets, {} removed, {} recoveries",
                stats.output_segments,
                stats.fillets,
                stats.removed,
                trace.recoveries().len()
            ),
        );

        Ok(OffsetResult {
            segments,
            corners,
            trace,
            stats,
        })
    }

    /// Drops collapsed arcs and classifies the junctions of what remains.
    fn bridge_collapsed(
        &self,
        raw: &[OffsetSegment],
        collapsed: &[usize],
        corners: &[CornerEntry],
        trace: &mut Trace,
    ) -> (Vec<OffsetSegment>, Vec<CornerEntry>) {
        let kept: Vec<usize> = (0..self.profile.len())
            .filter(|i| !collapsed.contains(i))
            .collect();
        let bridged = corners::classify_kept(
            &self.profile,
            &kept,
            self.compensation.side.offset_dir(),
            self.options.tangent_tolerance_deg,
        );
        for c in bridged.iter().filter(|c| !corners.contains(c)) {
            trace.note(
                Phase::Classify,
                format!(
                    "corner {} bridged: {} delta={:.3}",
                    c.index, c.class, c.delta_deg
                ),
            );
        }
        (cleanup::remove_collapsed(raw, collapsed, trace), bridged)
    }

    fn passthrough(&self, mut trace: Trace, mut stats: OffsetStats) -> OffsetResult {
        let segments: Vec<OffsetSegment> = self
            .profile
            .segments
            .iter()
            .enumerate()
            .map(|(i, s)| OffsetSegment::from_source(i, *s))
            .collect();
        stats.output_segments = segments.len();
        if self.compensation.side == CompensationSide::Off {
            trace.note(Phase::Result, "compensation off, geometry passed through");
        } else {
            trace.note(Phase::Result, "empty profile");
        }
        OffsetResult {
            segments,
            corners: Vec::new(),
            trace,
            stats,
        }
    }
}

/// Logs every corner and tallies the classes.
fn record_corners(corners: &[CornerEntry], trace: &mut Trace, stats: &mut OffsetStats) {
    for c in corners {
        trace.note(
            Phase::Classify,
            format!(
                "corner {} {}-{}: {} delta={:.3} inner={:.3} outer={:.3} cross={:.6}",
                c.index,
                c.pair.0,
                c.pair.1,
                c.class,
                c.delta_deg,
                c.inner_deg,
                c.outer_deg,
                c.cross
            ),
        );
        match c.class {
            CornerClass::Tangent => stats.tangent_corners += 1,
            CornerClass::Inner => stats.inner_corners += 1,
            CornerClass::Outer => stats.outer_corners += 1,
            CornerClass::Unknown => stats.unknown_corners += 1,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LatheCompError;
    use crate::geometry::{ArcSegment, LineSegment, Segment};
    use crate::math::xz;

    fn line(x1: f64, z1: f64, x2: f64, z2: f64) -> Segment {
        Segment::Line(LineSegment::new(xz(x1, z1), xz(x2, z2)))
    }

    fn step() -> Profile {
        Profile::new(vec![
            line(10.0, 0.0, 10.0, -10.0),
            line(10.0, -10.0, 20.0, -10.0),
            line(20.0, -10.0, 20.0, -25.0),
        ])
    }

    #[test]
    fn invalid_parameters_fail_before_geometry() {
        let comp = ToolCompensation::new(CompensationSide::Left, -0.4, Quadrant::CENTER);
        let err = ProfileOffset::new(step(), comp).execute().unwrap_err();
        assert!(matches!(err, LatheCompError::InvalidParameter(_)));

        let comp = ToolCompensation::new(CompensationSide::Left, 0.4, Quadrant::CENTER);
        let opts = OffsetOptions {
            min_segment_length: -1.0,
            ..OffsetOptions::default()
        };
        let err = ProfileOffset::new(step(), comp)
            .with_options(opts)
            .execute()
            .unwrap_err();
        assert!(matches!(err, LatheCompError::InvalidParameter(_)));
    }

    #[test]
    fn side_off_passes_geometry_through() {
        let comp = ToolCompensation::new(CompensationSide::Off, 0.0, Quadrant::new(3).unwrap());
        let result = ProfileOffset::new(step(), comp).execute().unwrap();
        let out: Vec<Segment> = result.segments.iter().map(|s| s.segment).collect();
        assert_eq!(out, step().segments);
        assert!(result.corners.is_empty());
        assert!(result
            .trace
            .phase(Phase::Result)
            .any(|m| m.contains("passed through")));
    }

    #[test]
    fn step_profile_counts() {
        // Down, up the shoulder, down again: one inner and one outer corner
        // whichever side is chosen.
        let comp = ToolCompensation::new(CompensationSide::Right, 0.8, Quadrant::CENTER);
        let result = ProfileOffset::new(step(), comp).execute().unwrap();
        assert_eq!(result.stats.inner_corners, 1);
        assert_eq!(result.stats.outer_corners, 1);
        assert_eq!(result.stats.fillets, 1);
        assert_eq!(result.stats.output_segments, 4);
        assert_eq!(result.segments.len(), 4);
        for pair in result.segments.windows(2) {
            assert!((pair[0].segment.end() - pair[1].segment.start()).norm() < 1e-9);
        }
        assert!(result.trace.recoveries().is_empty());
    }

    #[test]
    fn gaps_are_reported_but_not_fatal() {
        let profile = Profile::new(vec![line(0.0, 0.0, 0.0, -5.0), line(0.3, -5.0, 3.0, -5.0)]);
        let comp = ToolCompensation::new(CompensationSide::Left, 0.4, Quadrant::CENTER);
        let result = ProfileOffset::new(profile, comp).execute().unwrap();
        assert!(result.trace.phase(Phase::Parse).any(|m| m.starts_with("gap")));
        assert_eq!(result.stats.input_segments, 2);
    }

    #[test]
    fn quadrant_shift_is_applied_last() {
        let centered = ToolCompensation::new(CompensationSide::Left, 0.5, Quadrant::CENTER);
        let shifted = ToolCompensation {
            quadrant: Quadrant::new(6).unwrap(),
            ..centered
        };
        let a = ProfileOffset::new(step(), centered).execute().unwrap();
        let b = ProfileOffset::new(step(), shifted).execute().unwrap();
        assert_eq!(a.segments.len(), b.segments.len());
        for (sa, sb) in a.segments.iter().zip(&b.segments) {
            let d = sb.segment.start() - sa.segment.start();
            assert!((d.x - 0.5).abs() < 1e-12 && d.y.abs() < 1e-12);
        }
    }

    #[test]
    fn blend_smaller_than_nose_is_removed() {
        // Inside blend of radius 0.3 under a 0.8 nose: the blend vanishes and
        // the two straight runs meet at their own offset corner.
        let s = 0.5_f64.sqrt();
        let blend = ArcSegment::new(
            xz(10.0, -5.0),
            xz(10.3 - 0.3 * s, -5.0 - 0.3 * s),
            xz(10.3, -5.3),
            xz(10.3, -5.0),
            true,
        );
        let profile = Profile::new(vec![
            line(10.0, 0.0, 10.0, -5.0),
            Segment::Arc(blend),
            line(10.3, -5.3, 15.3, -5.3),
        ]);
        let comp = ToolCompensation::new(CompensationSide::Left, 0.8, Quadrant::CENTER);
        let result = ProfileOffset::new(profile, comp).execute().unwrap();

        assert_eq!(result.corners.len(), 2);
        assert!(result.corners.iter().all(|c| c.class == CornerClass::Tangent));
        assert_eq!(result.stats.removed, 1);
        assert_eq!(result.segments.len(), 2);
        assert!(result
            .segments
            .iter()
            .all(|s| matches!(s.segment, Segment::Line(_))));
        assert_eq!(result.segments[0].source, Some(0));
        assert_eq!(result.segments[1].source, Some(2));

        let corner = xz(10.8, -4.5);
        assert!((result.segments[0].segment.end() - corner).norm() < 1e-9);
        assert!((result.segments[1].segment.start() - corner).norm() < 1e-9);
        assert!((result.segments[1].segment.end() - xz(15.3, -4.5)).norm() < 1e-9);
        assert!(result.trace.recoveries().is_empty());
        assert!(result.trace.phase(Phase::Classify).any(|m| m.contains("bridged")));
    }

    #[test]
    fn empty_profile_is_empty_result() {
        let comp = ToolCompensation::new(CompensationSide::Left, 0.5, Quadrant::CENTER);
        let result = ProfileOffset::new(Profile::default(), comp).execute().unwrap();
        assert!(result.segments.is_empty());
    }
}
