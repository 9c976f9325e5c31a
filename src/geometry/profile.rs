use super::segment::Segment;
use crate::math::Point2;

/// An open chain of segments in travel order.
///
/// The first segment's start is the nominal start of the profile and the last
/// segment's end its nominal end. No closure is implied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub segments: Vec<Segment>,
}

impl Profile {
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `(index, gap)` for every junction `i → i + 1` whose endpoints
    /// are further apart than `tolerance`.
    #[must_use]
    pub fn gaps(&self, tolerance: f64) -> Vec<(usize, f64)> {
        self.segments
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let gap = (pair[1].start() - pair[0].end()).norm();
                (gap > tolerance).then_some((i, gap))
            })
            .collect()
    }

    /// End point of segment `i`, the shared vertex of corner `i`.
    #[must_use]
    pub fn vertex(&self, i: usize) -> Option<Point2> {
        self.segments.get(i).map(Segment::end)
    }
}

/// A segment of the compensated chain.
///
/// `source` is the index of the input segment it was offset from, or `None`
/// for a fillet synthesized at an outer corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSegment {
    pub segment: Segment,
    pub source: Option<usize>,
}

impl OffsetSegment {
    #[must_use]
    pub fn from_source(index: usize, segment: Segment) -> Self {
        Self {
            segment,
            source: Some(index),
        }
    }

    #[must_use]
    pub fn fillet(segment: Segment) -> Self {
        Self {
            segment,
            source: None,
        }
    }

    /// Returns a copy carrying `segment` with the same provenance.
    #[must_use]
    pub fn replaced(&self, segment: Segment) -> Self {
        Self {
            segment,
            source: self.source,
        }
    }
}
