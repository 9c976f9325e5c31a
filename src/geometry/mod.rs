pub mod profile;
pub mod segment;

pub use profile::{OffsetSegment, Profile};
pub use segment::{ArcSegment, LineSegment, Segment, SegmentKind};
