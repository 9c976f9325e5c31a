//! Tool-nose radius compensation for lathe profiles.
//!
//! An open profile of lines and arcs is offset by the tool nose radius to one
//! side of travel, joined at every corner, cleaned of degenerate pieces and
//! finally shifted to the programmed tool point.

pub mod compensation;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;

pub use compensation::{
    ArcConvention, CompensationSide, OffsetOptions, Quadrant, ToolCompensation,
};
pub use diagnostics::{Phase, Trace};
pub use error::{GeometryError, LatheCompError, Recovery, Result, SegmentError};
pub use operations::offset::{OffsetResult, OffsetStats, ProfileOffset};

/// Parses `input`, compensates it and writes the result as records.
///
/// # Errors
///
/// Returns [`LatheCompError::MalformedSegment`] for an unreadable record and
/// [`LatheCompError::InvalidParameter`] for out-of-range parameters.
pub fn compensate_text(
    input: &str,
    compensation: &ToolCompensation,
    options: &OffsetOptions,
) -> Result<(String, Trace)> {
    let profile = io::parse_profile(input)?;
    let result = ProfileOffset::new(profile, *compensation)
        .with_options(*options)
        .execute()?;
    let text = io::write_profile(&result.segments, options.arc_convention);
    Ok((text, result.trace))
}
