use thiserror::Error;

/// Top-level error type for the compensation engine.
///
/// Only parameter and parse failures surface to the caller. Geometric trouble
/// inside a run is recovered locally and reported through
/// [`Recovery`] entries instead.
#[derive(Debug, Error)]
pub enum LatheCompError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    MalformedSegment(#[from] SegmentError),
}

/// Errors raised while reading segment records.
///
/// `line` is the 1-based line number of the offending record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SegmentError {
    #[error("line {line}: {kind} record needs {expected} numbers, found {found}")]
    TooFewFields {
        line: usize,
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: arc record has no circle center")]
    MissingArcCenter { line: usize },

    #[error("line {line}: unknown record type `{token}`")]
    UnknownRecord { line: usize, token: String },

    #[error("line {line}: `{token}` is not a number")]
    InvalidNumber { line: usize, token: String },
}

/// Errors related to geometric computations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(&'static str),

    #[error("zero-length vector")]
    ZeroVector,
}

/// A geometric problem that was recovered from during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Recovery {
    /// A junction could not be trimmed or filleted and was snapped instead.
    UnresolvedJunction { corner: usize, reason: String },

    /// The arc sense could not be derived from its three points; the prior
    /// flag was kept.
    AmbiguousArcDirection { segment: usize },

    /// A segment had no usable direction.
    DegenerateGeometry { segment: usize, reason: String },
}

impl std::fmt::Display for Recovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedJunction { corner, reason } => {
                write!(f, "corner {corner}: unresolved junction ({reason})")
            }
            Self::AmbiguousArcDirection { segment } => {
                write!(f, "segment {segment}: arc direction ambiguous, kept")
            }
            Self::DegenerateGeometry { segment, reason } => {
                write!(f, "segment {segment}: degenerate geometry ({reason})")
            }
        }
    }
}

/// Convenience type alias for results using [`LatheCompError`].
pub type Result<T> = std::result::Result<T, LatheCompError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_error_converts_transparently() {
        let err: LatheCompError = SegmentError::MissingArcCenter { line: 3 }.into();
        assert!(matches!(err, LatheCompError::MalformedSegment(_)));
        assert_eq!(err.to_string(), "line 3: arc record has no circle center");
    }

    #[test]
    fn recovery_display_names_the_corner() {
        let r = Recovery::UnresolvedJunction {
            corner: 4,
            reason: "no intersection".to_owned(),
        };
        assert_eq!(r.to_string(), "corner 4: unresolved junction (no intersection)");
    }
}
