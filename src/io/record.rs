use tracing::debug;

use crate::compensation::ArcConvention;
use crate::error::{Result, SegmentError};
use crate::geometry::{ArcSegment, LineSegment, OffsetSegment, Profile, Segment};
use crate::math::{xz, Vector2};

const LINE: &str = "LINE";
const ARC_CW: &str = "ARC3_CW";
const ARC_CCW: &str = "ARC3_CCW";

/// Numbers in a line record.
const LINE_FIELDS: usize = 4;
/// Numbers in an arc record without its circle center.
const ARC_POINT_FIELDS: usize = 6;
/// Numbers in an arc record with its circle center.
const ARC_FIELDS: usize = 8;
/// Numbers in an arc record carrying radial vectors.
const ARC_FIELDS_WITH_RADIALS: usize = 12;

/// Relative disagreement tolerated between cached radial vectors and the
/// vectors derived from the center.
const RADIAL_AGREEMENT: f64 = 1e-6;

/// Parses a whole profile, one record per line.
///
/// Blank lines and lines starting with `#` or `;` are skipped.
///
/// # Errors
///
/// Returns [`LatheCompError::MalformedSegment`](crate::LatheCompError) for
/// the first record that cannot be read. No partial profile is returned.
pub fn parse_profile(input: &str) -> Result<Profile> {
    let mut segments = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        if let Some(segment) = parse_record(idx + 1, raw)? {
            segments.push(segment);
        }
    }
    Ok(Profile::new(segments))
}

/// Parses one record. Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns [`LatheCompError::MalformedSegment`](crate::LatheCompError) if the
/// record type is unknown, a number is invalid, or fields are missing.
pub fn parse_record(line: usize, raw: &str) -> Result<Option<Segment>> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('#') || text.starts_with(';') {
        return Ok(None);
    }

    let mut tokens = text.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };
    let keyword = keyword.to_ascii_uppercase();
    let numbers = tokens
        .map(|token| parse_number(line, token))
        .collect::<std::result::Result<Vec<f64>, SegmentError>>()?;

    let segment = match keyword.as_str() {
        LINE => {
            if numbers.len() < LINE_FIELDS {
                return Err(SegmentError::TooFewFields {
                    line,
                    kind: LINE,
                    expected: LINE_FIELDS,
                    found: numbers.len(),
                }
                .into());
            }
            Segment::Line(LineSegment::new(
                xz(numbers[0], numbers[1]),
                xz(numbers[2], numbers[3]),
            ))
        }
        ARC_CW | ARC_CCW => {
            let kind = if keyword == ARC_CW { ARC_CW } else { ARC_CCW };
            Segment::Arc(parse_arc(line, kind, &numbers)?)
        }
        _ => {
            return Err(SegmentError::UnknownRecord {
                line,
                token: keyword,
            }
            .into())
        }
    };
    Ok(Some(segment))
}

fn parse_number(line: usize, token: &str) -> std::result::Result<f64, SegmentError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SegmentError::InvalidNumber {
            line,
            token: token.to_owned(),
        })
}

fn parse_arc(line: usize, kind: &'static str, n: &[f64]) -> Result<ArcSegment> {
    if n.len() == ARC_POINT_FIELDS {
        return Err(SegmentError::MissingArcCenter { line }.into());
    }
    if n.len() < ARC_FIELDS {
        return Err(SegmentError::TooFewFields {
            line,
            kind,
            expected: ARC_FIELDS,
            found: n.len(),
        }
        .into());
    }

    let arc = ArcSegment::new(
        xz(n[0], n[1]),
        xz(n[2], n[3]),
        xz(n[4], n[5]),
        xz(n[6], n[7]),
        kind == ARC_CW,
    );

    if n.len() >= ARC_FIELDS_WITH_RADIALS {
        let cached = (Vector2::new(n[8], n[9]), Vector2::new(n[10], n[11]));
        let (vs, ve) = arc.radial_vectors();
        let scale = arc.radius().max(1.0);
        if (cached.0 - vs).norm() > RADIAL_AGREEMENT * scale
            || (cached.1 - ve).norm() > RADIAL_AGREEMENT * scale
        {
            debug!(line, "radial vectors disagree with arc center; using center");
        }
    } else if n.len() > ARC_FIELDS {
        debug!(line, fields = n.len(), "incomplete radial vectors ignored");
    }

    Ok(arc)
}

/// Formats one segment as a record.
///
/// Arc records always carry the radial vectors derived from the final
/// geometry. `convention` decides which keyword a clockwise arc gets.
#[must_use]
pub fn format_segment(segment: &Segment, convention: ArcConvention) -> String {
    match segment {
        Segment::Line(l) => format!(
            "{LINE} {} {} {} {}",
            num(l.p1.x),
            num(l.p1.y),
            num(l.p2.x),
            num(l.p2.y)
        ),
        Segment::Arc(a) => {
            let clockwise = match convention {
                ArcConvention::LatheView => a.clockwise,
                ArcConvention::Mirrored => !a.clockwise,
            };
            let keyword = if clockwise { ARC_CW } else { ARC_CCW };
            let (vs, ve) = a.radial_vectors();
            let fields = [
                a.p1.x, a.p1.y, a.pm.x, a.pm.y, a.p2.x, a.p2.y, a.center.x, a.center.y, vs.x,
                vs.y, ve.x, ve.y,
            ];
            let numbers: Vec<String> = fields.iter().map(|&v| num(v).to_string()).collect();
            format!("{keyword} {}", numbers.join(" "))
        }
    }
}

/// Writes a compensated chain, one record per line.
#[must_use]
pub fn write_profile(segments: &[OffsetSegment], convention: ArcConvention) -> String {
    let mut out = String::new();
    for seg in segments {
        out.push_str(&format_segment(&seg.segment, convention));
        out.push('\n');
    }
    out
}

/// Shortest round-trip formatting, without a negative zero.
fn num(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}
