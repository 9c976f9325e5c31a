use crate::diagnostics::{Phase, Trace};
use crate::geometry::OffsetSegment;

/// Removes segments of length `min_length` or less.
///
/// After a removal the next retained segment is snapped onto the end of the
/// previous retained one and measured again, so a snap that shortens it can
/// cascade into another removal. Running the pass on its own output changes
/// nothing.
pub fn remove_short(
    chain: &[OffsetSegment],
    min_length: f64,
    trace: &mut Trace,
) -> Vec<OffsetSegment> {
    let mut out: Vec<OffsetSegment> = Vec::with_capacity(chain.len());
    let mut dropped = false;

    for (i, seg) in chain.iter().enumerate() {
        let seg = match out.last() {
            Some(prev) if dropped => seg.replaced(seg.segment.with_start(prev.segment.end())),
            _ => *seg,
        };

        let length = seg.segment.length();
        if length <= min_length {
            trace.note(
                Phase::Cleanup,
                format!("segment {i} ({}): removed, length {length:.5}", seg.segment.kind()),
            );
            dropped = true;
            continue;
        }

        out.push(seg);
        dropped = false;
    }

    if out.is_empty() && !chain.is_empty() {
        trace.warn(Phase::Cleanup, "every segment was removed");
    }
    out
}

/// Removes the raw offsets of arcs that collapsed, by input index.
///
/// Runs before corners are joined, so the neighbours of a collapsed arc
/// meet each other directly instead of a point on the clamped circle.
pub fn remove_collapsed(
    raw: &[OffsetSegment],
    collapsed: &[usize],
    trace: &mut Trace,
) -> Vec<OffsetSegment> {
    raw.iter()
        .enumerate()
        .filter(|(i, _)| {
            let drop = collapsed.contains(i);
            if drop {
                trace.note(Phase::Cleanup, format!("segment {i} (collapsed arc): removed"));
            }
            !drop
        })
        .map(|(_, seg)| *seg)
        .collect()
}
