//! Human-readable run trace.
//!
//! Every entry is also emitted as a `tracing` event so hosts that install a
//! subscriber see the same story in their logs.

use tracing::{debug, warn};

use crate::error::Recovery;

/// Pipeline phase an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Classify,
    Offset,
    Join,
    Cleanup,
    Direction,
    Quadrant,
    Result,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Parse => "parse",
            Self::Classify => "classify",
            Self::Offset => "offset",
            Self::Join => "join",
            Self::Cleanup => "cleanup",
            Self::Direction => "direction",
            Self::Quadrant => "quadrant",
            Self::Result => "result",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub phase: Phase,
    pub message: String,
}

/// Ordered diagnostic log of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
    recoveries: Vec<Recovery>,
}

impl Trace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an informational entry.
    pub fn note(&mut self, phase: Phase, message: impl Into<String>) {
        let message = message.into();
        debug!(%phase, "{message}");
        self.entries.push(TraceEntry { phase, message });
    }

    /// Records an entry describing a local recovery.
    pub fn warn(&mut self, phase: Phase, message: impl Into<String>) {
        let message = message.into();
        warn!(%phase, "{message}");
        self.entries.push(TraceEntry { phase, message });
    }

    /// Records a local recovery, both as a typed value and as a message.
    pub fn recover(&mut self, phase: Phase, recovery: Recovery) {
        self.warn(phase, recovery.to_string());
        self.recoveries.push(recovery);
    }

    #[must_use]
    pub fn recoveries(&self) -> &[Recovery] {
        &self.recoveries
    }

    #[must_use]
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Messages recorded for one phase, in order.
    pub fn phase(&self, phase: Phase) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.phase == phase)
            .map(|e| e.message.as_str())
    }

    /// All entries rendered as `"[phase] message"`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("[{}] {}", e.phase, e.message))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_order_and_phase() {
        let mut trace = Trace::new();
        trace.note(Phase::Parse, "3 segments");
        trace.warn(Phase::Join, "corner 1: snapped");
        trace.note(Phase::Parse, "no gaps");

        assert_eq!(trace.entries().len(), 3);
        let parse: Vec<&str> = trace.phase(Phase::Parse).collect();
        assert_eq!(parse, vec!["3 segments", "no gaps"]);
        assert_eq!(trace.lines()[1], "[join] corner 1: snapped");
        assert!(trace.recoveries().is_empty());
    }

    #[test]
    fn recoveries_are_typed_and_logged() {
        let mut trace = Trace::new();
        trace.recover(Phase::Direction, Recovery::AmbiguousArcDirection { segment: 2 });
        assert_eq!(trace.recoveries().len(), 1);
        assert_eq!(
            trace.lines(),
            vec!["[direction] segment 2: arc direction ambiguous, kept".to_owned()]
        );
    }
}
