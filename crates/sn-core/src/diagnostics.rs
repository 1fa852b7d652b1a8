//! Structured diagnostics sink.
//!
//! Every recoverable data problem and every noteworthy adjustment is recorded
//! here instead of aborting. Recording an event also emits it through `tracing`,
//! so a subscriber sees the same stream the caller gets back in its report.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    Info,
    Warning,
}

/// Machine-readable kind of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticCode {
    // Topology
    SelfLoopRepaired,
    LinkPruned,
    NodePruned,
    InletPruned,
    InletSplit,
    InletNotSplit,
    InletOffNetwork,
    InletMissingGeometry,
    AmbiguousSplit,
    OutfallClassified,
    // Tracing
    MissingReference,
    CycleDetected,
    BranchLimitReached,
    // Interpolation
    ElevationInterpolated,
    MonotonicityAdjusted,
    RimDepthFallback,
    MinDepthClamped,
    ElevationUnresolved,
    // Slopes
    NegativeSlope,
    SlopeSkipped,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    pub level: Level,
    pub code: DiagnosticCode,
    /// Id of the node or link the event is about.
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, code: DiagnosticCode, subject: impl Into<String>, message: impl Into<String>) {
        let subject = subject.into();
        let message = message.into();
        tracing::debug!(?code, subject = %subject, "{message}");
        self.push(Level::Info, code, subject, message);
    }

    pub fn warn(&mut self, code: DiagnosticCode, subject: impl Into<String>, message: impl Into<String>) {
        let subject = subject.into();
        let message = message.into();
        tracing::warn!(?code, subject = %subject, "{message}");
        self.push(Level::Warning, code, subject, message);
    }

    fn push(&mut self, level: Level, code: DiagnosticCode, subject: String, message: String) {
        self.events.push(Diagnostic {
            level,
            code,
            subject,
            message,
        });
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Diagnostic> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events with the given code.
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.events.iter().filter(|d| d.code == code).count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter().filter(|d| d.level == Level::Warning)
    }

    /// Subjects of all events with the given code, in recording order.
    pub fn subjects(&self, code: DiagnosticCode) -> Vec<&str> {
        self.events
            .iter()
            .filter(|d| d.code == code)
            .map(|d| d.subject.as_str())
            .collect()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.events.extend(other.events);
    }
}
