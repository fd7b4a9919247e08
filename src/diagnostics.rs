//! Explicitly wired diagnostics.
//!
//! The core never reaches for ambient global logging; whoever constructs the
//! input coordinator or host loop passes a sink in. The conditions reported
//! here are recovered locally and never surfaced to the end user.

/// Conditions the core recovers from but wants recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A pan/zoom produced a non-finite intermediate; the update was dropped
    /// and the previous camera state kept.
    DegenerateViewportUpdate { op: &'static str },
    /// A randomize request was rejected for exceeding the iteration cap.
    RandomizeRejected { cells: u64 },
}

pub trait DiagnosticsSink: Send + Sync {
    fn report(&self, event: Diagnostic);
}

/// Swallows everything; for tests and headless use.
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn report(&self, _event: Diagnostic) {}
}

/// Forwards events to `tracing`; the host decides whether a subscriber is
/// installed.
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&self, event: Diagnostic) {
        match event {
            Diagnostic::DegenerateViewportUpdate { op } => {
                tracing::warn!(op, "discarded non-finite viewport update");
            }
            Diagnostic::RandomizeRejected { cells } => {
                tracing::warn!(cells, "randomize region rejected as too large");
            }
        }
    }
}
