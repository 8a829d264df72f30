//! Outcome reporting
//!
//! Controllers and the walker never touch the global logger directly. They
//! hand events to a [`Reporter`], so a run can be observed in tests with
//! [`MemoryReporter`] and in production with [`LogReporter`].

use crate::types::Severity;

/// `log` target used for CRITICAL events, which `log` has no level for
pub const CRITICAL_TARGET: &str = "critical";

/// Sink for run events
pub trait Reporter {
    /// Record one event
    fn report(&mut self, severity: Severity, message: &str);
}

/// Forwards events to the `log` facade
///
/// The logger must be initialized before the first event; anything emitted
/// earlier is dropped by `log`.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Critical => log::error!(target: CRITICAL_TARGET, "{message}"),
            other => log::log!(other.level(), "{message}"),
        }
    }
}

/// Keeps events in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Vec<(Severity, String)>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events, in the order they were reported
    pub fn events(&self) -> &[(Severity, String)] {
        &self.events
    }

    /// Messages reported at `severity`
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.events
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    /// Number of events reported at `severity`
    pub fn count(&self, severity: Severity) -> usize {
        self.events.iter().filter(|(s, _)| *s == severity).count()
    }

    /// Events whose message mentions `needle`
    pub fn mentioning(&self, needle: &str) -> Vec<&(Severity, String)> {
        self.events.iter().filter(|(_, m)| m.contains(needle)).collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, severity: Severity, message: &str) {
        self.events.push((severity, message.to_string()));
    }
}
