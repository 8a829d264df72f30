//! Core types for lifecycle runs

use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// Transition requested for every included resource in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Start,
    Stop,
}

impl Action {
    /// Verb used in log messages ("start")
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }

    /// Past participle used in log messages ("started")
    pub fn past_participle(&self) -> &'static str {
        match self {
            Self::Start => "started",
            Self::Stop => "stopped",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("START"),
            Self::Stop => f.write_str("STOP"),
        }
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "START" => Ok(Self::Start),
            "STOP" => Ok(Self::Stop),
            _ => Err(ParseError::UnknownAction(s.to_string())),
        }
    }
}

/// Severity of an outcome, mirroring the log levels the sink understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Closest `log` level; CRITICAL shares `Error` and is told apart by target
    pub fn level(&self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error | Self::Critical => log::Level::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(ParseError::UnknownLevel(s.to_string())),
        }
    }
}

/// What happened to one declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// A transition request was sent to the provider
    Requested,
    /// The resource was not in the state the action requires; nothing sent
    PreconditionNotMet,
    /// The declaration is marked `exclude`
    Excluded,
    /// No controller is registered for the declaration's type
    UnknownType,
    /// A provider error specific to this resource
    Failed,
}

impl OutcomeKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Requested | Self::Excluded => Severity::Info,
            Self::PreconditionNotMet => Severity::Warning,
            Self::UnknownType | Self::Failed => Severity::Error,
        }
    }
}

/// Result of handling one declaration: exactly one of these is reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub message: String,
}

impl Outcome {
    pub fn new(kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn requested(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Requested, message)
    }

    pub fn precondition_not_met(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::PreconditionNotMet, message)
    }

    pub fn excluded(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Excluded, message)
    }

    pub fn unknown_type(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::UnknownType, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Failed, message)
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

/// Per-kind counts of the outcomes produced by a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: usize,
    pub unchanged: usize,
    pub excluded: usize,
    pub unknown_type: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Total number of declarations processed
    pub fn total(&self) -> usize {
        self.requested + self.unchanged + self.excluded + self.unknown_type + self.failed
    }

    /// Whether every declaration was handled without an ERROR outcome
    pub fn is_clean(&self) -> bool {
        self.unknown_type == 0 && self.failed == 0
    }

    /// Add an outcome to the summary
    pub fn add(&mut self, outcome: &Outcome) {
        match outcome.kind {
            OutcomeKind::Requested => self.requested += 1,
            OutcomeKind::PreconditionNotMet => self.unchanged += 1,
            OutcomeKind::Excluded => self.excluded += 1,
            OutcomeKind::UnknownType => self.unknown_type += 1,
            OutcomeKind::Failed => self.failed += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requested, {} unchanged, {} excluded, {} unknown type, {} failed",
            self.requested, self.unchanged, self.excluded, self.unknown_type, self.failed
        )
    }
}
