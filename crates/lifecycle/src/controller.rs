//! Resource controller trait and state gating
//!
//! A controller knows one kind of resource. Given a provider handle it reads
//! the resource's lifecycle state, checks the state against the requested
//! action, and sends at most one transition request.

use crate::types::{Action, Outcome};
use manifest::{Compartment, ResourceDeclaration};
use ocikit::{Backend, ComputeState, DbSystemState};
use std::fmt;

/// The declaration a controller is acting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    /// Provider identifier (OCID)
    pub identifier: &'a str,
    /// Display name from the manifest
    pub name: &'a str,
    /// Owning compartment's name
    pub compartment: &'a str,
}

impl<'a> Target<'a> {
    pub fn new(decl: &'a ResourceDeclaration, compartment: &'a Compartment) -> Self {
        Self {
            identifier: &decl.identifier,
            name: &decl.name,
            compartment: &compartment.name,
        }
    }
}

/// Core trait for a resource kind
///
/// Implementations must:
/// 1. Fetch the current state from the backend (errors propagate)
/// 2. Return a `PreconditionNotMet` outcome, without any further calls, when
///    the state does not permit the action
/// 3. Otherwise send exactly one transition request and return `Requested`
pub trait ResourceController: Send + Sync + fmt::Debug {
    /// Manifest type tag this controller handles (e.g., "compute_instance")
    fn type_tag(&self) -> &'static str;

    /// Apply `action` to the resource described by `target`
    fn apply(
        &self,
        backend: &dyn Backend,
        target: &Target<'_>,
        action: Action,
    ) -> ocikit::Result<Outcome>;
}

/// A boxed controller for type-erased storage
pub type BoxedController = Box<dyn ResourceController>;

/// The gate between a lifecycle state and an action
pub trait LifecycleState: fmt::Display + Copy {
    /// Whether the resource may be sent `action` from this state
    fn permits(&self, action: Action) -> bool;

    /// The state `action` requires, phrased for a log message ("a STOPPED")
    fn precondition(action: Action) -> &'static str;
}

impl LifecycleState for ComputeState {
    fn permits(&self, action: Action) -> bool {
        match action {
            Action::Start => *self == ComputeState::Stopped,
            Action::Stop => *self == ComputeState::Running,
        }
    }

    fn precondition(action: Action) -> &'static str {
        match action {
            Action::Start => "a STOPPED",
            Action::Stop => "a RUNNING",
        }
    }
}

impl LifecycleState for DbSystemState {
    fn permits(&self, action: Action) -> bool {
        match action {
            Action::Start => *self == DbSystemState::Inactive,
            Action::Stop => *self == DbSystemState::Active,
        }
    }

    fn precondition(action: Action) -> &'static str {
        match action {
            Action::Start => "an INACTIVE (stopped)",
            Action::Stop => "an ACTIVE (started)",
        }
    }
}
