//! Compute instance controller

use crate::controller::{LifecycleState, ResourceController, Target};
use crate::types::{Action, Outcome};
use ocikit::{Backend, ComputeState, InstanceAction};

/// Manifest type tag for compute instances
pub const TYPE_TAG: &str = "compute_instance";

/// Starts and stops compute instances with the instance power action
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeInstance;

impl ResourceController for ComputeInstance {
    fn type_tag(&self) -> &'static str {
        TYPE_TAG
    }

    fn apply(
        &self,
        backend: &dyn Backend,
        target: &Target<'_>,
        action: Action,
    ) -> ocikit::Result<Outcome> {
        let instance = backend.get_instance(target.identifier)?;
        let state = instance.lifecycle_state;

        if !state.permits(action) {
            return Ok(Outcome::precondition_not_met(format!(
                "Compute instance {} in compartment {} is in a {} state. It must be in {} state before it can be {}.",
                instance.display_name,
                target.compartment,
                state,
                ComputeState::precondition(action),
                action.past_participle()
            )));
        }

        let power = match action {
            Action::Start => InstanceAction::Start,
            Action::Stop => InstanceAction::Stop,
        };
        backend.instance_action(target.identifier, power)?;

        Ok(Outcome::requested(format!(
            "Request sent to {} compute instance {} in compartment {}",
            action.verb(),
            instance.display_name,
            target.compartment
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutcomeKind;
    use ocikit::mock::Call;
    use ocikit::{ErrorCategory, MockBackend};

    const ID: &str = "ocid1.instance.oc1..aaaa";

    fn target() -> Target<'static> {
        Target {
            identifier: ID,
            name: "web-1",
            compartment: "Prod",
        }
    }

    #[test]
    fn test_start_stopped_instance_sends_one_request() {
        let backend = MockBackend::new().with_instance(ID, "web-1", ComputeState::Stopped);

        let outcome = ComputeInstance
            .apply(&backend, &target(), Action::Start)
            .unwrap();

        assert_eq!(outcome.kind, OutcomeKind::Requested);
        assert_eq!(
            outcome.message,
            "Request sent to start compute instance web-1 in compartment Prod"
        );
        assert_eq!(
            backend.transitions(),
            vec![Call::InstanceAction(ID.into(), InstanceAction::Start)]
        );
    }

    #[test]
    fn test_stop_running_instance_sends_one_request() {
        let backend = MockBackend::new().with_instance(ID, "web-1", ComputeState::Running);

        let outcome = ComputeInstance
            .apply(&backend, &target(), Action::Stop)
            .unwrap();

        assert_eq!(outcome.kind, OutcomeKind::Requested);
        assert_eq!(
            backend.transitions(),
            vec![Call::InstanceAction(ID.into(), InstanceAction::Stop)]
        );
    }

    #[test]
    fn test_start_running_instance_warns_without_request() {
        let backend = MockBackend::new().with_instance(ID, "web-1", ComputeState::Running);

        let outcome = ComputeInstance
            .apply(&backend, &target(), Action::Start)
            .unwrap();

        assert_eq!(outcome.kind, OutcomeKind::PreconditionNotMet);
        assert_eq!(
            outcome.message,
            "Compute instance web-1 in compartment Prod is in a RUNNING state. It must be in a STOPPED state before it can be started."
        );
        assert!(backend.transitions().is_empty());
    }

    #[test]
    fn test_stop_transitional_instance_warns_without_request() {
        let backend = MockBackend::new().with_instance(ID, "web-1", ComputeState::Starting);

        let outcome = ComputeInstance
            .apply(&backend, &target(), Action::Stop)
            .unwrap();

        assert_eq!(outcome.kind, OutcomeKind::PreconditionNotMet);
        assert!(outcome.message.contains("STARTING"));
        assert!(outcome.message.contains("a RUNNING state"));
        assert!(backend.transitions().is_empty());
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let backend = MockBackend::new();

        let err = ComputeInstance
            .apply(&backend, &target(), Action::Start)
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(backend.transitions().is_empty());
    }
}
