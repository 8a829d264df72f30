//! MySQL HeatWave DB system controller

use crate::controller::{LifecycleState, ResourceController, Target};
use crate::types::{Action, Outcome};
use ocikit::{Backend, DbSystemState, ShutdownType};

/// Manifest type tag for MySQL DB systems
pub const TYPE_TAG: &str = "mysql_database";

/// Starts and stops MySQL DB systems
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlDatabase {
    /// Shutdown mode used for STOP
    pub shutdown: ShutdownType,
}

impl MysqlDatabase {
    pub fn with_shutdown(shutdown: ShutdownType) -> Self {
        Self { shutdown }
    }
}

impl ResourceController for MysqlDatabase {
    fn type_tag(&self) -> &'static str {
        TYPE_TAG
    }

    fn apply(
        &self,
        backend: &dyn Backend,
        target: &Target<'_>,
        action: Action,
    ) -> ocikit::Result<Outcome> {
        let db = backend.get_db_system(target.identifier)?;
        let state = db.lifecycle_state;

        if !state.permits(action) {
            return Ok(Outcome::precondition_not_met(format!(
                "MySQL database instance {} in compartment {} is in a {} state. It must be in {} state before it can be {}.",
                db.display_name,
                target.compartment,
                state,
                DbSystemState::precondition(action),
                action.past_participle()
            )));
        }

        match action {
            Action::Start => backend.start_db_system(target.identifier)?,
            Action::Stop => backend.stop_db_system(target.identifier, self.shutdown)?,
        }

        Ok(Outcome::requested(format!(
            "Request sent to {} MySQL database instance {} in compartment {}",
            action.verb(),
            db.display_name,
            target.compartment
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutcomeKind;
    use ocikit::MockBackend;
    use ocikit::mock::Call;

    const ID: &str = "ocid1.mysqldbsystem.oc1..bbbb";

    fn target() -> Target<'static> {
        Target {
            identifier: ID,
            name: "heatwave",
            compartment: "Prod",
        }
    }

    #[test]
    fn test_start_inactive_db_system() {
        let backend = MockBackend::new().with_db_system(ID, "heatwave", DbSystemState::Inactive);

        let outcome = MysqlDatabase::default()
            .apply(&backend, &target(), Action::Start)
            .unwrap();

        assert_eq!(outcome.kind, OutcomeKind::Requested);
        assert_eq!(
            outcome.message,
            "Request sent to start MySQL database instance heatwave in compartment Prod"
        );
        assert_eq!(backend.transitions(), vec![Call::StartDbSystem(ID.into())]);
    }

    #[test]
    fn test_stop_active_db_system_uses_fast_shutdown() {
        let backend = MockBackend::new().with_db_system(ID, "heatwave", DbSystemState::Active);

        MysqlDatabase::default()
            .apply(&backend, &target(), Action::Stop)
            .unwrap();

        assert_eq!(
            backend.transitions(),
            vec![Call::StopDbSystem(ID.into(), ShutdownType::Fast)]
        );
    }

    #[test]
    fn test_configured_shutdown_type_is_used() {
        let backend = MockBackend::new().with_db_system(ID, "heatwave", DbSystemState::Active);

        MysqlDatabase::with_shutdown(ShutdownType::Slow)
            .apply(&backend, &target(), Action::Stop)
            .unwrap();

        assert_eq!(
            backend.transitions(),
            vec![Call::StopDbSystem(ID.into(), ShutdownType::Slow)]
        );
    }

    #[test]
    fn test_stop_inactive_db_system_warns() {
        let backend = MockBackend::new().with_db_system(ID, "heatwave", DbSystemState::Inactive);

        let outcome = MysqlDatabase::default()
            .apply(&backend, &target(), Action::Stop)
            .unwrap();

        assert_eq!(outcome.kind, OutcomeKind::PreconditionNotMet);
        assert_eq!(
            outcome.message,
            "MySQL database instance heatwave in compartment Prod is in a INACTIVE state. It must be in an ACTIVE (started) state before it can be stopped."
        );
        assert!(backend.transitions().is_empty());
    }
}
