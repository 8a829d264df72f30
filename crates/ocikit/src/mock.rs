//! In-memory backend for tests.
//!
//! [`MockBackend`] holds a fixed set of instances and DB systems, records
//! every call made against it, and can be told to fail for a given
//! identifier with an error of a chosen category.

use crate::backend::Backend;
use crate::error::{Error, ErrorCategory, Result};
use crate::types::{
    ComputeState, DbSystem, DbSystemState, Instance, InstanceAction, ShutdownType,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetInstance(String),
    InstanceAction(String, InstanceAction),
    GetDbSystem(String),
    StartDbSystem(String),
    StopDbSystem(String, ShutdownType),
}

impl Call {
    /// Whether this call asks the service to change a resource's state.
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Self::InstanceAction(..) | Self::StartDbSystem(_) | Self::StopDbSystem(..)
        )
    }

    /// Identifier the call was made for.
    pub fn resource_id(&self) -> &str {
        match self {
            Self::GetInstance(id)
            | Self::InstanceAction(id, _)
            | Self::GetDbSystem(id)
            | Self::StartDbSystem(id)
            | Self::StopDbSystem(id, _) => id,
        }
    }
}

/// Backend serving canned resources from memory.
#[derive(Debug, Default)]
pub struct MockBackend {
    instances: HashMap<String, Instance>,
    db_systems: HashMap<String, DbSystem>,
    failures: HashMap<String, ErrorCategory>,
    calls: Mutex<Vec<Call>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a compute instance.
    pub fn with_instance(mut self, id: &str, display_name: &str, state: ComputeState) -> Self {
        self.instances.insert(
            id.to_string(),
            Instance {
                id: id.to_string(),
                display_name: display_name.to_string(),
                lifecycle_state: state,
            },
        );
        self
    }

    /// Add a MySQL DB system.
    pub fn with_db_system(mut self, id: &str, display_name: &str, state: DbSystemState) -> Self {
        self.db_systems.insert(
            id.to_string(),
            DbSystem {
                id: id.to_string(),
                display_name: display_name.to_string(),
                lifecycle_state: state,
            },
        );
        self
    }

    /// Make every call for `id` fail with an error of `category`.
    pub fn failing(mut self, id: &str, category: ErrorCategory) -> Self {
        self.failures.insert(id.to_string(), category);
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock_calls().clone()
    }

    /// Calls received for one identifier.
    pub fn calls_for(&self, id: &str) -> Vec<Call> {
        self.lock_calls()
            .iter()
            .filter(|c| c.resource_id() == id)
            .cloned()
            .collect()
    }

    /// State-changing calls received so far.
    pub fn transitions(&self) -> Vec<Call> {
        self.lock_calls()
            .iter()
            .filter(|c| c.is_transition())
            .cloned()
            .collect()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<Call>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn record(&self, call: Call) -> Result<()> {
        let id = call.resource_id().to_string();
        self.lock_calls().push(call);

        match self.failures.get(&id) {
            Some(category) => Err(error_for(*category, &id)),
            None => Ok(()),
        }
    }
}

fn error_for(category: ErrorCategory, id: &str) -> Error {
    match category {
        ErrorCategory::Authentication => Error::Authentication {
            message: "mock credentials rejected".to_string(),
        },
        ErrorCategory::Connectivity => Error::Connectivity {
            message: "mock endpoint unreachable".to_string(),
        },
        ErrorCategory::NotFound => Error::NotFound {
            resource: id.to_string(),
        },
        ErrorCategory::Rejected => Error::Rejected {
            status: 409,
            code: "IncorrectState".to_string(),
            message: "mock conflict".to_string(),
        },
        ErrorCategory::Config => Error::Config("mock config invalid".to_string()),
        ErrorCategory::CliNotFound => Error::CliNotFound,
        ErrorCategory::Other => Error::CommandFailed {
            message: format!("mock failure for {id}"),
            stderr: String::new(),
        },
    }
}

impl Backend for MockBackend {
    fn get_instance(&self, instance_id: &str) -> Result<Instance> {
        self.record(Call::GetInstance(instance_id.to_string()))?;
        self.instances
            .get(instance_id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                resource: instance_id.to_string(),
            })
    }

    fn instance_action(&self, instance_id: &str, action: InstanceAction) -> Result<()> {
        self.record(Call::InstanceAction(instance_id.to_string(), action))
    }

    fn get_db_system(&self, db_system_id: &str) -> Result<DbSystem> {
        self.record(Call::GetDbSystem(db_system_id.to_string()))?;
        self.db_systems
            .get(db_system_id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                resource: db_system_id.to_string(),
            })
    }

    fn start_db_system(&self, db_system_id: &str) -> Result<()> {
        self.record(Call::StartDbSystem(db_system_id.to_string()))
    }

    fn stop_db_system(&self, db_system_id: &str, shutdown: ShutdownType) -> Result<()> {
        self.record(Call::StopDbSystem(db_system_id.to_string(), shutdown))
    }
}
