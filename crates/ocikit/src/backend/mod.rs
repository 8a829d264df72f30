//! Backend abstraction for OCI operations.
//!
//! The [`Backend`] trait is the provider handle the rest of the workspace
//! works against, allowing for different implementations (the real `oci`
//! CLI, or [`crate::mock::MockBackend`] for testing).

pub mod oci;

use crate::error::Result;
use crate::types::{DbSystem, Instance, InstanceAction, ShutdownType};

/// Backend trait for OCI lifecycle operations.
///
/// Every call is synchronous. Transition calls return once the service has
/// accepted the request, not when the resource has reached its new state.
pub trait Backend: Send + Sync {
    /// Fetch a compute instance.
    fn get_instance(&self, instance_id: &str) -> Result<Instance>;

    /// Send a power action to a compute instance.
    fn instance_action(&self, instance_id: &str, action: InstanceAction) -> Result<()>;

    /// Fetch a MySQL DB system.
    fn get_db_system(&self, db_system_id: &str) -> Result<DbSystem>;

    /// Start a MySQL DB system.
    fn start_db_system(&self, db_system_id: &str) -> Result<()>;

    /// Stop a MySQL DB system.
    fn stop_db_system(&self, db_system_id: &str, shutdown: ShutdownType) -> Result<()>;
}
