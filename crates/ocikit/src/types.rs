//! Core types for OCI lifecycle management.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a compute instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComputeState {
    /// Instance is being moved between hosts
    Moving,
    /// Instance is being provisioned
    Provisioning,
    /// Instance is running
    Running,
    /// Instance is starting
    Starting,
    /// Instance is stopping
    Stopping,
    /// Instance is stopped
    Stopped,
    /// An image is being created from the instance
    CreatingImage,
    /// Instance is being terminated
    Terminating,
    /// Instance is terminated
    Terminated,
    /// A state this crate does not know about yet
    #[serde(other)]
    Unknown,
}

impl ComputeState {
    /// Name of the state as the service reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moving => "MOVING",
            Self::Provisioning => "PROVISIONING",
            Self::Running => "RUNNING",
            Self::Starting => "STARTING",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::CreatingImage => "CREATING_IMAGE",
            Self::Terminating => "TERMINATING",
            Self::Terminated => "TERMINATED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ComputeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a MySQL DB system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DbSystemState {
    /// DB system is being created
    Creating,
    /// DB system is running
    Active,
    /// DB system is stopped
    Inactive,
    /// DB system is being updated (includes start/stop in progress)
    Updating,
    /// DB system is being deleted
    Deleting,
    /// DB system is deleted
    Deleted,
    /// DB system is in a failed state
    Failed,
    /// A state this crate does not know about yet
    #[serde(other)]
    Unknown,
}

impl DbSystemState {
    /// Name of the state as the service reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creating => "CREATING",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Updating => "UPDATING",
            Self::Deleting => "DELETING",
            Self::Deleted => "DELETED",
            Self::Failed => "FAILED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DbSystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compute instance as returned by `oci compute instance get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Instance {
    /// OCID of the instance
    pub id: String,
    /// User-facing name
    pub display_name: String,
    /// Current lifecycle state
    pub lifecycle_state: ComputeState,
}

/// A MySQL DB system as returned by `oci mysql db-system get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DbSystem {
    /// OCID of the DB system
    pub id: String,
    /// User-facing name
    pub display_name: String,
    /// Current lifecycle state
    pub lifecycle_state: DbSystemState,
}

/// Power action for a compute instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceAction {
    /// Power on
    Start,
    /// Power off
    Stop,
}

impl InstanceAction {
    /// Value passed to `--action`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Stop => "STOP",
        }
    }
}

impl fmt::Display for InstanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a MySQL DB system is shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShutdownType {
    /// Flush dirty pages, skip purge and change buffer merge
    #[default]
    Fast,
    /// Full purge and change buffer merge before stopping
    Slow,
    /// No flush; crash recovery on next start
    Immediate,
}

impl ShutdownType {
    /// Value passed to `--shutdown-type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "FAST",
            Self::Slow => "SLOW",
            Self::Immediate => "IMMEDIATE",
        }
    }
}

impl fmt::Display for ShutdownType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response envelope the CLI wraps around every resource.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_from_cli_json() {
        let json = r#"{
            "data": {
                "availability-domain": "Uocm:PHX-AD-1",
                "display-name": "web-1",
                "id": "ocid1.instance.oc1..aaaa",
                "lifecycle-state": "STOPPED",
                "shape": "VM.Standard.E4.Flex"
            },
            "etag": "abc"
        }"#;
        let envelope: Envelope<Instance> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.display_name, "web-1");
        assert_eq!(envelope.data.lifecycle_state, ComputeState::Stopped);
    }

    #[test]
    fn test_db_system_from_cli_json() {
        let json = r#"{"data": {"display-name": "heatwave", "id": "ocid1.mysqldbsystem.oc1..bbbb", "lifecycle-state": "INACTIVE"}}"#;
        let envelope: Envelope<DbSystem> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.lifecycle_state, DbSystemState::Inactive);
    }

    #[test]
    fn test_unrecognized_state_is_unknown() {
        let state: ComputeState = serde_json::from_str("\"HIBERNATING\"").unwrap();
        assert_eq!(state, ComputeState::Unknown);
        let state: DbSystemState = serde_json::from_str("\"MIGRATING\"").unwrap();
        assert_eq!(state, DbSystemState::Unknown);
    }

    #[test]
    fn test_state_display_matches_service_names() {
        assert_eq!(ComputeState::CreatingImage.to_string(), "CREATING_IMAGE");
        let parsed: ComputeState = serde_json::from_str("\"CREATING_IMAGE\"").unwrap();
        assert_eq!(parsed, ComputeState::CreatingImage);
        assert_eq!(DbSystemState::Inactive.to_string(), "INACTIVE");
    }

    #[test]
    fn test_default_shutdown_is_fast() {
        assert_eq!(ShutdownType::default(), ShutdownType::Fast);
    }
}
