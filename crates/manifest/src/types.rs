//! Data types for the manifest crate

use serde::{Deserialize, Serialize};

/// A compartment and the resources declared in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Compartment {
    /// Compartment name, used for attribution in logs
    pub name: String,
    /// Declared resources, in processing order
    pub objects: Vec<ResourceDeclaration>,
}

/// A single resource declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDeclaration {
    /// Type tag selecting the controller (e.g., "compute_instance")
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Display name
    pub name: String,
    /// Provider-assigned identifier (an OCID)
    #[serde(alias = "ocid")]
    pub identifier: String,
    /// Skip this resource entirely
    #[serde(default)]
    pub exclude: bool,
}

impl ResourceDeclaration {
    pub fn new(resource_type: &str, name: &str, identifier: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            identifier: identifier.to_string(),
            exclude: false,
        }
    }

    pub fn excluded(mut self, exclude: bool) -> Self {
        self.exclude = exclude;
        self
    }
}
