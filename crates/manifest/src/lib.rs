//! # Manifest
//!
//! The infrastructure manifest: which compartments exist and which resources
//! in each of them take part in a run.
//!
//! Manifests are JSON by default. A file with a `.toml` extension is read as
//! TOML with the same shape.
//!
//! ```json
//! {
//!   "compartments": [
//!     {
//!       "name": "Prod",
//!       "objects": [
//!         { "type": "compute_instance", "name": "web-1", "ocid": "ocid1.instance.oc1..aaaa", "exclude": false },
//!         { "type": "mysql_database", "name": "heatwave", "ocid": "ocid1.mysqldbsystem.oc1..bbbb", "exclude": true }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use manifest::Manifest;
//! use std::path::Path;
//!
//! let manifest = Manifest::load(Path::new("./infra.json"))?;
//! for (compartment, decl) in manifest.declarations() {
//!     println!("{}: {} {}", compartment.name, decl.resource_type, decl.name);
//! }
//! # Ok::<(), manifest::Error>(())
//! ```

mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Compartment, ResourceDeclaration};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Default manifest location, relative to the working directory
pub const DEFAULT_MANIFEST: &str = "./infra.json";

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Pick the format from a file extension; anything but `.toml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// The root document: compartments in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub compartments: Vec<Compartment>,
}

impl Manifest {
    /// Load and validate a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, Format::from_path(path))
    }

    /// Parse and validate manifest content
    pub fn parse(content: &str, format: Format) -> Result<Self> {
        let manifest: Self = match format {
            Format::Json => serde_json::from_str(content)?,
            Format::Toml => toml::from_str(content)?,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for compartment in &self.compartments {
            if !seen.insert(compartment.name.as_str()) {
                return Err(Error::Invalid(format!(
                    "compartment '{}' is declared more than once",
                    compartment.name
                )));
            }
        }
        Ok(())
    }

    /// Every declaration with its compartment, in manifest order
    pub fn declarations(&self) -> impl Iterator<Item = (&Compartment, &ResourceDeclaration)> {
        self.compartments
            .iter()
            .flat_map(|c| c.objects.iter().map(move |o| (c, o)))
    }

    /// Total number of declarations, excluded ones included
    pub fn len(&self) -> usize {
        self.compartments.iter().map(|c| c.objects.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
