//! Error types for lifecycle runs

use thiserror::Error;

/// Invalid run parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown action {0}.")]
    UnknownAction(String),

    #[error("Unknown logging level: {0}.")]
    UnknownLevel(String),
}

/// A failure that ends the walk early
#[derive(Error, Debug)]
pub enum WalkError {
    /// A provider error that would recur for every remaining resource
    #[error("run aborted at {resource_type} {name} in compartment {compartment}")]
    Aborted {
        compartment: String,
        name: String,
        resource_type: String,
        #[source]
        source: ocikit::Error,
    },
}
