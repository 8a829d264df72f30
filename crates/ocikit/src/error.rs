//! Error types for OCI operations.
//!
//! Errors are categorized so callers can decide whether a failure is
//! specific to one resource or will recur for every request in the run
//! (bad credentials, unreachable endpoint, missing CLI).

use serde::Deserialize;
use thiserror::Error;

/// Categories of OCI errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Credentials rejected or missing
    Authentication,
    /// Endpoint unreachable, DNS, TLS, timeouts
    Connectivity,
    /// Resource does not exist or is not visible to the caller
    NotFound,
    /// Request reached the service and was refused (conflict, bad request)
    Rejected,
    /// Provider configuration file missing or invalid
    Config,
    /// The `oci` CLI is not installed
    CliNotFound,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Whether a failure in this category will recur for every other resource
    /// in the same run.
    pub fn is_run_fatal(&self) -> bool {
        matches!(
            self,
            Self::Authentication | Self::Connectivity | Self::Config | Self::CliNotFound
        )
    }
}

/// Errors that can occur during OCI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials were rejected by the service
    #[error("authentication failed: {message}")]
    Authentication {
        /// Message returned by the service or CLI
        message: String,
    },

    /// The service could not be reached
    #[error("connectivity error: {message}")]
    Connectivity {
        /// Details of the failed connection
        message: String,
    },

    /// Resource not found or not authorized
    #[error("resource not found: {resource}")]
    NotFound {
        /// Identifier of the resource that was looked up
        resource: String,
    },

    /// The service refused the request
    #[error("request rejected ({status} {code}): {message}")]
    Rejected {
        /// HTTP status reported by the service
        status: u16,
        /// Service error code, e.g. `IncorrectState`
        code: String,
        /// Service error message
        message: String,
    },

    /// Provider configuration problem
    #[error("{0}")]
    Config(String),

    /// The `oci` CLI could not be found
    #[error("OCI CLI not found. Install it from https://docs.oracle.com/iaas/Content/API/SDKDocs/cliinstall.htm")]
    CliNotFound,

    /// Command execution failed
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output from the failed command
        stderr: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error document the CLI prints after `ServiceError:`.
#[derive(Debug, Deserialize)]
struct ServiceError {
    status: u16,
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Authentication { .. } => ErrorCategory::Authentication,
            Error::Connectivity { .. } => ErrorCategory::Connectivity,
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::Rejected { .. } => ErrorCategory::Rejected,
            Error::Config(_) => ErrorCategory::Config,
            Error::CliNotFound => ErrorCategory::CliNotFound,
            _ => ErrorCategory::Other,
        }
    }

    /// Whether this error should end the whole run.
    pub fn is_run_fatal(&self) -> bool {
        self.category().is_run_fatal()
    }

    /// Create an error from `oci` command output.
    ///
    /// Service errors carry a JSON document with an HTTP status, which is
    /// trusted first. Anything else is categorized from stderr text.
    pub fn from_cli_output(stderr: &str, resource: &str) -> Self {
        if let Some(service) = parse_service_error(stderr) {
            return match service.status {
                401 => Error::Authentication {
                    message: service.message,
                },
                404 => Error::NotFound {
                    resource: resource.to_string(),
                },
                _ => Error::Rejected {
                    status: service.status,
                    code: service.code,
                    message: service.message,
                },
            };
        }

        let stderr_lower = stderr.to_lowercase();
        let mentions = |phrases: &[&str]| phrases.iter().any(|p| stderr_lower.contains(p));

        if mentions(CONFIG_PHRASES) || is_profile_not_found(&stderr_lower) {
            return Error::Config(stderr.trim().to_string());
        }

        if mentions(AUTHENTICATION_PHRASES) {
            return Error::Authentication {
                message: stderr.trim().to_string(),
            };
        }

        if mentions(CONNECTIVITY_PHRASES) {
            return Error::Connectivity {
                message: stderr.trim().to_string(),
            };
        }

        Error::CommandFailed {
            message: format!("oci command failed for {resource}"),
            stderr: stderr.trim().to_string(),
        }
    }
}

/// CLI messages for an unusable config file (lowercase)
const CONFIG_PHRASES: &[&str] = &[
    "configfilenotfound",
    "could not find config file",
    "invalidconfig",
    "invalidkeyfilepath",
    "invalidprivatekey",
];

const AUTHENTICATION_PHRASES: &[&str] = &[
    "notauthenticated",
    "the required information to complete authentication",
];

/// Transport-level failures raised before any service response
const CONNECTIVITY_PHRASES: &[&str] = &[
    "requestexception",
    "max retries exceeded",
    "failed to establish a new connection",
    "connection refused",
    "connecttimeout",
    "name or service not known",
    "could not resolve host",
    "sslerror",
    "certificate verify failed",
];

/// `ProfileNotFound: Profile 'DEV' not found in config file ...`
fn is_profile_not_found(stderr_lower: &str) -> bool {
    stderr_lower.contains("profilenotfound")
        || stderr_lower
            .find("profile '")
            .is_some_and(|start| stderr_lower[start..].contains("' not found"))
}

fn parse_service_error(stderr: &str) -> Option<ServiceError> {
    let start = stderr.find('{')?;
    let end = stderr.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&stderr[start..=end]).ok()
}

/// Result type for OCI operations.
pub type Result<T> = std::result::Result<T, Error>;
