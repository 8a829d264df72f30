//! # Lifecycle
//!
//! State-gated START/STOP of declared cloud resources.
//!
//! ## Core Concepts
//!
//! - **ResourceController**: Knows one resource kind. Reads the current
//!   lifecycle state and sends a transition only when the state permits it
//! - **Registry**: Routes a declaration's type tag to its controller
//! - **walk**: Visits every declaration in manifest order, isolating
//!   per-resource failures
//! - **Reporter**: Receives one outcome per declaration plus run-level events
//!
//! ## Example
//!
//! ```no_run
//! use lifecycle::{Action, LogReporter, Registry, walk};
//! use manifest::Manifest;
//! use ocikit::OciCli;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = Manifest::load(Path::new("infra.json"))?;
//! let backend = OciCli::new(None, None)?;
//! let summary = walk(
//!     &manifest,
//!     Action::Stop,
//!     &backend,
//!     &Registry::with_defaults(),
//!     &mut LogReporter,
//! )?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod controller;
pub mod error;
pub mod kinds;
pub mod registry;
pub mod reporter;
pub mod types;
pub mod walker;

pub use controller::{BoxedController, LifecycleState, ResourceController, Target};
pub use error::{ParseError, WalkError};
pub use registry::Registry;
pub use reporter::{CRITICAL_TARGET, LogReporter, MemoryReporter, Reporter};
pub use types::{Action, Outcome, OutcomeKind, RunSummary, Severity};
pub use walker::walk;
