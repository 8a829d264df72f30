//! # ocikit
//!
//! Lifecycle operations for Oracle Cloud Infrastructure resources.
//!
//! This crate provides:
//! - Typed lifecycle states for compute instances and MySQL DB systems
//! - A [`Backend`] trait covering the get/start/stop calls a power schedule needs
//! - [`OciCli`], a backend driving the `oci` command-line tool
//! - [`MockBackend`], an in-memory backend that records calls, for tests
//! - Errors categorized by whether they are specific to one resource or
//!   fatal to a whole run
//!
//! ## Example
//!
//! ```no_run
//! use ocikit::{Backend, ComputeState, InstanceAction, OciCli};
//!
//! let oci = OciCli::new(None, None)?;
//! let instance = oci.get_instance("ocid1.instance.oc1..example")?;
//! if instance.lifecycle_state == ComputeState::Stopped {
//!     oci.instance_action(&instance.id, InstanceAction::Start)?;
//! }
//! # Ok::<(), ocikit::Error>(())
//! ```

#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod mock;
pub mod types;

pub use backend::Backend;
pub use backend::oci::OciCli;
pub use error::{Error, ErrorCategory, Result};
pub use mock::MockBackend;
pub use types::{
    ComputeState, DbSystem, DbSystemState, Instance, InstanceAction, ShutdownType,
};
