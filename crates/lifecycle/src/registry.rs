//! Controller registry - routes a declaration's type tag to its controller

use crate::controller::{BoxedController, Target};
use crate::kinds::{ComputeInstance, MysqlDatabase};
use crate::types::{Action, Outcome};
use ocikit::Backend;
use std::collections::BTreeMap;

/// Controllers keyed by manifest type tag
#[derive(Debug, Default)]
pub struct Registry {
    controllers: BTreeMap<&'static str, BoxedController>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in kinds (`compute_instance`, `mysql_database`)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ComputeInstance));
        registry.register(Box::new(MysqlDatabase::default()));
        registry
    }

    /// Add a controller, returning the one it replaces for the same tag
    pub fn register(&mut self, controller: BoxedController) -> Option<BoxedController> {
        self.controllers.insert(controller.type_tag(), controller)
    }

    /// Registered type tags, sorted
    pub fn type_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.controllers.keys().copied()
    }

    /// Hand the declaration to the controller for `type_tag`
    ///
    /// An unknown tag yields an `UnknownType` outcome without touching the
    /// backend. Provider errors from a known controller are returned as-is.
    pub fn route(
        &self,
        type_tag: &str,
        backend: &dyn Backend,
        target: &Target<'_>,
        action: Action,
    ) -> ocikit::Result<Outcome> {
        match self.controllers.get(type_tag) {
            Some(controller) => controller.apply(backend, target, action),
            None => Ok(Outcome::unknown_type(format!(
                "Attempt to process an unknown type: {} ({} in compartment {})",
                type_tag, target.name, target.compartment
            ))),
        }
    }
}
