use std::collections::HashMap;

use crate::{
    component::Component,
    container::DiContainer,
    errors::InitError,
    initiator::DiInitiator,
    registry::DeclarationRegistry,
    types::{Injectable, Instance, TypeInfo},
};

/// Collects everything the container should manage
///
/// 1. Declare components and add pre built instances
/// 2. [DiBuilder::build] constructs every managed component, then fills their injection targets
pub struct DiBuilder {
    /// Declared components, in declaration order
    pub(crate) registry: DeclarationRegistry,
    /// Registered already created instances
    pub(crate) registered_instances: HashMap<TypeInfo, Instance>,
}
impl Default for DiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiBuilder {
    pub fn new() -> Self {
        DiBuilder {
            registry: DeclarationRegistry::new(),
            registered_instances: HashMap::new(),
        }
    }
}
impl DiBuilder {
    /// Declares a component, it is only instantiated if it carries a layer
    pub fn register<C: Component>(mut self) -> Self {
        self.registry.declare::<C>();
        self
    }

    /// Adds an already constructed value, the first value of a type wins
    pub fn add_instance<T: Injectable>(mut self, instance: T) -> Self {
        self.registered_instances
            .entry(TypeInfo::of::<T>())
            .or_insert_with(|| Instance::new(instance));
        self
    }

    pub fn registry(&self) -> &DeclarationRegistry {
        &self.registry
    }

    pub fn build(self) -> Result<DiContainer, InitError> {
        DiInitiator::new().initiate(self)
    }
}
