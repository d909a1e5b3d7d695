use std::{
    any::{type_name, TypeId},
    collections::{hash_map::Entry, HashMap},
    fmt::Debug,
    sync::Arc,
};

use crate::{
    component::{Component, Declared, DynComponent},
    dependency_graph::DependencyGraph,
    errors::{ConstructionError, InjectError, RequireError},
    injector::{InjectionOutcome, Injector},
    types::{Injectable, Instance, TypeInfo},
};

/// Map from a declared type to its single instance
///
/// `None` = the type is declared, but not managed
#[derive(Default, Clone)]
pub struct InstanceContainer {
    instances: HashMap<TypeId, (TypeInfo, Option<Instance>)>,
}
impl Debug for InstanceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_struct("InstanceContainer");
        for (info, instance) in self.instances.values() {
            let val = if instance.is_some() {
                "managed"
            } else {
                "unmanaged"
            };
            map.field(info.type_name, &val);
        }
        map.finish()
    }
}

impl InstanceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiates `C` if it is managed
    ///
    /// Returns true if a new instance was stored. Already registered types are
    /// not instantiated again.
    pub fn register<C: Component>(&mut self) -> Result<bool, ConstructionError> {
        self.register_dyn(&Declared::<C>::new())
    }

    pub(crate) fn register_dyn(
        &mut self,
        component: &dyn DynComponent,
    ) -> Result<bool, ConstructionError> {
        let declaration = component.declaration();
        let info = declaration.info;

        if !declaration.is_managed() {
            tracing::debug!("{} carries no layer, skipping", info);
            self.instances.entry(info.type_id).or_insert((info, None));
            return Ok(false);
        }

        if let Some((_, Some(_))) = self.instances.get(&info.type_id) {
            tracing::debug!("{} is already registered", info);
            return Ok(false);
        }

        let instance = component.construct()?;
        tracing::debug!("Constructed instance of {}", info);
        self.instances.insert(info.type_id, (info, Some(instance)));
        Ok(true)
    }

    /// Stores an already constructed value under its own type
    ///
    /// Returns false if the type already has an instance, which is kept
    pub fn add_instance<T: Injectable>(&mut self, instance: T) -> bool {
        self.insert_instance(Instance::new(instance))
    }

    pub(crate) fn insert_instance(&mut self, instance: Instance) -> bool {
        match self.instances.entry(instance.info.type_id) {
            Entry::Occupied(mut entry) => {
                if entry.get().1.is_some() {
                    return false;
                }
                entry.insert((instance.info, Some(instance)));
            }
            Entry::Vacant(entry) => {
                entry.insert((instance.info, Some(instance)));
            }
        }
        true
    }

    /// The stored instance for a type, if any
    pub fn get_instance(&self, type_id: TypeId) -> Option<&Instance> {
        self.instances
            .get(&type_id)
            .and_then(|(_, instance)| instance.as_ref())
    }

    /// The stored instance of `T`, if any
    pub fn get<T: Injectable>(&self) -> Option<Arc<T>> {
        self.get_instance(TypeId::of::<T>())
            .and_then(|instance| instance.downcast().ok())
    }

    /// Attempts to get the requested type, reporting why it is absent
    pub fn require<T: Injectable>(&self) -> Result<Arc<T>, RequireError> {
        match self.instances.get(&TypeId::of::<T>()) {
            Some((_, Some(instance))) => {
                instance
                    .downcast()
                    .map_err(|actual_type| RequireError::DowncastFailed {
                        required_type: type_name::<T>(),
                        actual_type,
                    })
            }
            Some((_, None)) => Err(RequireError::TypeUnmanaged(type_name::<T>())),
            None => Err(RequireError::TypeMissing(type_name::<T>())),
        }
    }

    pub fn contains<T: Injectable>(&self) -> bool {
        self.get_instance(TypeId::of::<T>()).is_some()
    }

    /// Number of stored instances
    pub fn len(&self) -> usize {
        self.instances().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored instances
    pub fn instances(&self) -> impl Iterator<Item = &Instance> + '_ {
        self.instances
            .values()
            .filter_map(|(_, instance)| instance.as_ref())
    }
}

/// Container holding all initiated instances
///
/// Read only - cloning only clones the handle.
#[derive(Clone)]
pub struct DiContainer(pub Arc<DiContainerInner>);
pub struct DiContainerInner {
    instances: InstanceContainer,
    graph: DependencyGraph,
}
impl Debug for DiContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DiContainer").field(&self.0.instances).finish()
    }
}

impl DiContainer {
    pub(crate) fn new(instances: InstanceContainer, graph: DependencyGraph) -> Self {
        Self(Arc::new(DiContainerInner { instances, graph }))
    }

    /// The managed instance of `T`, None for unmanaged or unknown types
    pub fn get<T: Injectable>(&self) -> Option<Arc<T>> {
        self.0.instances.get()
    }

    /// Attempts to get the requested type
    pub fn require<T: Injectable>(&self) -> Result<Arc<T>, RequireError> {
        self.0.instances.require()
    }

    pub fn contains<T: Injectable>(&self) -> bool {
        self.0.instances.contains::<T>()
    }

    pub fn len(&self) -> usize {
        self.0.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.instances.is_empty()
    }

    /// Fills the injection targets of any component from this container
    ///
    /// Targets that are already set keep their value.
    pub fn inject<C: Component>(&self, component: &C) -> Result<InjectionOutcome, InjectError> {
        Injector::new(&self.0.instances).inject(component)
    }

    pub fn instances(&self) -> &InstanceContainer {
        &self.0.instances
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.0.graph
    }
}
