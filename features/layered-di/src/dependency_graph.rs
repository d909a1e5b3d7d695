use std::{any::TypeId, collections::BTreeMap, fmt::Display};

use crate::{
    registry::DeclarationRegistry,
    types::{FieldInfo, Layer, TypeInfo},
};

/// Graph of all declared components and who wants what
///
/// Used to report injection targets nobody provides and to print the wiring.
/// Cycles are legal, construction happens before injection.
pub struct DependencyGraph {
    map: BTreeMap<TypeId, DependencyGraphEntry>,
}
impl DependencyGraph {
    /// Builds the graph from the declarations and the types of pre built instances
    pub fn new<'a>(
        registry: &DeclarationRegistry,
        prebuilt: impl IntoIterator<Item = &'a TypeInfo>,
    ) -> Self {
        let mut graph = Self {
            map: Default::default(),
        };

        for info in prebuilt {
            graph.add(*info, Some(Layer::Component), vec![]);
        }

        for component in registry.declarations() {
            let dependencies = component.injection_targets().copied().collect();
            graph.add(component.info, component.layer, dependencies);
        }

        graph
    }

    /// Adds a type to the graph
    ///
    /// Returns false if the type is already known, the existing entry is kept.
    /// A pre built instance stays a provider even if its type is declared afterwards.
    pub fn add(
        &mut self,
        info: TypeInfo,
        layer: Option<Layer>,
        dependencies: Vec<FieldInfo>,
    ) -> bool {
        match self.map.get_mut(&info.type_id) {
            Some(existing) => {
                if existing.dependencies.is_empty() {
                    existing.dependencies = dependencies;
                }
                false
            }
            None => {
                self.map.insert(
                    info.type_id,
                    DependencyGraphEntry {
                        info,
                        layer,
                        dependencies,
                    },
                );
                true
            }
        }
    }

    /// If the container will hold an instance of the type
    pub fn is_provided(&self, type_id: TypeId) -> bool {
        self.map
            .get(&type_id)
            .is_some_and(|entry| entry.layer.is_some())
    }

    /// Declared injection targets of a type
    pub fn dependencies_of(&self, type_id: TypeId) -> Option<&[FieldInfo]> {
        self.map
            .get(&type_id)
            .map(|entry| entry.dependencies.as_slice())
    }

    /// All injection targets of managed types which nobody provides
    ///
    /// These stay empty after initialization.
    pub fn unresolved(&self) -> Vec<MissingDependency> {
        let mut missing = Vec::new();
        for entry in self.map.values() {
            if entry.layer.is_none() {
                // Never instantiated, so never injected
                continue;
            }

            for dependency in &entry.dependencies {
                if !self.is_provided(dependency.type_info.type_id) {
                    missing.push(MissingDependency {
                        dependency: dependency.type_info,
                        field: dependency.name,
                        required_by: entry.info,
                    });
                }
            }
        }
        missing
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Display for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<_> = self.map.values().collect();
        entries.sort_by_key(|entry| entry.info.short_name());

        let mut display = Vec::new();
        for entry in entries {
            let layer = match entry.layer {
                Some(layer) => layer.to_string(),
                None => "unmanaged".to_string(),
            };
            let dependencies: Vec<_> = entry
                .dependencies
                .iter()
                .map(|dependency| dependency.type_info.short_name())
                .collect();

            if dependencies.is_empty() {
                display.push(format!("{} [{}]", entry.info.short_name(), layer));
            } else {
                display.push(format!(
                    "{} [{}] -> {}",
                    entry.info.short_name(),
                    layer,
                    dependencies.join(", ")
                ));
            }
        }
        f.write_str(&display.join("\n"))
    }
}

struct DependencyGraphEntry {
    info: TypeInfo,
    layer: Option<Layer>,
    dependencies: Vec<FieldInfo>,
}

/// An injection target without provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingDependency {
    pub dependency: TypeInfo,
    pub field: &'static str,
    pub required_by: TypeInfo,
}
impl Display for MissingDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}.{}' wants '{}' but nothing provides it",
            self.required_by, self.field, self.dependency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        component::Component,
        errors::ConstructionError,
        inject::{Inject, InjectionTarget},
    };

    struct Clock;
    impl Component for Clock {
        const LAYER: Option<Layer> = Some(Layer::Component);

        fn construct() -> Result<Self, ConstructionError> {
            Ok(Clock)
        }
    }

    struct Mailer;
    impl Component for Mailer {
        fn construct() -> Result<Self, ConstructionError> {
            Ok(Mailer)
        }
    }

    #[derive(Default)]
    struct Scheduler {
        clock: Inject<Clock>,
        mailer: Inject<Mailer>,
    }
    impl Component for Scheduler {
        const LAYER: Option<Layer> = Some(Layer::Service);

        fn fields() -> Vec<FieldInfo> {
            vec![Inject::<Clock>::field("clock"), Inject::<Mailer>::field("mailer")]
        }

        fn construct() -> Result<Self, ConstructionError> {
            Ok(Scheduler::default())
        }

        fn injection_targets(&self) -> Vec<InjectionTarget<'_>> {
            vec![
                InjectionTarget::new("clock", &self.clock),
                InjectionTarget::new("mailer", &self.mailer),
            ]
        }
    }

    fn registry() -> DeclarationRegistry {
        let mut registry = DeclarationRegistry::new();
        registry.declare::<Clock>();
        registry.declare::<Mailer>();
        registry.declare::<Scheduler>();
        registry
    }

    #[test]
    fn unmanaged_dependency_is_unresolved() {
        let graph = DependencyGraph::new(&registry(), []);

        let missing = graph.unresolved();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].dependency, TypeInfo::of::<Mailer>());
        assert_eq!(missing[0].field, "mailer");
        assert_eq!(missing[0].required_by, TypeInfo::of::<Scheduler>());
    }

    #[test]
    fn prebuilt_instance_provides_dependency() {
        let mailer = TypeInfo::of::<Mailer>();
        let graph = DependencyGraph::new(&registry(), [&mailer]);

        assert!(graph.is_provided(mailer.type_id));
        assert!(graph.unresolved().is_empty());
    }

    #[test]
    fn display_lists_wiring() {
        let graph = DependencyGraph::new(&registry(), []);
        let rendered = graph.to_string();

        assert_eq!(
            rendered,
            "Clock [component]\nMailer [unmanaged]\nScheduler [service] -> Clock, Mailer"
        );
    }

    #[test]
    fn dependencies_are_listed_per_type() {
        let graph = DependencyGraph::new(&registry(), []);
        let deps = graph.dependencies_of(TypeId::of::<Scheduler>()).unwrap();
        assert_eq!(deps.len(), 2);
        assert!(graph.dependencies_of(TypeId::of::<u8>()).is_none());
    }
}
