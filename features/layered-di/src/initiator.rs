use std::fmt::Display;

use crate::{
    builder::DiBuilder,
    container::{DiContainer, InstanceContainer},
    dependency_graph::DependencyGraph,
    errors::InitError,
    injector::Injector,
    registry::DeclarationRegistry,
    types::Instance,
};

/// Lifecycle of the container - there is no way back
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InitPhase {
    Uninitialized,
    /// Constructing all managed components
    Registering,
    /// Filling injection targets
    Injecting,
    Ready,
}
impl Display for InitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InitPhase::Uninitialized => "uninitialized",
            InitPhase::Registering => "registering",
            InitPhase::Injecting => "injecting",
            InitPhase::Ready => "ready",
        };
        f.write_str(name)
    }
}

/// Initiates the DiContainer
pub(crate) struct DiInitiator {
    phase: InitPhase,
    /// All produced instances
    instances: InstanceContainer,
}
impl DiInitiator {
    pub(crate) fn new() -> DiInitiator {
        DiInitiator {
            phase: InitPhase::Uninitialized,
            instances: InstanceContainer::new(),
        }
    }

    pub(crate) fn phase(&self) -> InitPhase {
        self.phase
    }

    pub fn initiate(mut self, blueprint: DiBuilder) -> Result<DiContainer, InitError> {
        let DiBuilder {
            registry,
            registered_instances,
        } = blueprint;

        tracing::debug!(
            "Initializing container with {} declarations and {} instances",
            registry.len(),
            registered_instances.len()
        );

        let graph = DependencyGraph::new(&registry, registered_instances.keys());
        for missing in graph.unresolved() {
            tracing::warn!("{missing}, the field stays empty");
        }

        // All instances must exist before the first injection
        self.register_all(&registry, registered_instances.into_values())?;
        self.inject_all(&registry)?;
        self.advance(InitPhase::Ready);

        tracing::debug!(
            "Container {} with {} instances",
            self.phase(),
            self.instances.len()
        );
        Ok(DiContainer::new(self.instances, graph))
    }

    fn advance(&mut self, next: InitPhase) {
        debug_assert!(next > self.phase, "{} can't move to {}", self.phase, next);
        tracing::debug!("Container phase {} -> {}", self.phase, next);
        self.phase = next;
    }

    /// Adds pre built instances, then constructs every managed declaration
    fn register_all(
        &mut self,
        registry: &DeclarationRegistry,
        prebuilt: impl IntoIterator<Item = Instance>,
    ) -> Result<(), InitError> {
        self.advance(InitPhase::Registering);

        for instance in prebuilt {
            self.instances.insert_instance(instance);
        }

        for declaration in registry.entries() {
            self.instances.register_dyn(declaration.handle.as_ref())?;
        }

        Ok(())
    }

    /// Fills the injection targets of every declared component with an instance
    fn inject_all(&mut self, registry: &DeclarationRegistry) -> Result<(), InitError> {
        self.advance(InitPhase::Injecting);

        let injector = Injector::new(&self.instances);
        for declaration in registry.entries() {
            let Some(instance) = self
                .instances
                .get_instance(declaration.component.info.type_id)
            else {
                continue;
            };

            let outcome = injector.inject_instance(declaration.handle.as_ref(), instance)?;
            tracing::debug!(
                "Wired {}: {} assigned, {} unresolved",
                declaration.component.info,
                outcome.assigned.len(),
                outcome.unresolved.len()
            );
        }

        Ok(())
    }
}
