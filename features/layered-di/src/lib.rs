//! Layered DI: a small dependency injection container built on declared components.
//!
//! Initialization runs in two passes:
//! 1. Every declared component carrying a [Layer] is constructed without arguments
//! 2. The [Inject] fields of every constructed component are filled from the container
//!
//! Afterwards the [DiContainer] is read only. An injected field whose type has no
//! instance stays empty, this is never an error.
//!
//! # Examples
//!
//! ```rust
//! use layered_di::{Component, ConstructionError, DiBuilder, FieldInfo, Inject, InjectionTarget, Layer};
//!
//! struct Greeter;
//! impl Component for Greeter {
//!     const LAYER: Option<Layer> = Some(Layer::Service);
//!
//!     fn construct() -> Result<Self, ConstructionError> {
//!         Ok(Greeter)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Frontdesk {
//!     greeter: Inject<Greeter>,
//! }
//! impl Component for Frontdesk {
//!     const LAYER: Option<Layer> = Some(Layer::Controller);
//!
//!     fn fields() -> Vec<FieldInfo> {
//!         vec![Inject::<Greeter>::field("greeter")]
//!     }
//!
//!     fn construct() -> Result<Self, ConstructionError> {
//!         Ok(Frontdesk::default())
//!     }
//!
//!     fn injection_targets(&self) -> Vec<InjectionTarget<'_>> {
//!         vec![InjectionTarget::new("greeter", &self.greeter)]
//!     }
//! }
//!
//! let container = DiBuilder::new()
//!     .register::<Greeter>()
//!     .register::<Frontdesk>()
//!     .build()
//!     .unwrap();
//!
//! let frontdesk = container.get::<Frontdesk>().unwrap();
//! assert!(frontdesk.greeter.get().is_some());
//! assert!(container.get::<String>().is_none());
//! ```

pub mod builder;
pub mod component;
pub mod container;
pub mod demo;
pub mod dependency_graph;
pub mod errors;
pub mod initiator;
pub mod inject;
pub mod injector;
pub mod logging;
pub mod registry;
pub mod types;

pub use builder::DiBuilder;
pub use component::Component;
pub use container::{DiContainer, InstanceContainer};
pub use dependency_graph::{DependencyGraph, MissingDependency};
pub use errors::{ConstructionError, InitError, InjectError, RequireError};
pub use initiator::InitPhase;
pub use inject::{Inject, InjectionPoint, InjectionTarget};
pub use injector::{InjectionOutcome, Injector};
pub use registry::DeclarationRegistry;
pub use types::{ComponentType, FieldInfo, Injectable, Instance, Layer, TypeInfo};
