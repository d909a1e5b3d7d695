use std::marker::PhantomData;

use crate::{
    errors::ConstructionError,
    inject::InjectionTarget,
    types::{ComponentType, FieldInfo, Injectable, Instance, Layer, TypeInfo},
};

/// A type declared to the container
///
/// Only components with a [Layer] are instantiated. Their dependencies are
/// not passed to the constructor, they are declared as [crate::Inject] fields
/// and filled once every managed component exists.
///
/// # Example
/// ```rust
/// use layered_di::{Component, ConstructionError, FieldInfo, Inject, InjectionTarget, Layer};
///
/// #[derive(Default)]
/// struct Database;
/// impl Component for Database {
///     const LAYER: Option<Layer> = Some(Layer::Repository);
///
///     fn construct() -> Result<Self, ConstructionError> {
///         Ok(Database)
///     }
/// }
///
/// #[derive(Default)]
/// struct Users {
///     database: Inject<Database>,
/// }
/// impl Component for Users {
///     const LAYER: Option<Layer> = Some(Layer::Service);
///
///     fn fields() -> Vec<FieldInfo> {
///         vec![Inject::<Database>::field("database")]
///     }
///
///     fn construct() -> Result<Self, ConstructionError> {
///         Ok(Users::default())
///     }
///
///     fn injection_targets(&self) -> Vec<InjectionTarget<'_>> {
///         vec![InjectionTarget::new("database", &self.database)]
///     }
/// }
/// ```
pub trait Component: Injectable + Sized {
    /// Managed marker - None leaves the type to the caller
    const LAYER: Option<Layer> = None;

    /// Declared fields, injection targets included
    fn fields() -> Vec<FieldInfo> {
        Vec::new()
    }

    /// Creates the instance without any arguments
    fn construct() -> Result<Self, ConstructionError>;

    /// The injection targets of this instance
    ///
    /// Should list the same targets [Component::fields] marks with `inject`.
    fn injection_targets(&self) -> Vec<InjectionTarget<'_>> {
        Vec::new()
    }

    fn declaration() -> ComponentType {
        ComponentType {
            info: TypeInfo::of::<Self>(),
            layer: Self::LAYER,
            fields: Self::fields(),
        }
    }
}

/// Wrapper Trait for components, working on type erased instances
pub(crate) trait DynComponent {
    fn declaration(&self) -> ComponentType;

    /// Constructs a new instance of the component
    fn construct(&self) -> Result<Instance, ConstructionError>;

    /// Borrows the injection targets of an instance of this component
    ///
    /// Fails with the actual type name if the instance is of another type
    fn injection_targets<'a>(
        &self,
        instance: &'a Instance,
    ) -> Result<Vec<InjectionTarget<'a>>, &'static str>;
}

/// Type level handle of a declared component
pub(crate) struct Declared<C>(PhantomData<fn() -> C>);
impl<C: Component> Declared<C> {
    pub(crate) fn new() -> Self {
        Declared(PhantomData)
    }
}
impl<C: Component> DynComponent for Declared<C> {
    fn declaration(&self) -> ComponentType {
        C::declaration()
    }

    fn construct(&self) -> Result<Instance, ConstructionError> {
        // Forward the call to the specific implementation
        C::construct().map(Instance::new)
    }

    fn injection_targets<'a>(
        &self,
        instance: &'a Instance,
    ) -> Result<Vec<InjectionTarget<'a>>, &'static str> {
        instance
            .instance
            .downcast_ref::<C>()
            .map(C::injection_targets)
            .ok_or(instance.info.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::Inject;

    struct Leaf;
    impl Component for Leaf {
        const LAYER: Option<Layer> = Some(Layer::Repository);

        fn construct() -> Result<Self, ConstructionError> {
            Ok(Leaf)
        }
    }

    struct Branch {
        leaf: Inject<Leaf>,
    }
    impl Component for Branch {
        fn fields() -> Vec<FieldInfo> {
            vec![FieldInfo::plain::<u8>("weight"), Inject::<Leaf>::field("leaf")]
        }

        fn construct() -> Result<Self, ConstructionError> {
            Ok(Branch {
                leaf: Inject::new(),
            })
        }

        fn injection_targets(&self) -> Vec<InjectionTarget<'_>> {
            vec![InjectionTarget::new("leaf", &self.leaf)]
        }
    }

    #[test]
    fn declaration_reflects_layer_and_fields() {
        let leaf = Leaf::declaration();
        assert!(leaf.is_managed());
        assert!(leaf.fields.is_empty());

        let branch = Branch::declaration();
        assert!(!branch.is_managed());
        assert_eq!(branch.fields.len(), 2);
        assert_eq!(
            branch.injection_targets().map(|f| f.type_info).collect::<Vec<_>>(),
            vec![TypeInfo::of::<Leaf>()]
        );
    }

    #[test]
    fn dyn_component_borrows_targets_of_own_type_only() {
        let declared = Declared::<Branch>::new();
        let branch = declared.construct().unwrap();
        let targets = declared.injection_targets(&branch).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].field, "leaf");

        let leaf = Declared::<Leaf>::new().construct().unwrap();
        assert!(declared.injection_targets(&leaf).is_err());
    }
}
