use std::{
    any::{Any, TypeId},
    fmt::Display,
    sync::Arc,
};

/// Anything stored in the container has to be shareable
/// So anything injectable needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// Instance of a managed component
#[derive(Clone)]
pub struct Instance {
    pub info: TypeInfo,
    pub instance: Arc<dyn Any + Send + Sync + 'static>,
}

impl Instance {
    pub(crate) fn new<ExistingInstance: Injectable>(instance: ExistingInstance) -> Self {
        Instance {
            info: TypeInfo::of::<ExistingInstance>(),
            instance: Arc::new(instance),
        }
    }

    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.instance.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.info.type_name),
        }
    }
}

/// Type Name and Type Id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Type name with every module path stripped, generics and tuples included
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.type_name.len());
        let mut segment = String::new();
        let mut chars = self.type_name.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                c if c.is_alphanumeric() || c == '_' => segment.push(c),
                ':' if chars.peek() == Some(&':') => {
                    // Everything before `::` is a path segment
                    chars.next();
                    segment.clear();
                }
                c => {
                    short.push_str(&segment);
                    segment.clear();
                    short.push(c);
                }
            }
        }
        short.push_str(&segment);
        short
    }
}

/// Marks a component as managed by the container
///
/// The variant only documents which architectural layer a component belongs to,
/// every layer is handled the same way.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Layer {
    Repository,
    Service,
    Controller,
    Component,
}
impl Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Layer::Repository => "repository",
            Layer::Service => "service",
            Layer::Controller => "controller",
            Layer::Component => "component",
        };
        f.write_str(name)
    }
}

/// A declared field of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    /// The declared type of the field, for injection targets the injected type
    pub type_info: TypeInfo,
    /// If the field is filled by the injector
    pub inject: bool,
}
impl FieldInfo {
    /// A plain field the injector never touches
    pub fn plain<T: 'static + ?Sized>(name: &'static str) -> Self {
        FieldInfo {
            name,
            type_info: TypeInfo::of::<T>(),
            inject: false,
        }
    }

    /// A field filled with the managed instance of `T`
    pub fn inject<T: 'static + ?Sized>(name: &'static str) -> Self {
        FieldInfo {
            name,
            type_info: TypeInfo::of::<T>(),
            inject: true,
        }
    }
}

/// Static description of a declared component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentType {
    pub info: TypeInfo,
    /// None = declared, but not managed by the container
    pub layer: Option<Layer>,
    pub fields: Vec<FieldInfo>,
}
impl ComponentType {
    pub fn is_managed(&self) -> bool {
        self.layer.is_some()
    }

    /// All fields carrying the inject marker
    pub fn injection_targets(&self) -> impl Iterator<Item = &FieldInfo> + '_ {
        self.fields.iter().filter(|field| field.inject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    #[allow(dead_code)]
    struct Wrapper<T>(T);

    #[test]
    fn short_name_strips_module_path() {
        assert_eq!(TypeInfo::of::<Plain>().short_name(), "Plain");
        assert_eq!(TypeInfo::of::<u32>().short_name(), "u32");
    }

    #[test]
    fn short_name_strips_paths_inside_generic_arguments() {
        assert_eq!(TypeInfo::of::<Wrapper<Plain>>().short_name(), "Wrapper<Plain>");
        assert_eq!(
            TypeInfo::of::<Option<Arc<String>>>().short_name(),
            "Option<Arc<String>>"
        );
    }

    #[test]
    fn short_name_handles_tuples_arrays_and_references() {
        assert_eq!(TypeInfo::of::<(Plain, String)>().short_name(), "(Plain, String)");
        assert_eq!(TypeInfo::of::<[Plain; 3]>().short_name(), "[Plain; 3]");
        assert_eq!(TypeInfo::of::<&'static Plain>().short_name(), "&Plain");
    }

    #[test]
    fn instance_downcast_reports_actual_type() {
        let instance = Instance::new(5_u8);
        assert_eq!(*instance.downcast::<u8>().unwrap(), 5);
        assert_eq!(instance.downcast::<u16>().unwrap_err(), "u8");
    }

    #[test]
    fn injection_targets_skip_plain_fields() {
        let component = ComponentType {
            info: TypeInfo::of::<Plain>(),
            layer: Some(Layer::Service),
            fields: vec![FieldInfo::plain::<String>("name"), FieldInfo::inject::<u8>("dep")],
        };

        let targets: Vec<_> = component.injection_targets().map(|f| f.name).collect();
        assert_eq!(targets, vec!["dep"]);
        assert!(component.is_managed());
    }
}
