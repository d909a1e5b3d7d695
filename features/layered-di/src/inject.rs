use std::{
    fmt::Debug,
    sync::{Arc, OnceLock},
};

use crate::types::{FieldInfo, Injectable, Instance, TypeInfo};

/// A field filled by the injector after all components were constructed
///
/// Stays empty if the container has no instance of `T`. Reading an empty
/// target is not an error, [Inject::get] just returns `None`.
///
/// The slot can only be written once, so injecting a component again keeps
/// whatever it already holds.
pub struct Inject<T: Injectable> {
    slot: OnceLock<Arc<T>>,
}
impl<T: Injectable> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Injectable + Debug> Debug for Inject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(instance) => f.debug_tuple("Inject").field(instance).finish(),
            None => f.write_str("Inject(None)"),
        }
    }
}
impl<T: Injectable> Inject<T> {
    pub const fn new() -> Self {
        Inject {
            slot: OnceLock::new(),
        }
    }

    /// Creates an already filled target, e.g. for wiring a component by hand
    pub fn with(instance: Arc<T>) -> Self {
        Inject {
            slot: OnceLock::from(instance),
        }
    }

    /// The injected instance, if any
    pub fn get(&self) -> Option<&Arc<T>> {
        self.slot.get()
    }

    pub fn is_set(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Field declaration for a target of this type
    pub fn field(name: &'static str) -> FieldInfo {
        FieldInfo::inject::<T>(name)
    }
}

/// Type erased access to an [Inject] field
pub trait InjectionPoint {
    /// The type this point wants
    fn target(&self) -> TypeInfo;

    fn is_filled(&self) -> bool;

    /// Fills the point with the given instance
    ///
    /// Returns false if it already held a value, in which case the value is kept.
    /// Fails with the actual type name if the instance is of the wrong type.
    fn fill(&self, instance: &Instance) -> Result<bool, &'static str>;
}
impl<T: Injectable> InjectionPoint for Inject<T> {
    fn target(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn is_filled(&self) -> bool {
        self.is_set()
    }

    fn fill(&self, instance: &Instance) -> Result<bool, &'static str> {
        if self.is_set() {
            return Ok(false);
        }

        let downcasted = instance.downcast::<T>()?;
        Ok(self.slot.set(downcasted).is_ok())
    }
}

/// A named injection point of a component
pub struct InjectionTarget<'a> {
    pub field: &'static str,
    pub point: &'a dyn InjectionPoint,
}
impl<'a> InjectionTarget<'a> {
    pub fn new(field: &'static str, point: &'a dyn InjectionPoint) -> Self {
        InjectionTarget { field, point }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_target_is_absent() {
        let target = Inject::<String>::new();
        assert!(target.get().is_none());
        assert!(!target.is_filled());
    }

    #[test]
    fn fill_keeps_first_value() {
        let target = Inject::<String>::new();
        let first = Instance::new("first".to_string());
        let second = Instance::new("second".to_string());

        assert_eq!(target.fill(&first), Ok(true));
        assert_eq!(target.fill(&second), Ok(false));
        assert_eq!(target.get().map(|s| s.as_str()), Some("first"));
    }

    #[test]
    fn fill_rejects_wrong_type() {
        let target = Inject::<String>::new();
        let wrong = Instance::new(1_u32);

        assert_eq!(target.fill(&wrong), Err("u32"));
        assert!(!target.is_set());
    }

    #[test]
    fn field_declaration_carries_inject_flag() {
        let field = Inject::<String>::field("name");
        assert!(field.inject);
        assert_eq!(field.type_info, TypeInfo::of::<String>());
    }

    #[test]
    fn prefilled_target_keeps_its_value() {
        let target = Inject::with(Arc::new("manual".to_string()));
        assert!(target.is_set());
        assert_eq!(target.fill(&Instance::new("other".to_string())), Ok(false));
        assert_eq!(target.get().map(|s| s.as_str()), Some("manual"));
    }

    #[test]
    fn debug_shows_content_or_none() {
        assert_eq!(format!("{:?}", Inject::<String>::new()), "Inject(None)");
        let filled = Inject::with(Arc::new("x".to_string()));
        assert_eq!(format!("{filled:?}"), "Inject(\"x\")");
    }
}
