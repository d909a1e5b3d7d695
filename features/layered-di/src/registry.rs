use std::{any::TypeId, collections::HashSet};

use crate::{
    component::{Component, Declared, DynComponent},
    types::ComponentType,
};

/// Ordered, fixed list of declared components
///
/// Declaring the same type twice keeps the first declaration.
#[derive(Default)]
pub struct DeclarationRegistry {
    entries: Vec<Declaration>,
    known: HashSet<TypeId>,
}

pub(crate) struct Declaration {
    pub(crate) component: ComponentType,
    pub(crate) handle: Box<dyn DynComponent>,
}

impl DeclarationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a component
    ///
    /// Returns false if it was already declared
    pub fn declare<C: Component>(&mut self) -> bool {
        let component = C::declaration();
        if !self.known.insert(component.info.type_id) {
            tracing::debug!("{} is already declared", component.info);
            return false;
        }

        self.entries.push(Declaration {
            component,
            handle: Box::new(Declared::<C>::new()),
        });
        true
    }

    /// All declarations, in declaration order
    pub fn declarations(&self) -> impl Iterator<Item = &ComponentType> + '_ {
        self.entries.iter().map(|entry| &entry.component)
    }

    /// Declarations carrying a layer
    pub fn managed(&self) -> impl Iterator<Item = &ComponentType> + '_ {
        self.declarations().filter(|component| component.is_managed())
    }

    pub fn declaration_of(&self, type_id: TypeId) -> Option<&ComponentType> {
        self.declarations()
            .find(|component| component.info.type_id == type_id)
    }

    pub fn is_declared(&self, type_id: TypeId) -> bool {
        self.known.contains(&type_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Declaration] {
        &self.entries
    }
}
