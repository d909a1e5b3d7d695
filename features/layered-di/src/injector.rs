use crate::{
    component::{Component, DynComponent},
    container::InstanceContainer,
    errors::InjectError,
    inject::InjectionTarget,
    types::{ComponentType, Instance, TypeInfo},
};

/// Fills injection targets from an [InstanceContainer]
pub struct Injector<'a> {
    container: &'a InstanceContainer,
}

/// What happened to the targets of one component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionOutcome {
    /// Targets filled by this run
    pub assigned: Vec<&'static str>,
    /// Targets which already held a value
    pub kept: Vec<&'static str>,
    /// Targets without a provider, left empty
    pub unresolved: Vec<&'static str>,
}
impl InjectionOutcome {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

impl<'a> Injector<'a> {
    pub fn new(container: &'a InstanceContainer) -> Self {
        Injector { container }
    }

    /// Fills the targets of `component`
    pub fn inject<C: Component>(&self, component: &C) -> Result<InjectionOutcome, InjectError> {
        let targets = component.injection_targets();
        check_declared(&C::declaration(), &targets)?;
        self.inject_targets(TypeInfo::of::<C>(), targets)
    }

    /// Fills the targets of a stored instance of a declared component
    pub(crate) fn inject_instance(
        &self,
        component: &dyn DynComponent,
        instance: &Instance,
    ) -> Result<InjectionOutcome, InjectError> {
        // The container keys instances by their own type, a mismatch is a bug
        let targets = component.injection_targets(instance).map_err(|actual_type| {
            InjectError::DowncastFailed {
                component: component.declaration().info.type_name,
                field: "<self>",
                actual_type,
            }
        })?;

        check_declared(&component.declaration(), &targets)?;
        self.inject_targets(instance.info, targets)
    }

    fn inject_targets(
        &self,
        owner: TypeInfo,
        targets: Vec<InjectionTarget<'_>>,
    ) -> Result<InjectionOutcome, InjectError> {
        let mut outcome = InjectionOutcome::default();

        for target in targets {
            let wanted = target.point.target();
            let Some(instance) = self.container.get_instance(wanted.type_id) else {
                // Missing providers are not an error, the target just stays empty
                if !target.point.is_filled() {
                    tracing::debug!("No instance of {} for {}.{}", wanted, owner, target.field);
                    outcome.unresolved.push(target.field);
                } else {
                    outcome.kept.push(target.field);
                }
                continue;
            };

            let assigned = target.point.fill(instance).map_err(|actual_type| {
                InjectError::DowncastFailed {
                    component: owner.type_name,
                    field: target.field,
                    actual_type,
                }
            })?;

            if assigned {
                tracing::debug!("Injected {} into {}.{}", wanted, owner, target.field);
                outcome.assigned.push(target.field);
            } else {
                outcome.kept.push(target.field);
            }
        }

        Ok(outcome)
    }
}

/// Targets must match the declared inject fields by name and type
fn check_declared(
    declaration: &ComponentType,
    targets: &[InjectionTarget<'_>],
) -> Result<(), InjectError> {
    let component = declaration.info.type_name;

    for target in targets {
        let wanted = target.point.target();
        let declared = declaration
            .injection_targets()
            .any(|field| field.name == target.field && field.type_info == wanted);
        if !declared {
            return Err(InjectError::UndeclaredTarget {
                component,
                field: target.field,
                dependency: wanted.type_name,
            });
        }
    }

    for field in declaration.injection_targets() {
        let exposed = targets
            .iter()
            .any(|target| target.field == field.name && target.point.target() == field.type_info);
        if !exposed {
            return Err(InjectError::MissingTarget {
                component,
                field: field.name,
                dependency: field.type_info.type_name,
            });
        }
    }

    Ok(())
}
