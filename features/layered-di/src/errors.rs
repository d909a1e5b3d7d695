use thiserror::Error;

/// A component could not be created without arguments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to construct '{component}': {reason}")]
pub struct ConstructionError {
    pub component: &'static str,
    pub reason: String,
}
impl ConstructionError {
    pub fn new(component: &'static str, reason: impl Into<String>) -> Self {
        ConstructionError {
            component,
            reason: reason.into(),
        }
    }
}

/// Errors when trying to require a certain type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequireError {
    /// The required type is not known
    #[error("The required type '{0}' is not known.")]
    TypeMissing(&'static str),
    /// The required type is declared, but carries no layer
    #[error("The required type '{0}' is declared but not managed.")]
    TypeUnmanaged(&'static str),

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}

/// Errors while filling injection targets
///
/// A missing provider is not an error, the target just stays empty.
/// Targets and declared fields disagreeing is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectError {
    /// The container handed out an instance of the wrong type for a target
    #[error("Field '{field}' of '{component}' could not take '{actual_type}'")]
    DowncastFailed {
        component: &'static str,
        field: &'static str,
        actual_type: &'static str,
    },
    /// A field is declared with the inject marker, but the component exposes no target for it
    #[error("'{component}' declares injected field '{field}: {dependency}' but has no target for it")]
    MissingTarget {
        component: &'static str,
        field: &'static str,
        dependency: &'static str,
    },
    /// The component exposes a target which is not declared as injected field
    #[error("'{component}' exposes target '{field}: {dependency}' but declares no such injected field")]
    UndeclaredTarget {
        component: &'static str,
        field: &'static str,
        dependency: &'static str,
    },
}

/// Errors while initiating the container
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// A managed component failed to construct
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    /// A component could not be wired
    #[error(transparent)]
    Injection(#[from] InjectError),
}
