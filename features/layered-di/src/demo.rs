//! Login gated request pipeline wired by the container
//!
//! `Controller` depends on `Service` and `UserManager`, `Service` depends on `Repository`.
//! `AuditTrail` is declared without a layer and therefore never instantiated.

use std::{
    collections::HashSet,
    sync::{PoisonError, RwLock},
};

use thiserror::Error;

use crate::{
    builder::DiBuilder,
    component::Component,
    container::DiContainer,
    errors::{ConstructionError, InitError, RequireError},
    inject::{Inject, InjectionTarget},
    types::{FieldInfo, Layer},
};

pub const REQUEST_DENIED: &str = "Not logged in, request denied";
pub const REQUEST_PROCESSED: &str = "Processed request! Response: ";

#[derive(Debug, Default)]
pub struct Repository;
impl Repository {
    pub fn load(&self, key: &str) -> String {
        format!("record<{key}>")
    }
}
impl Component for Repository {
    const LAYER: Option<Layer> = Some(Layer::Repository);

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Repository)
    }
}

#[derive(Debug, Default)]
pub struct Service {
    pub repository: Inject<Repository>,
}
impl Service {
    pub fn process(&self, payload: &str) -> String {
        match self.repository.get() {
            Some(repository) => format!("handled {}", repository.load(payload)),
            None => format!("handled {payload} without storage"),
        }
    }
}
impl Component for Service {
    const LAYER: Option<Layer> = Some(Layer::Service);

    fn fields() -> Vec<FieldInfo> {
        vec![Inject::<Repository>::field("repository")]
    }

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Service::default())
    }

    fn injection_targets(&self) -> Vec<InjectionTarget<'_>> {
        vec![InjectionTarget::new("repository", &self.repository)]
    }
}

/// Keeps track of logged in users
#[derive(Debug, Default)]
pub struct UserManager {
    logged_in: RwLock<HashSet<String>>,
}
impl UserManager {
    pub fn login(&self, user: &str) {
        let mut users = self.logged_in.write().unwrap_or_else(PoisonError::into_inner);
        if users.insert(user.to_string()) {
            tracing::info!("User '{user}' logged in");
        }
    }

    /// Returns false if the user was not logged in
    pub fn logout(&self, user: &str) -> bool {
        let mut users = self.logged_in.write().unwrap_or_else(PoisonError::into_inner);
        let removed = users.remove(user);
        if removed {
            tracing::info!("User '{user}' logged out");
        }
        removed
    }

    pub fn is_logged_in(&self, user: &str) -> bool {
        self.logged_in
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user)
    }
}
impl Component for UserManager {
    const LAYER: Option<Layer> = Some(Layer::Component);

    fn fields() -> Vec<FieldInfo> {
        vec![FieldInfo::plain::<RwLock<HashSet<String>>>("logged_in")]
    }

    fn construct() -> Result<Self, ConstructionError> {
        Ok(UserManager::default())
    }
}

#[derive(Debug, Default)]
pub struct Controller {
    pub service: Inject<Service>,
    pub user_manager: Inject<UserManager>,
}
impl Controller {
    /// Answers a request if `user` is logged in
    pub fn process_http_request(&self, payload: &str, user: &str) -> String {
        let logged_in = self
            .user_manager
            .get()
            .is_some_and(|users| users.is_logged_in(user));
        if !logged_in {
            tracing::debug!("Rejected request of '{user}'");
            return REQUEST_DENIED.to_string();
        }

        let response = match self.service.get() {
            Some(service) => service.process(payload),
            None => String::new(),
        };
        format!("{REQUEST_PROCESSED}{response}")
    }
}
impl Component for Controller {
    const LAYER: Option<Layer> = Some(Layer::Controller);

    fn fields() -> Vec<FieldInfo> {
        vec![
            Inject::<Service>::field("service"),
            Inject::<UserManager>::field("user_manager"),
        ]
    }

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Controller::default())
    }

    fn injection_targets(&self) -> Vec<InjectionTarget<'_>> {
        vec![
            InjectionTarget::new("service", &self.service),
            InjectionTarget::new("user_manager", &self.user_manager),
        ]
    }
}

/// Declared, but without a layer
#[derive(Debug, Default)]
pub struct AuditTrail {
    pub repository: Inject<Repository>,
}
impl Component for AuditTrail {
    fn fields() -> Vec<FieldInfo> {
        vec![Inject::<Repository>::field("repository")]
    }

    fn construct() -> Result<Self, ConstructionError> {
        Ok(AuditTrail::default())
    }

    fn injection_targets(&self) -> Vec<InjectionTarget<'_>> {
        vec![InjectionTarget::new("repository", &self.repository)]
    }
}

#[derive(Error, Debug, Clone)]
pub enum DemoError {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    Require(#[from] RequireError),
}

/// Responses of one demo run
#[derive(Debug, Clone)]
pub struct DemoOutcome {
    /// Rendered dependency graph
    pub wiring: String,
    /// Response for the logged in user
    pub accepted: String,
    /// Response for the anonymous user
    pub denied: String,
}

/// Builds the container of the demo
pub fn container() -> Result<DiContainer, InitError> {
    DiBuilder::new()
        .register::<Repository>()
        .register::<Service>()
        .register::<Controller>()
        .register::<UserManager>()
        .register::<AuditTrail>()
        .build()
}

/// Logs in `u1`, then sends one request as `u1` and one as `u2`
pub fn run() -> Result<DemoOutcome, DemoError> {
    let container = container()?;

    let user_manager = container.require::<UserManager>()?;
    let controller = container.require::<Controller>()?;

    user_manager.login("u1");

    Ok(DemoOutcome {
        wiring: container.graph().to_string(),
        accepted: controller.process_http_request("payload", "u1"),
        denied: controller.process_http_request("payload", "u2"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_logout_toggle_state() {
        let users = UserManager::default();
        assert!(!users.is_logged_in("u1"));

        users.login("u1");
        assert!(users.is_logged_in("u1"));

        assert!(users.logout("u1"));
        assert!(!users.logout("u1"));
        assert!(!users.is_logged_in("u1"));
    }

    #[test]
    fn controller_without_user_manager_denies() {
        let controller = Controller::default();
        assert_eq!(controller.process_http_request("payload", "u1"), REQUEST_DENIED);
    }

    #[test]
    fn service_without_repository_still_answers() {
        assert_eq!(Service::default().process("x"), "handled x without storage");
    }

    #[test]
    fn run_answers_both_users() {
        let outcome = run().unwrap();
        assert_eq!(
            outcome.accepted,
            "Processed request! Response: handled record<payload>"
        );
        assert_eq!(outcome.denied, REQUEST_DENIED);
        assert!(outcome.wiring.contains("AuditTrail [unmanaged] -> Repository"));
    }
}
