//! Service Container - Centralized service access.
//!
//! Handlers depend on the service traits; the container wires the concrete
//! implementations over one shared Unit of Work.

use std::sync::Arc;

use super::{
    ApplicationService, ApplicationWorkflow, AuthService, Authenticator, MentorDirectory,
    MentorService, NotificationCenter, NotificationService, RequestService, RequestWorkflow,
};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn applications(&self) -> Arc<dyn ApplicationService>;

    fn requests(&self) -> Arc<dyn RequestService>;

    fn notifications(&self) -> Arc<dyn NotificationService>;

    fn mentors(&self) -> Arc<dyn MentorService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    application_service: Arc<dyn ApplicationService>,
    request_service: Arc<dyn RequestService>,
    notification_service: Arc<dyn NotificationService>,
    mentor_service: Arc<dyn MentorService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            application_service: Arc::new(ApplicationWorkflow::new(uow.clone())),
            request_service: Arc::new(RequestWorkflow::new(uow.clone())),
            notification_service: Arc::new(NotificationCenter::new(uow.clone())),
            mentor_service: Arc::new(MentorDirectory::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationService> {
        self.application_service.clone()
    }

    fn requests(&self) -> Arc<dyn RequestService> {
        self.request_service.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }

    fn mentors(&self) -> Arc<dyn MentorService> {
        self.mentor_service.clone()
    }
}
