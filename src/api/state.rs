//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    ApplicationService, AuthService, MentorService, NotificationService, RequestService,
    ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub application_service: Arc<dyn ApplicationService>,
    pub request_service: Arc<dyn RequestService>,
    pub notification_service: Arc<dyn NotificationService>,
    pub mentor_service: Arc<dyn MentorService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(&container, database)
    }

    /// Create application state from any service container.
    pub fn new(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            application_service: container.applications(),
            request_service: container.requests(),
            notification_service: container.notifications(),
            mentor_service: container.mentors(),
            database,
        }
    }
}
