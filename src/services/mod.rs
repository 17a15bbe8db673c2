//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and on the Unit of Work for repository access
//! and transactions.

mod application_service;
mod auth_service;
pub mod container;
mod guard;
mod mentor_service;
mod notification_service;
mod request_service;

pub use container::{ServiceContainer, Services};

pub use application_service::{ApplicationService, ApplicationWorkflow};
pub use auth_service::{
    AdminClaim, AuthResponse, AuthService, Authenticator, Claims, Registration,
    UserProfileResponse,
};
pub use mentor_service::{MentorDirectory, MentorFilter, MentorService};
pub use notification_service::{NotificationCenter, NotificationService};
pub use request_service::{RequestService, RequestWorkflow};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
