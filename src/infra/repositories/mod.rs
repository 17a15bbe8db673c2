//! Repository layer - Data access abstraction
//!
//! Each repository exposes a read trait served from the connection pool and
//! a `Tx*` counterpart bound to a [`crate::infra::TransactionContext`] for
//! writes that must commit together.

mod application_repository;
pub(crate) mod entities;
mod notification_repository;
mod profile_repository;
mod request_repository;
mod user_repository;

pub use application_repository::{ApplicationRepository, ApplicationStore, TxApplicationRepository};
pub use notification_repository::{
    NotificationRepository, NotificationStore, TxNotificationRepository,
};
pub use profile_repository::{
    MenteeProfileRepository, MenteeProfileStore, MentorProfileRepository, MentorProfileStore,
    TxProfileRepository,
};
pub use request_repository::{RequestRepository, RequestStore, TxRequestRepository};
pub use user_repository::{TxUserRepository, UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use application_repository::MockApplicationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use notification_repository::MockNotificationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::{MockMenteeProfileRepository, MockMentorProfileRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use request_repository::MockRequestRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
