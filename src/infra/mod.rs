//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, repositories and the Unit of Work that
//! scopes multi-row writes to a single transaction.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    ApplicationRepository, MenteeProfileRepository, MentorProfileRepository,
    NotificationRepository, RequestRepository, UserRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockApplicationRepository, MockMenteeProfileRepository, MockMentorProfileRepository,
    MockNotificationRepository, MockRequestRepository, MockUserRepository,
};
