//! Domain layer - Core business entities and logic
//!
//! Entities, value objects, the role capability table and the status state
//! machines. Nothing in here touches the database or HTTP.

pub mod application;
pub mod notification;
pub mod password;
pub mod profile;
pub mod request;
pub mod role;
pub mod status;
pub mod user;

pub use application::{ApplicationView, MentorApplication};
pub use notification::{Delivery, NewNotification, Notification, NotificationKind, Transition};
pub use password::Password;
pub use profile::{
    MenteeProfile, MenteeProfileInput, MentorListing, MentorProfile, MentorProfileInput,
    MentorProfileSummary, ProfileInput, Tags,
};
pub use request::{MentorRequest, MentorWithProfile, RequestView, SentRequestView};
pub use role::{can, AccountType, Action, Role};
pub use status::{
    ApplicationEvent, ApplicationStatus, InvalidTransition, RequestEvent, RequestStatus,
    StateMachine,
};
pub use user::{NewUser, User, UserResponse, UserSummary};
