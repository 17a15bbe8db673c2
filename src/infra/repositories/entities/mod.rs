//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod mentee_profile;
pub mod mentor_application;
pub mod mentor_profile;
pub mod mentor_request;
pub mod notification;
pub mod user;
