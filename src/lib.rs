//! Diaspora Bridge - mentor matching backend.
//!
//! Mentees register and browse approved mentors, mentors apply and are
//! reviewed by an administrator, and both sides exchange mentorship
//! requests. Every state change leaves an in-app notification.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, roles and capabilities, status state machines
//! - **services**: Registration, review and request workflows
//! - **infra**: Database, migrations, repositories, unit of work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response bodies
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, Role, User};
pub use errors::{AppError, AppResult};
