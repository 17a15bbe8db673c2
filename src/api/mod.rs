//! API layer - HTTP handlers and middleware
//!
//! Handlers translate JSON bodies into service calls; bearer-token
//! verification lives in middleware, request validation in extractors.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
