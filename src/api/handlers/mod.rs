//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod mentor_handler;
pub mod notification_handler;
pub mod request_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use mentor_handler::mentor_routes;
pub use notification_handler::notification_routes;
pub use request_handler::{mentee_routes, request_routes};
