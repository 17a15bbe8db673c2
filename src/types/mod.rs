//! Shared HTTP response types.

mod response;

pub use response::{ApplicationDecisionResponse, MessageResponse, RequestDecisionResponse};
