//! Response bodies shared by several handlers.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{MentorApplication, MentorRequest, Transition};

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Notification marked as read")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of approving or rejecting a mentor application.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDecisionResponse {
    #[schema(example = "Application approved successfully")]
    pub message: String,
    pub application: MentorApplication,
    /// False when the status change committed but the applicant's
    /// notification could not be written
    pub notification_delivered: bool,
}

impl ApplicationDecisionResponse {
    pub fn new(message: impl Into<String>, transition: Transition<MentorApplication>) -> Self {
        Self {
            message: message.into(),
            notification_delivered: transition.notification.is_delivered(),
            application: transition.record,
        }
    }
}

/// Result of sending, accepting or rejecting a mentorship request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestDecisionResponse {
    #[schema(example = "Request accepted successfully")]
    pub message: String,
    pub request: MentorRequest,
    pub notification_delivered: bool,
}

impl RequestDecisionResponse {
    pub fn new(message: impl Into<String>, transition: Transition<MentorRequest>) -> Self {
        Self {
            message: message.into(),
            notification_delivered: transition.notification.is_delivered(),
            request: transition.record,
        }
    }
}
