//! Mentorship request: a mentee asking a specific approved mentor for guidance.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::profile::MentorProfileSummary;
use super::status::RequestStatus;
use super::user::UserSummary;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorRequest {
    pub id: Uuid,
    pub mentee_id: Uuid,
    pub mentor_id: Uuid,
    pub status: RequestStatus,
    pub message: String,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request as seen by one side, with the other side joined in.
///
/// Mentors see `mentee`, mentees see `mentor`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    #[serde(flatten)]
    pub request: MentorRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentee: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor: Option<UserSummary>,
}

/// Mentor side of a mentee's request, including their profile summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorWithProfile {
    #[serde(flatten)]
    pub user: UserSummary,
    pub mentor_profile: Option<MentorProfileSummary>,
}

/// Entry of the mentee's "my requests" list.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentRequestView {
    #[serde(flatten)]
    pub request: MentorRequest,
    pub mentor: Option<MentorWithProfile>,
}
