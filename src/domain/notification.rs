//! Notifications produced by workflow transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;

/// Workflow event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    MentorApproved,
    MentorRejected,
    MentorRequest,
    MentorRequestAccepted,
    MentorRequestRejected,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 5] = [
        NotificationKind::MentorApproved,
        NotificationKind::MentorRejected,
        NotificationKind::MentorRequest,
        NotificationKind::MentorRequestAccepted,
        NotificationKind::MentorRequestRejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::MentorApproved => "MENTOR_APPROVED",
            NotificationKind::MentorRejected => "MENTOR_REJECTED",
            NotificationKind::MentorRequest => "MENTOR_REQUEST",
            NotificationKind::MentorRequestAccepted => "MENTOR_REQUEST_ACCEPTED",
            NotificationKind::MentorRequestRejected => "MENTOR_REQUEST_REJECTED",
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::internal(format!("Unknown notification type: {}", s)))
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification about to be appended to a user's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl NewNotification {
    pub fn mentor_approved(user_id: Uuid) -> Self {
        Self {
            user_id,
            title: "Mentor Application Approved".to_string(),
            message: "Congratulations! Your mentor application has been approved. \
                      You can now be discovered by mentees."
                .to_string(),
            kind: NotificationKind::MentorApproved,
        }
    }

    pub fn mentor_rejected(user_id: Uuid) -> Self {
        Self {
            user_id,
            title: "Mentor Application Rejected".to_string(),
            message: "Unfortunately, your mentor application was not approved at this time. \
                      You can reapply in the future."
                .to_string(),
            kind: NotificationKind::MentorRejected,
        }
    }

    pub fn request_created(mentor_id: Uuid, mentee_name: &str) -> Self {
        Self {
            user_id: mentor_id,
            title: "New Mentorship Request".to_string(),
            message: format!("{} has requested your mentorship.", mentee_name),
            kind: NotificationKind::MentorRequest,
        }
    }

    pub fn request_accepted(mentee_id: Uuid, mentor_name: &str) -> Self {
        Self {
            user_id: mentee_id,
            title: "Mentorship Request Accepted".to_string(),
            message: format!("{} has accepted your mentorship request.", mentor_name),
            kind: NotificationKind::MentorRequestAccepted,
        }
    }

    pub fn request_rejected(mentee_id: Uuid, mentor_name: &str) -> Self {
        Self {
            user_id: mentee_id,
            title: "Mentorship Request Declined".to_string(),
            message: format!("{} has declined your mentorship request.", mentor_name),
            kind: NotificationKind::MentorRequestRejected,
        }
    }
}

/// Whether the notification side effect of a transition was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// The transition committed but the notification row could not be written.
    Failed,
}

impl Delivery {
    pub fn is_delivered(self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

/// Result of a committed workflow transition.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    pub record: T,
    pub notification: Delivery,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_string_round_trip() {
        for kind in NotificationKind::ALL {
            assert_eq!(kind.as_str().parse::<NotificationKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::json!(kind.as_str())
            );
        }
    }

    #[test]
    fn test_request_messages_name_the_counterpart() {
        let id = Uuid::new_v4();
        let accepted = NewNotification::request_accepted(id, "Jean Mugisha");
        assert_eq!(accepted.user_id, id);
        assert_eq!(accepted.kind, NotificationKind::MentorRequestAccepted);
        assert!(accepted.message.starts_with("Jean Mugisha"));

        let created = NewNotification::request_created(id, "Amina Uwase");
        assert_eq!(created.message, "Amina Uwase has requested your mentorship.");
    }

    #[test]
    fn test_notification_type_field_name() {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "t".to_string(),
            message: "m".to_string(),
            kind: NotificationKind::MentorRejected,
            is_read: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(notification).unwrap();
        assert_eq!(json["type"], "MENTOR_REJECTED");
        assert_eq!(json["isRead"], false);
    }
}
