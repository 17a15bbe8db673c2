//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::role::{Action, Role};

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_admin: bool,
    /// Deactivated accounts cannot sign in and are never hard-deleted
    pub is_active: bool,
    pub admin_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Last", as shown to the other side of a mentorship.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether mentees can find and contact this account as a mentor.
    /// Profile approval is checked separately.
    pub fn is_reachable_mentor(&self) -> bool {
        self.is_active && self.role == Role::Mentor
    }

    /// Effective capability: the role table, gated by the account being
    /// active. Reviewing applications follows the admin flag alone, so an
    /// admin whose own mentor application was approved keeps review access.
    pub fn can(&self, action: Action) -> bool {
        if !self.is_active {
            return false;
        }
        match action {
            Action::ReviewApplications => self.is_admin,
            _ => self.role.can(action),
        }
    }
}

/// Data needed to insert a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_admin: bool,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "amina@example.com")]
    pub email: String,
    #[schema(example = "Amina")]
    pub first_name: String,
    #[schema(example = "Uwase")]
    pub last_name: String,
    pub role: Role,
    pub is_admin: bool,
    pub is_active: bool,
    pub admin_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_admin: user.is_admin,
            is_active: user.is_active,
            admin_verified_at: user.admin_verified_at,
            created_at: user.created_at,
        }
    }
}

/// Identity of the counterpart joined into workflow listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::user;
    use super::*;

    #[test]
    fn test_inactive_user_can_do_nothing() {
        let mut mentee = user(Role::Mentee);
        assert!(mentee.can(Action::SendRequest));

        mentee.is_active = false;
        for action in Action::ALL {
            assert!(!mentee.can(action));
        }
    }

    #[test]
    fn test_review_requires_admin_flag() {
        let mut admin = user(Role::Admin);
        assert!(admin.can(Action::ReviewApplications));

        admin.is_admin = false;
        assert!(!admin.can(Action::ReviewApplications));
        assert!(admin.can(Action::ReadNotifications));
    }

    #[test]
    fn test_admin_flag_grants_review_whatever_the_role() {
        let mut mentor = user(Role::Mentor);
        assert!(!mentor.can(Action::ReviewApplications));

        mentor.is_admin = true;
        assert!(mentor.can(Action::ReviewApplications));
        assert!(mentor.can(Action::RespondToRequest));

        mentor.is_active = false;
        assert!(!mentor.can(Action::ReviewApplications));
    }

    #[test]
    fn test_reachable_mentor_must_be_active_mentor() {
        let mut mentor = user(Role::Mentor);
        assert!(mentor.is_reachable_mentor());
        assert!(!user(Role::Mentee).is_reachable_mentor());

        mentor.is_active = false;
        assert!(!mentor.is_reachable_mentor());
    }

    #[test]
    fn test_response_hides_password_and_uses_camel_case() {
        let json = serde_json::to_value(UserResponse::from(user(Role::Mentor))).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["firstName"], "Test");
        assert_eq!(json["role"], "MENTOR");
        assert_eq!(json["isAdmin"], false);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(user(Role::Mentee).display_name(), "Test User");
    }
}
