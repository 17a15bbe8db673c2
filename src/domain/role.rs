//! Roles and the capabilities they grant.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_MENTEE, ROLE_MENTOR};
use crate::errors::AppError;

/// Closed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Mentor,
    Mentee,
}

/// Everything a caller can attempt that depends on who they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ReviewApplications,
    BrowseMentors,
    SendRequest,
    RespondToRequest,
    ListSentRequests,
    ListReceivedRequests,
    ReadNotifications,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::ReviewApplications,
        Action::BrowseMentors,
        Action::SendRequest,
        Action::RespondToRequest,
        Action::ListSentRequests,
        Action::ListReceivedRequests,
        Action::ReadNotifications,
    ];
}

/// Capability table.
pub fn can(role: Role, action: Action) -> bool {
    use Action::*;

    match role {
        Role::Admin => matches!(action, ReviewApplications | BrowseMentors | ReadNotifications),
        Role::Mentor => matches!(
            action,
            BrowseMentors | RespondToRequest | ListReceivedRequests | ReadNotifications
        ),
        Role::Mentee => matches!(
            action,
            BrowseMentors | SendRequest | ListSentRequests | ReadNotifications
        ),
    }
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Mentor, Role::Mentee];

    pub fn can(self, action: Action) -> bool {
        can(self, action)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Mentor => ROLE_MENTOR,
            Role::Mentee => ROLE_MENTEE,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_MENTOR => Ok(Role::Mentor),
            ROLE_MENTEE => Ok(Role::Mentee),
            other => Err(AppError::internal(format!("Unknown stored role: {}", other))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a visitor may pick when signing up. Admins are never self-registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Mentor,
    Mentee,
}

impl From<AccountType> for Role {
    fn from(kind: AccountType) -> Self {
        match kind {
            AccountType::Mentor => Role::Mentor,
            AccountType::Mentee => Role::Mentee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(role: Role, action: Action) -> bool {
        use Action::*;
        match (role, action) {
            (Role::Admin, ReviewApplications) => true,
            (_, BrowseMentors) | (_, ReadNotifications) => true,
            (Role::Mentor, RespondToRequest | ListReceivedRequests) => true,
            (Role::Mentee, SendRequest | ListSentRequests) => true,
            _ => false,
        }
    }

    #[test]
    fn test_capability_table_exhaustive() {
        for role in Role::ALL {
            for action in Action::ALL {
                assert_eq!(
                    can(role, action),
                    expected(role, action),
                    "{:?} / {:?}",
                    role,
                    action
                );
            }
        }
    }

    #[test]
    fn test_only_admins_review_and_only_mentees_send() {
        let reviewers: Vec<_> = Role::ALL
            .into_iter()
            .filter(|r| r.can(Action::ReviewApplications))
            .collect();
        assert_eq!(reviewers, vec![Role::Admin]);

        let senders: Vec<_> = Role::ALL
            .into_iter()
            .filter(|r| r.can(Action::SendRequest))
            .collect();
        assert_eq!(senders, vec![Role::Mentee]);
    }

    #[test]
    fn test_role_string_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Mentor).unwrap(), "\"MENTOR\"");
        let kind: AccountType = serde_json::from_str("\"mentee\"").unwrap();
        assert_eq!(Role::from(kind), Role::Mentee);
    }
}
