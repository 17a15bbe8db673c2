//! Status state machines for mentor applications and mentorship requests.
//!
//! Each machine is a transition table; any (state, event) pair missing from
//! the table is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::errors::AppError;

/// A transition that is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{subject} already processed")]
pub struct InvalidTransition {
    pub subject: &'static str,
    pub from: &'static str,
    pub event: &'static str,
}

/// Finite state machine driven by an explicit transition table.
pub trait StateMachine: Copy + Eq + Sized + 'static {
    type Event: Copy + Eq + 'static;

    /// Human name of the thing whose status this is, used in errors.
    const SUBJECT: &'static str;

    /// `(from, event, to)` triples.
    const TRANSITIONS: &'static [(Self, Self::Event, Self)];

    fn state_name(self) -> &'static str;

    fn event_name(event: Self::Event) -> &'static str;

    /// Resolve the state reached from `self` on `event`.
    fn next(self, event: Self::Event) -> Result<Self, InvalidTransition> {
        Self::TRANSITIONS
            .iter()
            .find(|(from, on, _)| *from == self && *on == event)
            .map(|(_, _, to)| *to)
            .ok_or(InvalidTransition {
                subject: Self::SUBJECT,
                from: self.state_name(),
                event: Self::event_name(event),
            })
    }

    /// A state with no outgoing transitions.
    fn is_terminal(self) -> bool {
        !Self::TRANSITIONS.iter().any(|(from, _, _)| *from == self)
    }
}

// =============================================================================
// Mentor applications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationEvent {
    Approve,
    Reject,
}

impl StateMachine for ApplicationStatus {
    type Event = ApplicationEvent;

    const SUBJECT: &'static str = "Application";

    const TRANSITIONS: &'static [(Self, Self::Event, Self)] = &[
        (
            ApplicationStatus::Pending,
            ApplicationEvent::Approve,
            ApplicationStatus::Approved,
        ),
        (
            ApplicationStatus::Pending,
            ApplicationEvent::Reject,
            ApplicationStatus::Rejected,
        ),
    ];

    fn state_name(self) -> &'static str {
        self.as_str()
    }

    fn event_name(event: ApplicationEvent) -> &'static str {
        match event {
            ApplicationEvent::Approve => "approve",
            ApplicationEvent::Reject => "reject",
        }
    }
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown application status: {}", s)))
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Mentorship requests
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    Accept,
    Reject,
}

impl StateMachine for RequestStatus {
    type Event = RequestEvent;

    const SUBJECT: &'static str = "Request";

    const TRANSITIONS: &'static [(Self, Self::Event, Self)] = &[
        (RequestStatus::Pending, RequestEvent::Accept, RequestStatus::Accepted),
        (RequestStatus::Pending, RequestEvent::Reject, RequestStatus::Rejected),
    ];

    fn state_name(self) -> &'static str {
        self.as_str()
    }

    fn event_name(event: RequestEvent) -> &'static str {
        match event {
            RequestEvent::Accept => "accept",
            RequestEvent::Reject => "reject",
        }
    }
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [
        RequestStatus::Pending,
        RequestStatus::Accepted,
        RequestStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Accepted => "ACCEPTED",
            RequestStatus::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown request status: {}", s)))
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_transition_table_exhaustive() {
        use ApplicationEvent::*;
        use ApplicationStatus::*;

        for from in ApplicationStatus::ALL {
            for event in [Approve, Reject] {
                let expected = match (from, event) {
                    (Pending, Approve) => Some(Approved),
                    (Pending, Reject) => Some(Rejected),
                    _ => None,
                };
                assert_eq!(from.next(event).ok(), expected, "{} on {:?}", from, event);
            }
        }
    }

    #[test]
    fn test_request_transition_table_exhaustive() {
        use RequestEvent::*;
        use RequestStatus::*;

        for from in RequestStatus::ALL {
            for event in [Accept, Reject] {
                let expected = match (from, event) {
                    (Pending, Accept) => Some(Accepted),
                    (Pending, Reject) => Some(Rejected),
                    _ => None,
                };
                assert_eq!(from.next(event).ok(), expected, "{} on {:?}", from, event);
            }
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ApplicationStatus::Pending.is_terminal());
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = ApplicationStatus::Approved
            .next(ApplicationEvent::Approve)
            .unwrap_err();
        assert_eq!(err.to_string(), "Application already processed");
        assert_eq!(err.from, "APPROVED");
        assert_eq!(err.event, "approve");

        let err = RequestStatus::Rejected.next(RequestEvent::Accept).unwrap_err();
        assert_eq!(err.to_string(), "Request already processed");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "APPROVED".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Approved
        );
        assert_eq!("PENDING".parse::<RequestStatus>().unwrap(), RequestStatus::Pending);
        assert!("approved".parse::<ApplicationStatus>().is_err());
        assert!("DONE".parse::<RequestStatus>().is_err());
    }
}
