//! Invitation aggregate and related types.

mod aggregate;
mod state;

pub use aggregate::{EventRef, Invitation};
pub use state::InvitationState;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during invitation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvitationError {
    #[error("Invited user ID cannot be empty")]
    InvitedUserRequired,

    #[error("Invitation already exists")]
    AlreadyExists,

    #[error("Invitation not found")]
    NotFound,

    #[error("Invitation has already been accepted")]
    AlreadyAccepted,

    #[error("Event capacity has been reached")]
    CapacityFull,

    #[error("Event registration is closed")]
    RegistrationClosed,

    #[error("There is no accepted participant in given event")]
    ParticipantNotFound,

    #[error("Event is private")]
    EventNotPublic,
}

/// The kinds of invitation transitions observers can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvitationEventType {
    UserInvited,
    UserAccepted,
    UserJoined,
}

impl InvitationEventType {
    /// Returns the channel name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationEventType::UserInvited => "UserInvitedEvent",
            InvitationEventType::UserAccepted => "UserAcceptedEvent",
            InvitationEventType::UserJoined => "UserJoinedEvent",
        }
    }
}

impl std::fmt::Display for InvitationEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
