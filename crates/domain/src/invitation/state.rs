//! Invitation state machine.

use serde::{Deserialize, Serialize};

/// The state of a stored invitation.
///
/// ```text
/// (none) ──invite──► Pending ──accept──► Accepted ──remove──► (none)
///    └──────────────────join────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InvitationState {
    #[default]
    Pending,
    Accepted,
}

impl InvitationState {
    /// Returns true if the invitation can still be accepted.
    pub fn can_accept(&self) -> bool {
        matches!(self, InvitationState::Pending)
    }

    /// Returns true if the participant can be removed from the event.
    pub fn can_remove(&self) -> bool {
        matches!(self, InvitationState::Accepted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationState::Pending => "Pending",
            InvitationState::Accepted => "Accepted",
        }
    }
}

impl std::fmt::Display for InvitationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert!(InvitationState::Pending.can_accept());
        assert!(!InvitationState::Pending.can_remove());
        assert!(!InvitationState::Accepted.can_accept());
        assert!(InvitationState::Accepted.can_remove());
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(InvitationState::default(), InvitationState::Pending);
        assert_eq!(InvitationState::default().to_string(), "Pending");
    }
}
