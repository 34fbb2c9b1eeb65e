//! Invitation aggregate implementation.

use chrono::{DateTime, Utc};
use common::{EventId, UserId};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::period::Period;

use super::{InvitationError, InvitationState};

/// The slice of an event an invitation needs to enforce its guards.
///
/// Copied from the event when the invitation is created or loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRef {
    pub id: EventId,
    pub owner: UserId,
    pub name: String,
    pub capacity: u32,
    pub participants: usize,
    pub registration_period: Period,
    pub public: bool,
}

impl EventRef {
    /// Returns true once every seat is taken.
    pub fn capacity_reached(&self) -> bool {
        (self.capacity as usize) <= self.participants
    }
}

impl From<&Event> for EventRef {
    fn from(event: &Event) -> Self {
        Self {
            id: event.external_id(),
            owner: event.owner(),
            name: event.name().to_string(),
            capacity: event.capacity(),
            participants: event.participants_number(),
            registration_period: event.registration_period(),
            public: event.is_public(),
        }
    }
}

/// A user's membership in an event, pending or accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    event: EventRef,
    invited_user: UserId,
    accepted_at: Option<DateTime<Utc>>,
}

impl Invitation {
    /// Creates a pending invitation.
    pub fn new(event: EventRef, invited_user: UserId) -> Result<Self, InvitationError> {
        if invited_user.is_nil() {
            return Err(InvitationError::InvitedUserRequired);
        }

        Ok(Self {
            event,
            invited_user,
            accepted_at: None,
        })
    }

    /// Rebuilds an invitation from storage without validation.
    pub fn restore(
        event: EventRef,
        invited_user: UserId,
        accepted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            event,
            invited_user,
            accepted_at,
        }
    }

    pub fn event(&self) -> &EventRef {
        &self.event
    }

    pub fn event_id(&self) -> EventId {
        self.event.id
    }

    pub fn invited_user(&self) -> UserId {
        self.invited_user
    }

    pub fn accepted_at(&self) -> Option<DateTime<Utc>> {
        self.accepted_at
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }

    pub fn state(&self) -> InvitationState {
        if self.is_accepted() {
            InvitationState::Accepted
        } else {
            InvitationState::Pending
        }
    }

    /// Accepts the invitation at `now`.
    ///
    /// Guards are checked in order: already accepted, capacity, registration
    /// window. On failure the invitation is left untouched.
    pub fn accept(&mut self, now: DateTime<Utc>) -> Result<(), InvitationError> {
        if !self.state().can_accept() {
            return Err(InvitationError::AlreadyAccepted);
        }

        if self.event.capacity_reached() {
            return Err(InvitationError::CapacityFull);
        }

        if !self.event.registration_period.contains(now) {
            return Err(InvitationError::RegistrationClosed);
        }

        self.accepted_at = Some(now);
        Ok(())
    }
}
