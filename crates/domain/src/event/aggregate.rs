//! Event aggregate implementation.

use chrono::{DateTime, TimeDelta, Utc};
use common::{EventId, UserId};
use serde::{Deserialize, Serialize};

use crate::period::{EventPeriod, Period};
use crate::value_objects::Location;

use super::EventError;

/// Input for [`Event::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub owner: UserId,
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub public: bool,
    pub location: Option<Location>,
    pub start: Option<DateTime<Utc>>,
    pub duration: TimeDelta,
    /// Closes registration earlier than the event start when set.
    pub registration_end: Option<DateTime<Utc>>,
}

/// A scheduled gathering with a bounded number of seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Storage surrogate key, assigned when the event is first persisted.
    #[serde(default)]
    id: Option<u64>,

    external_id: EventId,
    owner: UserId,
    name: String,
    description: String,
    capacity: u32,
    public: bool,
    location: Option<Location>,
    event_period: EventPeriod,
    registration_period: Period,

    /// Users with an accepted invitation.
    #[serde(default)]
    participants: Vec<UserId>,
}

impl Event {
    /// Creates a new event with a fresh external ID.
    ///
    /// Registration opens at `now` and closes at the event start, or at the
    /// explicit registration end if one is given.
    pub fn new(payload: NewEvent, now: DateTime<Utc>) -> Result<Self, EventError> {
        if payload.owner.is_nil() {
            return Err(EventError::UserIdRequired);
        }

        if payload.name.is_empty() {
            return Err(EventError::NameRequired);
        }

        let event_period = EventPeriod::with_start_and_duration(payload.start, payload.duration)?;

        let registration_end = match payload.registration_end {
            Some(end) if end > event_period.start() => {
                return Err(EventError::RegistrationEndsAfterStart);
            }
            Some(end) => end,
            None => event_period.start(),
        };
        let registration_period = Period::between(now, registration_end)?;

        Ok(Self {
            id: None,
            external_id: EventId::new(),
            owner: payload.owner,
            name: payload.name,
            description: payload.description,
            capacity: payload.capacity,
            public: payload.public,
            location: payload.location,
            event_period,
            registration_period,
            participants: Vec::new(),
        })
    }
}

// Query methods
impl Event {
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn external_id(&self) -> EventId {
        self.external_id
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn event_period(&self) -> EventPeriod {
        self.event_period
    }

    pub fn registration_period(&self) -> Period {
        self.registration_period
    }

    pub fn participants(&self) -> &[UserId] {
        &self.participants
    }

    /// Returns the number of accepted participants.
    pub fn participants_number(&self) -> usize {
        self.participants.len()
    }

    /// Returns true if there is a free seat and registration is open at `now`.
    pub fn open_to_join(&self, now: DateTime<Utc>) -> bool {
        (self.capacity as usize) > self.participants.len() && self.registration_period.contains(now)
    }
}

// Mutation methods
impl Event {
    /// Records the storage key. Called by `Adder` implementations.
    pub fn assign_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    /// Replaces the participant list with what storage holds.
    pub fn set_participants(&mut self, participants: Vec<UserId>) {
        self.participants = participants;
    }

    /// Renames the event. The name cannot be empty.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), EventError> {
        let name = name.into();
        if name.is_empty() {
            return Err(EventError::NameRequired);
        }

        self.name = name;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity;
    }

    pub fn set_public(&mut self, public: bool) {
        self.public = public;
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    /// Moves the event to `[start, end]`.
    pub fn reschedule(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), EventError> {
        self.event_period = EventPeriod::with_start_and_end_date(Some(start), Some(end))?;
        Ok(())
    }

    /// Sets the registration window to `[start, end]`.
    ///
    /// The window is not checked against the event start.
    pub fn set_registration_period(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), EventError> {
        self.registration_period = Period::between(start, end)?;
        Ok(())
    }
}
