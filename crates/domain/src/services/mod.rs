//! Application services orchestrating aggregates, storage and observers.
//!
//! Each service is built from a config struct whose collaborators are
//! optional; `new` fails with [`DomainError::ResourceRequired`] when one is
//! missing. Built services only hold `Arc` handles and can be shared freely.
//!
//! [`DomainError::ResourceRequired`]: crate::DomainError::ResourceRequired

mod event_creator;
mod event_finder;
mod event_updater;
mod invitation;

pub use event_creator::{CreateEvent, EventCreator, EventCreatorConfig};
pub use event_finder::{EventFinder, EventFinderConfig, ListEvents, LocationFilter, UpcomingFilter};
pub use event_updater::{EventUpdater, EventUpdaterConfig, UpdateEvent};
pub use invitation::{InvitationService, InvitationServiceConfig};

use common::{EventId, UserId};

use crate::error::DomainError;

fn parse_user_id(input: &str) -> Result<UserId, DomainError> {
    UserId::parse(input).map_err(DomainError::InvalidUserId)
}

fn parse_event_id(input: &str) -> Result<EventId, DomainError> {
    EventId::parse(input).map_err(DomainError::InvalidEventId)
}
