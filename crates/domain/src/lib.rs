//! Domain layer for event scheduling and invitations.
//!
//! This crate provides:
//! - Period, location and time-window value objects
//! - `Event` and `Invitation` aggregates with their rules
//! - Repository contracts and an in-memory implementation
//! - The observer contract and a fail-fast dispatcher
//! - Services for creating, finding and updating events and managing invitations

pub mod error;
pub mod event;
pub mod invitation;
pub mod list_request;
pub mod observer;
pub mod period;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use error::DomainError;
pub use event::{Event, EventError, NewEvent};
pub use invitation::{EventRef, Invitation, InvitationError, InvitationEventType, InvitationState};
pub use list_request::ListRequest;
pub use observer::{Observer, ObserverError, Observers};
pub use period::{EventPeriod, Period, PeriodError};
pub use repository::{
    Adder, BoxError, Finder, InMemoryRepository, InviteFinder, Inviter, RepositoryError, Updater,
};
pub use services::{
    CreateEvent, EventCreator, EventCreatorConfig, EventFinder, EventFinderConfig, EventUpdater,
    EventUpdaterConfig, InvitationService, InvitationServiceConfig, ListEvents, LocationFilter,
    UpcomingFilter, UpdateEvent,
};
pub use value_objects::{Distance, Location, TimeInterval};

pub use common::{EventId, UserId};
