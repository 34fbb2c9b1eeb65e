//! Storage contracts for events and invitations.
//!
//! Services depend on these narrow traits only. Any backend can implement
//! them; [`InMemoryRepository`] implements all five.

mod memory;

pub use memory::InMemoryRepository;

use async_trait::async_trait;
use common::{EventId, UserId};
use thiserror::Error;

use crate::event::Event;
use crate::invitation::Invitation;
use crate::list_request::ListRequest;

/// Boxed error type for backend failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors reported by storage implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Event already stored: {0}")]
    DuplicateEvent(EventId),

    #[error("Invitation not found for event {event_id} and user {user_id}")]
    InvitationNotFound { event_id: EventId, user_id: UserId },

    #[error("Invitation already stored for event {event_id} and user {user_id}")]
    DuplicateInvitation { event_id: EventId, user_id: UserId },

    /// Any other failure of the underlying store.
    #[error("Storage backend error: {0}")]
    Backend(#[source] BoxError),
}

impl RepositoryError {
    /// Wraps an arbitrary backend error.
    pub fn backend(source: impl Into<BoxError>) -> Self {
        Self::Backend(source.into())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Persists new events.
#[async_trait]
pub trait Adder: Send + Sync {
    /// Stores `event` and assigns its storage ID.
    async fn add(&self, event: &mut Event) -> Result<()>;
}

/// Persists changes to existing events.
#[async_trait]
pub trait Updater: Send + Sync {
    /// Overwrites the stored event with the same external ID.
    ///
    /// Participants are owned by the invitation store and are not written.
    async fn update(&self, event: &Event) -> Result<()>;
}

/// Reads events.
#[async_trait]
pub trait Finder: Send + Sync {
    /// Returns all events matching every criterion present in `request`.
    async fn find_by(&self, request: &ListRequest) -> Result<Vec<Event>>;

    /// Returns the event with the given external ID.
    ///
    /// Fails with [`RepositoryError::EventNotFound`] if there is none.
    async fn find_by_external_id(&self, id: EventId) -> Result<Event>;
}

/// Persists invitation transitions.
#[async_trait]
pub trait Inviter: Send + Sync {
    /// Stores a new invitation for the pair.
    ///
    /// An accepted invitation also makes the user a participant and may
    /// replace a pending one for the same pair. Anything else already stored
    /// for the pair fails with [`RepositoryError::DuplicateInvitation`].
    async fn invite(&self, invitation: &Invitation) -> Result<()>;

    /// Records that a stored invitation was accepted.
    async fn accept(&self, invitation: &Invitation) -> Result<()>;

    /// Deletes an invitation and the participant entry it backs.
    async fn remove(&self, invitation: &Invitation) -> Result<()>;
}

/// Reads invitations.
#[async_trait]
pub trait InviteFinder: Send + Sync {
    /// Returns the invitation for the pair, if any.
    async fn find_by(&self, event_id: EventId, user_id: UserId) -> Result<Option<Invitation>>;
}
