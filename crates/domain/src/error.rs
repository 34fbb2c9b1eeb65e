//! Domain error types.

use thiserror::Error;

use crate::event::EventError;
use crate::invitation::InvitationError;
use crate::observer::ObserverError;
use crate::repository::RepositoryError;

/// Errors returned by the application services.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A user ID could not be parsed.
    #[error("Cannot parse user ID: {0}")]
    InvalidUserId(#[source] uuid::Error),

    /// An event ID could not be parsed.
    #[error("Cannot parse event ID: {0}")]
    InvalidEventId(#[source] uuid::Error),

    /// An event rule was violated.
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// An invitation rule was violated.
    #[error("Invitation error: {0}")]
    Invitation(#[from] InvitationError),

    /// A storage collaborator failed.
    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },

    /// An observer failed after the change was persisted.
    #[error("Observer error: {0}")]
    Observer(#[from] ObserverError),

    /// A service was built without a required collaborator.
    #[error("Service {service} requires {resource}")]
    ResourceRequired {
        service: &'static str,
        resource: &'static str,
    },
}

impl DomainError {
    /// Returns a closure wrapping a repository error with `context`.
    pub fn repository(context: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| Self::Repository { context, source }
    }

    /// Returns the invitation error, if this is one.
    pub fn as_invitation(&self) -> Option<&InvitationError> {
        match self {
            DomainError::Invitation(e) => Some(e),
            _ => None,
        }
    }
}
