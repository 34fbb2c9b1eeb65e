//! Event aggregate and related types.

mod aggregate;

pub use aggregate::{Event, NewEvent};

use thiserror::Error;

use crate::period::PeriodError;

/// Errors that can occur when building or changing an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The owner ID is nil.
    #[error("User ID cannot be empty")]
    UserIdRequired,

    /// The name is empty.
    #[error("Event must be named")]
    NameRequired,

    /// An explicit registration end lies after the event start.
    #[error("Registration must end before the event starts")]
    RegistrationEndsAfterStart,

    /// The event or registration period is invalid.
    #[error("Invalid period: {0}")]
    Period(#[from] PeriodError),
}
