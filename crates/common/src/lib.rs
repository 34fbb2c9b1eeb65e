//! Shared types for the event scheduling workspace.

pub mod types;

pub use types::{EventId, UserId};
