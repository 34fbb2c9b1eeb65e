//! Notification observers for the event scheduling domain.
//!
//! This crate provides the side effects registered on the domain services:
//! - `EventUpdateObserver` publishes updated events as JSON to a message bus
//! - `InvitationNotificationObserver` e-mails invited users
//!
//! Delivery goes through the `Publisher` and `Mailer` traits; in-memory
//! implementations of both are included.

pub mod error;
pub mod observers;
pub mod services;

pub use error::NotificationError;
pub use observers::{EventUpdateMessage, EventUpdateObserver, InvitationNotificationObserver};
pub use services::{Email, InMemoryMailer, InMemoryPublisher, Mailer, PublishedMessage, Publisher};
