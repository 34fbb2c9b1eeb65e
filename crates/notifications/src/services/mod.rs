//! Delivery capabilities used by the observers, with in-memory implementations.

pub mod mailer;
pub mod publisher;

pub use mailer::{Email, InMemoryMailer, Mailer};
pub use publisher::{InMemoryPublisher, PublishedMessage, Publisher};
