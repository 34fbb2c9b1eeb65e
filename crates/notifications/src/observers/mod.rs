//! Observers bridging domain transitions to delivery services.

pub mod event_update;
pub mod invitation_notification;

pub use event_update::{EventUpdateMessage, EventUpdateObserver};
pub use invitation_notification::InvitationNotificationObserver;
