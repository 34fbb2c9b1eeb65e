//! Publishes updated events to the message bus.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{Event, Observer, ObserverError};
use serde::{Deserialize, Serialize};

use crate::error::NotificationError;
use crate::services::Publisher;

const OBSERVER_NAME: &str = "event update publisher";

/// Envelope published for every updated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUpdateMessage {
    pub event: Event,
}

/// Serializes the event into an [`EventUpdateMessage`] and publishes it.
pub struct EventUpdateObserver {
    publisher: Arc<dyn Publisher>,
}

impl EventUpdateObserver {
    /// Creates a new observer over `publisher`.
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl Observer<Event> for EventUpdateObserver {
    fn name(&self) -> &'static str {
        OBSERVER_NAME
    }

    async fn notify(&self, event: &Event) -> Result<(), ObserverError> {
        let message = EventUpdateMessage {
            event: event.clone(),
        };
        let payload = serde_json::to_vec(&message)
            .map_err(|e| ObserverError::new(OBSERVER_NAME, NotificationError::from(e)))?;

        self.publisher
            .publish(payload)
            .await
            .map_err(|e| ObserverError::new(OBSERVER_NAME, e))?;

        tracing::debug!(event_id = %event.external_id(), "event update published");
        Ok(())
    }
}
