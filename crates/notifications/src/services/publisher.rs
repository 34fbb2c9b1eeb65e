//! Message bus publisher trait and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{NotificationError, Result};

/// Publishes opaque payloads to a message bus.
///
/// Routing is configured on the implementation, not per message.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, payload: Vec<u8>) -> Result<()>;
}

/// A message captured by [`InMemoryPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub routing_key: String,
    pub payload: Vec<u8>,
}

#[derive(Debug, Default)]
struct InMemoryPublisherState {
    messages: Vec<PublishedMessage>,
    fail_on_publish: bool,
}

/// In-memory publisher that records every message.
#[derive(Debug, Clone)]
pub struct InMemoryPublisher {
    routing_key: String,
    state: Arc<Mutex<InMemoryPublisherState>>,
}

impl InMemoryPublisher {
    /// Creates a publisher tagging messages with `routing_key`.
    pub fn new(routing_key: impl Into<String>) -> Self {
        Self {
            routing_key: routing_key.into(),
            state: Arc::default(),
        }
    }

    pub fn routing_key(&self) -> &str {
        &self.routing_key
    }

    /// Configures the publisher to reject subsequent messages.
    pub async fn set_fail_on_publish(&self, fail: bool) {
        self.state.lock().await.fail_on_publish = fail;
    }

    /// Returns every message published so far.
    pub async fn messages(&self) -> Vec<PublishedMessage> {
        self.state.lock().await.messages.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.state.lock().await.messages.len()
    }
}

#[async_trait]
impl Publisher for InMemoryPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<()> {
        let mut state = self.state.lock().await;

        if state.fail_on_publish {
            return Err(NotificationError::Publish("broker unavailable".to_string()));
        }

        state.messages.push(PublishedMessage {
            routing_key: self.routing_key.clone(),
            payload,
        });
        Ok(())
    }
}
