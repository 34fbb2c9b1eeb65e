//! Mail transport trait and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::UserId;
use tokio::sync::Mutex;

use crate::error::{NotificationError, Result};

/// An e-mail addressed to a user. The transport resolves the address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub recipient: UserId,
    pub subject: String,
    pub body: String,
}

/// Sends e-mails.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<()>;
}

#[derive(Debug, Default)]
struct InMemoryMailerState {
    outbox: Vec<Email>,
    fail_on_send: bool,
}

/// In-memory mailer that keeps sent mail in an outbox.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailer {
    state: Arc<Mutex<InMemoryMailerState>>,
}

impl InMemoryMailer {
    /// Creates a new in-memory mailer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the mailer to reject subsequent mail.
    pub async fn set_fail_on_send(&self, fail: bool) {
        self.state.lock().await.fail_on_send = fail;
    }

    /// Returns every e-mail sent so far.
    pub async fn outbox(&self) -> Vec<Email> {
        self.state.lock().await.outbox.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.state.lock().await.outbox.len()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, email: Email) -> Result<()> {
        let mut state = self.state.lock().await;

        if state.fail_on_send {
            return Err(NotificationError::Mail("SMTP connection refused".to_string()));
        }

        tracing::debug!(recipient = %email.recipient, subject = %email.subject, "mail queued");
        state.outbox.push(email);
        Ok(())
    }
}
