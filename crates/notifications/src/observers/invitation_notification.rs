//! E-mails invited users.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{Invitation, Observer, ObserverError};

use crate::services::{Email, Mailer};

const OBSERVER_NAME: &str = "invitation mailer";

/// Sends an invitation e-mail to the invited user.
pub struct InvitationNotificationObserver {
    mailer: Arc<dyn Mailer>,
    sender: String,
}

impl InvitationNotificationObserver {
    /// Creates a new observer sending mail from `sender`.
    pub fn new(mailer: Arc<dyn Mailer>, sender: impl Into<String>) -> Self {
        Self {
            mailer,
            sender: sender.into(),
        }
    }

    fn compose(&self, invitation: &Invitation) -> Email {
        let event = invitation.event();
        let registration = event.registration_period;

        Email {
            from: self.sender.clone(),
            recipient: invitation.invited_user(),
            subject: format!("You are invited to {}", event.name),
            body: format!(
                "You have been invited to \"{}\" (event {}). Registration is open until {}.",
                event.name,
                event.id,
                registration.end().to_rfc3339()
            ),
        }
    }
}

#[async_trait]
impl Observer<Invitation> for InvitationNotificationObserver {
    fn name(&self) -> &'static str {
        OBSERVER_NAME
    }

    async fn notify(&self, invitation: &Invitation) -> Result<(), ObserverError> {
        self.mailer
            .send(self.compose(invitation))
            .await
            .map_err(|e| ObserverError::new(OBSERVER_NAME, e))?;

        tracing::info!(
            event_id = %invitation.event_id(),
            user_id = %invitation.invited_user(),
            "invitation e-mail sent"
        );
        Ok(())
    }
}
