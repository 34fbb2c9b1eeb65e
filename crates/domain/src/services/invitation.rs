use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use common::{EventId, UserId};

use crate::error::DomainError;
use crate::invitation::{EventRef, Invitation, InvitationError, InvitationEventType};
use crate::observer::{Observer, Observers};
use crate::repository::{Finder, InviteFinder, Inviter};

use super::{parse_event_id, parse_user_id};

const SERVICE_NAME: &str = "invitation";

/// Collaborators of [`InvitationService`].
#[derive(Default)]
pub struct InvitationServiceConfig {
    pub event_finder: Option<Arc<dyn Finder>>,
    pub inviter: Option<Arc<dyn Inviter>>,
    pub invite_finder: Option<Arc<dyn InviteFinder>>,
    pub observers: HashMap<InvitationEventType, Observers<Invitation>>,
}

impl InvitationServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_finder(mut self, finder: Arc<dyn Finder>) -> Self {
        self.event_finder = Some(finder);
        self
    }

    pub fn with_inviter(mut self, inviter: Arc<dyn Inviter>) -> Self {
        self.inviter = Some(inviter);
        self
    }

    pub fn with_invite_finder(mut self, finder: Arc<dyn InviteFinder>) -> Self {
        self.invite_finder = Some(finder);
        self
    }

    /// Subscribes `observer` to one kind of transition.
    pub fn with_observer(
        mut self,
        kind: InvitationEventType,
        observer: Arc<dyn Observer<Invitation>>,
    ) -> Self {
        self.observers.entry(kind).or_default().register(observer);
        self
    }
}

/// Drives invitations through `invite`, `accept`, `remove` and `join`.
///
/// Every operation takes the event and user IDs in textual form; the user ID
/// is parsed first.
pub struct InvitationService {
    event_finder: Arc<dyn Finder>,
    inviter: Arc<dyn Inviter>,
    invite_finder: Arc<dyn InviteFinder>,
    observers: HashMap<InvitationEventType, Observers<Invitation>>,
}

impl InvitationService {
    /// Creates a new invitation service.
    pub fn new(config: InvitationServiceConfig) -> Result<Self, DomainError> {
        let event_finder = config.event_finder.ok_or(DomainError::ResourceRequired {
            service: SERVICE_NAME,
            resource: "event finder",
        })?;
        let inviter = config.inviter.ok_or(DomainError::ResourceRequired {
            service: SERVICE_NAME,
            resource: "inviter",
        })?;
        let invite_finder = config.invite_finder.ok_or(DomainError::ResourceRequired {
            service: SERVICE_NAME,
            resource: "invite finder",
        })?;

        Ok(Self {
            event_finder,
            inviter,
            invite_finder,
            observers: config.observers,
        })
    }

    /// Subscribes `observer` to one kind of transition.
    ///
    /// Takes `&mut self`, so registration happens before the service is shared.
    pub fn add_observer(
        &mut self,
        kind: InvitationEventType,
        observer: Arc<dyn Observer<Invitation>>,
    ) {
        self.observers.entry(kind).or_default().register(observer);
    }

    /// Returns the number of observers subscribed to `kind`.
    pub fn observer_count(&self, kind: InvitationEventType) -> usize {
        self.observers.get(&kind).map_or(0, Observers::len)
    }

    /// Creates a pending invitation for the user.
    #[tracing::instrument(skip(self))]
    pub async fn invite(&self, event_id: &str, user_id: &str) -> Result<Invitation, DomainError> {
        let (event_id, user_id) = parse_ids(event_id, user_id)?;

        // 1. Reject a second invitation for the same pair
        if self.find_invitation(event_id, user_id).await?.is_some() {
            return Err(InvitationError::AlreadyExists.into());
        }

        // 2. Load the event and build the invitation
        let event = self
            .event_finder
            .find_by_external_id(event_id)
            .await
            .map_err(DomainError::repository("event not found"))?;
        let invitation = Invitation::new(EventRef::from(&event), user_id)?;

        // 3. Store and notify
        self.inviter
            .invite(&invitation)
            .await
            .map_err(DomainError::repository("cannot store invitation"))?;

        metrics::counter!("invitations_sent_total").increment(1);
        tracing::info!(%event_id, %user_id, "user invited");

        self.notify(InvitationEventType::UserInvited, &invitation)
            .await?;

        Ok(invitation)
    }

    /// Accepts the user's pending invitation.
    #[tracing::instrument(skip(self))]
    pub async fn accept(&self, event_id: &str, user_id: &str) -> Result<Invitation, DomainError> {
        let (event_id, user_id) = parse_ids(event_id, user_id)?;

        let mut invitation = self
            .find_invitation(event_id, user_id)
            .await?
            .ok_or(InvitationError::NotFound)?;

        invitation.accept(Utc::now())?;

        self.inviter
            .accept(&invitation)
            .await
            .map_err(DomainError::repository("cannot store accepted invitation"))?;

        metrics::counter!("invitations_accepted_total").increment(1);
        tracing::info!(%event_id, %user_id, "invitation accepted");

        self.notify(InvitationEventType::UserAccepted, &invitation)
            .await?;

        Ok(invitation)
    }

    /// Removes an accepted participant from the event.
    ///
    /// Pending invitations cannot be removed. No observers are notified.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, event_id: &str, user_id: &str) -> Result<(), DomainError> {
        let (event_id, user_id) = parse_ids(event_id, user_id)?;

        let invitation = self
            .find_invitation(event_id, user_id)
            .await?
            .ok_or(InvitationError::NotFound)?;

        if !invitation.state().can_remove() {
            return Err(InvitationError::ParticipantNotFound.into());
        }

        self.inviter
            .remove(&invitation)
            .await
            .map_err(DomainError::repository("cannot remove invitation"))?;

        metrics::counter!("invitations_removed_total").increment(1);
        tracing::info!(%event_id, %user_id, "participant removed");

        Ok(())
    }

    /// Joins a public event without a prior invitation.
    ///
    /// An existing invitation for the pair is reused, otherwise one is
    /// created. Either way it goes through the accept guards.
    #[tracing::instrument(skip(self))]
    pub async fn join(&self, event_id: &str, user_id: &str) -> Result<Invitation, DomainError> {
        let (event_id, user_id) = parse_ids(event_id, user_id)?;

        // 1. Only public events can be joined
        let event = self
            .event_finder
            .find_by_external_id(event_id)
            .await
            .map_err(DomainError::repository("event not found"))?;

        if !event.is_public() {
            return Err(InvitationError::EventNotPublic.into());
        }

        // 2. Reuse or create the invitation, then accept it
        let mut invitation = match self.find_invitation(event_id, user_id).await? {
            Some(invitation) => invitation,
            None => Invitation::new(EventRef::from(&event), user_id)?,
        };
        invitation.accept(Utc::now())?;

        // 3. Store and notify
        self.inviter
            .invite(&invitation)
            .await
            .map_err(DomainError::repository("cannot store joined invitation"))?;

        metrics::counter!("invitations_joined_total").increment(1);
        tracing::info!(%event_id, %user_id, "user joined");

        self.notify(InvitationEventType::UserJoined, &invitation)
            .await?;

        Ok(invitation)
    }

    async fn find_invitation(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<Invitation>, DomainError> {
        self.invite_finder
            .find_by(event_id, user_id)
            .await
            .map_err(DomainError::repository("cannot look up invitation"))
    }

    async fn notify(
        &self,
        kind: InvitationEventType,
        invitation: &Invitation,
    ) -> Result<(), DomainError> {
        if let Some(observers) = self.observers.get(&kind) {
            tracing::debug!(
                channel = kind.as_str(),
                count = observers.len(),
                "notifying observers"
            );
            observers.notify_all(invitation).await?;
        }

        Ok(())
    }
}

fn parse_ids(event_id: &str, user_id: &str) -> Result<(EventId, UserId), DomainError> {
    let user_id = parse_user_id(user_id)?;
    let event_id = parse_event_id(event_id)?;
    Ok((event_id, user_id))
}
