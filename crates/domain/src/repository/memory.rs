use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{EventId, UserId};
use tokio::sync::RwLock;

use super::{Adder, Finder, InviteFinder, Inviter, RepositoryError, Result, Updater};
use crate::event::Event;
use crate::invitation::{EventRef, Invitation};
use crate::list_request::ListRequest;

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    events: HashMap<EventId, Event>,
    /// Keyed by pair; the value is the acceptance time of accepted invitations.
    invitations: HashMap<(EventId, UserId), Option<DateTime<Utc>>>,
}

impl State {
    /// Accepted users of an event, in order of acceptance.
    fn participants(&self, event_id: EventId) -> Vec<UserId> {
        let mut accepted: Vec<(DateTime<Utc>, UserId)> = self
            .invitations
            .iter()
            .filter_map(|(&(event, user), accepted_at)| match accepted_at {
                Some(at) if event == event_id => Some((*at, user)),
                _ => None,
            })
            .collect();
        accepted.sort();
        accepted.into_iter().map(|(_, user)| user).collect()
    }

    fn hydrate(&self, event: &Event) -> Event {
        let mut event = event.clone();
        event.set_participants(self.participants(event.external_id()));
        event
    }

    fn event(&self, id: EventId) -> Result<Event> {
        self.events
            .get(&id)
            .map(|event| self.hydrate(event))
            .ok_or(RepositoryError::EventNotFound(id))
    }
}

/// In-memory storage for events and invitations.
///
/// Implements every repository contract over one shared state, so clones
/// handed to different services observe each other's writes. Participants
/// are derived from accepted invitations on every read.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored events.
    pub async fn event_count(&self) -> usize {
        self.state.read().await.events.len()
    }

    /// Returns the number of stored invitations, pending or accepted.
    pub async fn invitation_count(&self) -> usize {
        self.state.read().await.invitations.len()
    }

    /// Clears all events and invitations.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.events.clear();
        state.invitations.clear();
    }
}

fn matches_request(request: &ListRequest, owner: Option<UserId>, event: &Event) -> bool {
    if let Some(name) = request.name()
        && !event.name().to_lowercase().contains(&name.to_lowercase())
    {
        return false;
    }
    if request.user().is_some() && owner != Some(event.owner()) {
        return false;
    }
    if let Some(public) = request.public()
        && event.is_public() != public
    {
        return false;
    }
    if let Some(interval) = request.interval()
        && !interval.contains(event.event_period().start())
    {
        return false;
    }
    if let Some(distance) = request.distance() {
        match event.location() {
            Some(location) if distance.covers(&location) => {}
            _ => return false,
        }
    }
    true
}

#[async_trait]
impl Adder for InMemoryRepository {
    async fn add(&self, event: &mut Event) -> Result<()> {
        let mut state = self.state.write().await;

        if state.events.contains_key(&event.external_id()) {
            return Err(RepositoryError::DuplicateEvent(event.external_id()));
        }

        state.next_id += 1;
        event.assign_id(state.next_id);
        state.events.insert(event.external_id(), event.clone());

        Ok(())
    }
}

#[async_trait]
impl Updater for InMemoryRepository {
    async fn update(&self, event: &Event) -> Result<()> {
        let mut state = self.state.write().await;

        let Some(stored) = state.events.get_mut(&event.external_id()) else {
            return Err(RepositoryError::EventNotFound(event.external_id()));
        };

        let id = stored.id();
        *stored = event.clone();
        if let Some(id) = id {
            stored.assign_id(id);
        }

        Ok(())
    }
}

#[async_trait]
impl Finder for InMemoryRepository {
    async fn find_by(&self, request: &ListRequest) -> Result<Vec<Event>> {
        let state = self.state.read().await;
        // An owner filter that does not parse matches nothing.
        let owner = request.user().and_then(|user| UserId::parse(user).ok());

        let mut events: Vec<Event> = state
            .events
            .values()
            .map(|event| state.hydrate(event))
            .filter(|event| matches_request(request, owner, event))
            .collect();
        events.sort_by_key(|event| event.id());

        Ok(events)
    }

    async fn find_by_external_id(&self, id: EventId) -> Result<Event> {
        self.state.read().await.event(id)
    }
}

#[async_trait]
impl Inviter for InMemoryRepository {
    async fn invite(&self, invitation: &Invitation) -> Result<()> {
        let mut state = self.state.write().await;

        let event_id = invitation.event_id();
        if !state.events.contains_key(&event_id) {
            return Err(RepositoryError::EventNotFound(event_id));
        }

        let key = (event_id, invitation.invited_user());
        // Only a pending invitation may be upgraded in place.
        if let Some(stored) = state.invitations.get(&key)
            && (stored.is_some() || invitation.accepted_at().is_none())
        {
            return Err(RepositoryError::DuplicateInvitation {
                event_id: key.0,
                user_id: key.1,
            });
        }

        state.invitations.insert(key, invitation.accepted_at());

        Ok(())
    }

    async fn accept(&self, invitation: &Invitation) -> Result<()> {
        let mut state = self.state.write().await;

        let key = (invitation.event_id(), invitation.invited_user());
        let Some(accepted_at) = state.invitations.get_mut(&key) else {
            return Err(RepositoryError::InvitationNotFound {
                event_id: key.0,
                user_id: key.1,
            });
        };
        *accepted_at = invitation.accepted_at();

        Ok(())
    }

    async fn remove(&self, invitation: &Invitation) -> Result<()> {
        let mut state = self.state.write().await;

        let key = (invitation.event_id(), invitation.invited_user());
        if state.invitations.remove(&key).is_none() {
            return Err(RepositoryError::InvitationNotFound {
                event_id: key.0,
                user_id: key.1,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl InviteFinder for InMemoryRepository {
    async fn find_by(&self, event_id: EventId, user_id: UserId) -> Result<Option<Invitation>> {
        let state = self.state.read().await;

        let Some(accepted_at) = state.invitations.get(&(event_id, user_id)).copied() else {
            return Ok(None);
        };
        let event = state.event(event_id)?;

        Ok(Some(Invitation::restore(
            EventRef::from(&event),
            user_id,
            accepted_at,
        )))
    }
}
