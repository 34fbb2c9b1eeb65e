use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::DomainError;
use crate::event::Event;
use crate::list_request::ListRequest;
use crate::repository::Finder;

use super::parse_event_id;

const SERVICE_NAME: &str = "event finder";

/// Restricts a listing to events near a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFilter {
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

/// Restricts a listing to events starting around a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingFilter {
    pub date: DateTime<Utc>,
    pub interval: TimeDelta,
}

/// Request to list events. Absent fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEvents {
    pub user: Option<String>,
    pub name: Option<String>,
    pub public: Option<bool>,
    pub location: Option<LocationFilter>,
    pub upcoming: Option<UpcomingFilter>,
}

impl From<ListEvents> for ListRequest {
    fn from(request: ListEvents) -> Self {
        let mut list = ListRequest::new();

        if let Some(user) = request.user {
            list = list.with_user(user);
        }
        if let Some(name) = request.name {
            list = list.with_name(name);
        }
        if let Some(public) = request.public {
            list = list.with_public(public);
        }
        if let Some(location) = request.location {
            list = list.with_distance(location.distance_km, location.latitude, location.longitude);
        }
        if let Some(upcoming) = request.upcoming {
            list = list.with_time_interval(upcoming.date, upcoming.interval);
        }

        list
    }
}

/// Collaborators of [`EventFinder`].
#[derive(Default)]
pub struct EventFinderConfig {
    pub finder: Option<Arc<dyn Finder>>,
}

impl EventFinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_finder(mut self, finder: Arc<dyn Finder>) -> Self {
        self.finder = Some(finder);
        self
    }
}

/// Read-only access to events.
pub struct EventFinder {
    finder: Arc<dyn Finder>,
}

impl EventFinder {
    /// Creates a new event finder.
    pub fn new(config: EventFinderConfig) -> Result<Self, DomainError> {
        let finder = config.finder.ok_or(DomainError::ResourceRequired {
            service: SERVICE_NAME,
            resource: "event finder",
        })?;

        Ok(Self { finder })
    }

    /// Lists events matching every present filter.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, request: ListEvents) -> Result<Vec<Event>, DomainError> {
        let request = ListRequest::from(request);
        let events = self
            .finder
            .find_by(&request)
            .await
            .map_err(DomainError::repository("cannot list events"))?;

        tracing::debug!(count = events.len(), "events listed");
        Ok(events)
    }

    /// Returns the event with the given external ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Event, DomainError> {
        let id = parse_event_id(id)?;

        self.finder
            .find_by_external_id(id)
            .await
            .map_err(DomainError::repository("event not found"))
    }
}
