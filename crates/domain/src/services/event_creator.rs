use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::DomainError;
use crate::event::{Event, NewEvent};
use crate::observer::{Observer, Observers};
use crate::repository::Adder;
use crate::value_objects::Location;

use super::parse_user_id;

const SERVICE_NAME: &str = "event creator";

/// Request to create an event.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEvent {
    /// Owner ID in textual form.
    pub user: String,
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub duration: TimeDelta,
    pub location: Option<Location>,
    pub date_start: Option<DateTime<Utc>>,
    /// Optional early registration deadline.
    pub date_registration_end: Option<DateTime<Utc>>,
    pub public: bool,
}

impl CreateEvent {
    fn into_new_event(self) -> Result<NewEvent, DomainError> {
        Ok(NewEvent {
            owner: parse_user_id(&self.user)?,
            name: self.name,
            description: self.description,
            capacity: self.capacity,
            public: self.public,
            location: self.location,
            start: self.date_start,
            duration: self.duration,
            registration_end: self.date_registration_end,
        })
    }
}

/// Collaborators of [`EventCreator`].
#[derive(Default)]
pub struct EventCreatorConfig {
    pub adder: Option<Arc<dyn Adder>>,
    pub observers: Observers<Event>,
}

impl EventCreatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_adder(mut self, adder: Arc<dyn Adder>) -> Self {
        self.adder = Some(adder);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn Observer<Event>>) -> Self {
        self.observers.register(observer);
        self
    }
}

/// Creates and stores new events.
pub struct EventCreator {
    adder: Arc<dyn Adder>,
    observers: Observers<Event>,
}

impl EventCreator {
    /// Creates a new event creator.
    pub fn new(config: EventCreatorConfig) -> Result<Self, DomainError> {
        let adder = config.adder.ok_or(DomainError::ResourceRequired {
            service: SERVICE_NAME,
            resource: "event adder",
        })?;

        Ok(Self {
            adder,
            observers: config.observers,
        })
    }

    /// Validates the request, stores the event and notifies observers.
    ///
    /// An observer failure is returned after the event was stored; the event
    /// is not rolled back.
    #[tracing::instrument(skip(self))]
    pub async fn create_event(&self, request: CreateEvent) -> Result<Event, DomainError> {
        let mut event = Event::new(request.into_new_event()?, Utc::now())?;

        self.adder
            .add(&mut event)
            .await
            .map_err(DomainError::repository("cannot store new event"))?;

        metrics::counter!("events_created_total").increment(1);
        tracing::info!(event_id = %event.external_id(), "event created");

        self.observers.notify_all(&event).await?;

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventError;
    use crate::observer::ObserverError;
    use crate::period::PeriodError;
    use crate::repository::{Finder, InMemoryRepository};
    use async_trait::async_trait;
    use common::UserId;

    struct Failing;

    #[async_trait]
    impl Observer<Event> for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn notify(&self, _event: &Event) -> Result<(), ObserverError> {
            Err(ObserverError::new("failing", "unreachable broker"))
        }
    }

    fn request() -> CreateEvent {
        CreateEvent {
            user: UserId::new().to_string(),
            name: "Rust workshop".to_string(),
            description: "Ownership and borrowing".to_string(),
            capacity: 20,
            duration: TimeDelta::hours(4),
            location: Some(Location::new(52.2297, 21.0122)),
            date_start: Some(Utc::now() + TimeDelta::days(14)),
            date_registration_end: None,
            public: true,
        }
    }

    fn create_service(repo: &InMemoryRepository) -> EventCreator {
        EventCreator::new(EventCreatorConfig::new().with_adder(Arc::new(repo.clone()))).unwrap()
    }

    #[test]
    fn test_new_requires_adder() {
        let result = EventCreator::new(EventCreatorConfig::new());
        assert!(matches!(
            result,
            Err(DomainError::ResourceRequired { resource: "event adder", .. })
        ));
    }

    #[tokio::test]
    async fn test_create_event() {
        let repo = InMemoryRepository::new();
        let service = create_service(&repo);

        let event = service.create_event(request()).await.unwrap();

        assert!(event.id().is_some());
        assert_eq!(event.name(), "Rust workshop");
        let stored = repo.find_by_external_id(event.external_id()).await.unwrap();
        assert_eq!(stored, event);
    }

    #[tokio::test]
    async fn test_create_event_rejects_bad_user() {
        let repo = InMemoryRepository::new();
        let service = create_service(&repo);
        let mut req = request();
        req.user = "not-a-uuid".to_string();

        let result = service.create_event(req).await;
        assert!(matches!(result, Err(DomainError::InvalidUserId(_))));
        assert_eq!(repo.event_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_event_validates_aggregate() {
        let repo = InMemoryRepository::new();
        let service = create_service(&repo);

        let mut unnamed = request();
        unnamed.name = String::new();
        assert!(matches!(
            service.create_event(unnamed).await,
            Err(DomainError::Event(EventError::NameRequired))
        ));

        let mut no_duration = request();
        no_duration.duration = TimeDelta::zero();
        assert!(matches!(
            service.create_event(no_duration).await,
            Err(DomainError::Event(EventError::Period(
                PeriodError::DurationRequired
            )))
        ));

        let mut nil_owner = request();
        nil_owner.user = UserId::nil().to_string();
        assert!(matches!(
            service.create_event(nil_owner).await,
            Err(DomainError::Event(EventError::UserIdRequired))
        ));

        assert_eq!(repo.event_count().await, 0);
    }

    #[tokio::test]
    async fn test_observer_failure_keeps_stored_event() {
        let repo = InMemoryRepository::new();
        let service = EventCreator::new(
            EventCreatorConfig::new()
                .with_adder(Arc::new(repo.clone()))
                .with_observer(Arc::new(Failing)),
        )
        .unwrap();

        let result = service.create_event(request()).await;

        assert!(matches!(result, Err(DomainError::Observer(_))));
        assert_eq!(repo.event_count().await, 1);
    }
}
