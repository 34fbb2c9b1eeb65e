use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::event::{Event, EventError};
use crate::observer::{Observer, Observers};
use crate::repository::{Finder, Updater};
use crate::value_objects::Location;

use super::parse_event_id;

const SERVICE_NAME: &str = "event updater";

/// Partial update of an event. `None` leaves a field unchanged.
///
/// Dates are applied in pairs: the event period changes only when both
/// `date_start` and `date_end` are given, the registration window only when
/// both of its bounds are given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateEvent {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    pub public: Option<bool>,
    pub location: Option<Location>,
    pub date_start: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
    pub date_registration_start: Option<DateTime<Utc>>,
    pub date_registration_end: Option<DateTime<Utc>>,
}

impl UpdateEvent {
    fn apply(&self, event: &mut Event) -> Result<(), EventError> {
        if let Some(name) = &self.name {
            event.set_name(name.as_str())?;
        }
        if let Some(description) = &self.description {
            event.set_description(description.as_str());
        }
        if let Some(capacity) = self.capacity {
            event.set_capacity(capacity);
        }
        if let Some(public) = self.public {
            event.set_public(public);
        }
        if let Some(location) = self.location {
            event.set_location(location);
        }
        if let (Some(start), Some(end)) = (self.date_start, self.date_end) {
            event.reschedule(start, end)?;
        }
        if let (Some(start), Some(end)) = (self.date_registration_start, self.date_registration_end)
        {
            event.set_registration_period(start, end)?;
        }

        Ok(())
    }
}

/// Collaborators of [`EventUpdater`].
#[derive(Default)]
pub struct EventUpdaterConfig {
    pub finder: Option<Arc<dyn Finder>>,
    pub updater: Option<Arc<dyn Updater>>,
    pub observers: Observers<Event>,
}

impl EventUpdaterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_finder(mut self, finder: Arc<dyn Finder>) -> Self {
        self.finder = Some(finder);
        self
    }

    pub fn with_updater(mut self, updater: Arc<dyn Updater>) -> Self {
        self.updater = Some(updater);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn Observer<Event>>) -> Self {
        self.observers.register(observer);
        self
    }
}

/// Applies partial updates to stored events.
pub struct EventUpdater {
    finder: Arc<dyn Finder>,
    updater: Arc<dyn Updater>,
    observers: Observers<Event>,
}

impl EventUpdater {
    /// Creates a new event updater.
    pub fn new(config: EventUpdaterConfig) -> Result<Self, DomainError> {
        let finder = config.finder.ok_or(DomainError::ResourceRequired {
            service: SERVICE_NAME,
            resource: "event finder",
        })?;
        let updater = config.updater.ok_or(DomainError::ResourceRequired {
            service: SERVICE_NAME,
            resource: "event updater",
        })?;

        Ok(Self {
            finder,
            updater,
            observers: config.observers,
        })
    }

    /// Loads the event, applies the update, stores it and notifies observers.
    #[tracing::instrument(skip(self))]
    pub async fn update_event(&self, request: UpdateEvent) -> Result<Event, DomainError> {
        let id = parse_event_id(&request.id)?;

        let mut event = self
            .finder
            .find_by_external_id(id)
            .await
            .map_err(DomainError::repository("event not found"))?;

        request.apply(&mut event)?;

        self.updater
            .update(&event)
            .await
            .map_err(DomainError::repository("cannot store updated event"))?;

        metrics::counter!("events_updated_total").increment(1);
        tracing::info!(event_id = %id, "event updated");

        self.observers.notify_all(&event).await?;

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NewEvent;
    use crate::observer::ObserverError;
    use crate::period::PeriodError;
    use crate::repository::{Adder, InMemoryRepository, RepositoryError};
    use async_trait::async_trait;
    use chrono::TimeDelta;
    use common::{EventId, UserId};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl Observer<Event> for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn notify(&self, event: &Event) -> Result<(), ObserverError> {
            self.seen.lock().await.push(event.clone());
            Ok(())
        }
    }

    async fn seed(repo: &InMemoryRepository) -> Event {
        let now = Utc::now();
        let mut event = Event::new(
            NewEvent {
                owner: UserId::new(),
                name: "Pottery class".to_string(),
                description: "Bring an apron".to_string(),
                capacity: 8,
                public: true,
                location: None,
                start: Some(now + TimeDelta::days(5)),
                duration: TimeDelta::hours(2),
                registration_end: None,
            },
            now,
        )
        .unwrap();
        repo.add(&mut event).await.unwrap();
        event
    }

    fn create_service(repo: &InMemoryRepository) -> EventUpdater {
        EventUpdater::new(
            EventUpdaterConfig::new()
                .with_finder(Arc::new(repo.clone()))
                .with_updater(Arc::new(repo.clone())),
        )
        .unwrap()
    }

    fn update(event: &Event) -> UpdateEvent {
        UpdateEvent {
            id: event.external_id().to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_requires_collaborators() {
        let repo = InMemoryRepository::new();

        assert!(matches!(
            EventUpdater::new(EventUpdaterConfig::new().with_updater(Arc::new(repo.clone()))),
            Err(DomainError::ResourceRequired { resource: "event finder", .. })
        ));
        assert!(matches!(
            EventUpdater::new(EventUpdaterConfig::new().with_finder(Arc::new(repo))),
            Err(DomainError::ResourceRequired { resource: "event updater", .. })
        ));
    }

    #[tokio::test]
    async fn test_capacity_only_update_keeps_public() {
        let repo = InMemoryRepository::new();
        let event = seed(&repo).await;
        let service = create_service(&repo);

        let updated = service
            .update_event(UpdateEvent {
                capacity: Some(50),
                ..update(&event)
            })
            .await
            .unwrap();

        assert_eq!(updated.capacity(), 50);
        assert!(updated.is_public());
        assert_eq!(updated.name(), "Pottery class");
        assert_eq!(updated.description(), "Bring an apron");
    }

    #[tokio::test]
    async fn test_public_only_update_keeps_capacity() {
        let repo = InMemoryRepository::new();
        let event = seed(&repo).await;
        let service = create_service(&repo);

        let updated = service
            .update_event(UpdateEvent {
                public: Some(false),
                ..update(&event)
            })
            .await
            .unwrap();

        assert!(!updated.is_public());
        assert_eq!(updated.capacity(), 8);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_a_real_update() {
        let repo = InMemoryRepository::new();
        let event = seed(&repo).await;
        let service = create_service(&repo);

        service
            .update_event(UpdateEvent {
                capacity: Some(0),
                ..update(&event)
            })
            .await
            .unwrap();

        let stored = repo.find_by_external_id(event.external_id()).await.unwrap();
        assert_eq!(stored.capacity(), 0);
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let repo = InMemoryRepository::new();
        let event = seed(&repo).await;
        let service = create_service(&repo);

        let result = service
            .update_event(UpdateEvent {
                name: Some(String::new()),
                ..update(&event)
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Event(EventError::NameRequired))
        ));
    }

    #[tokio::test]
    async fn test_date_pair_reschedules() {
        let repo = InMemoryRepository::new();
        let event = seed(&repo).await;
        let service = create_service(&repo);
        let start = Utc::now() + TimeDelta::days(20);

        let updated = service
            .update_event(UpdateEvent {
                date_start: Some(start),
                date_end: Some(start + TimeDelta::hours(6)),
                ..update(&event)
            })
            .await
            .unwrap();

        assert_eq!(updated.event_period().start(), start);
        assert_eq!(updated.event_period().duration(), TimeDelta::hours(6));
    }

    #[tokio::test]
    async fn test_partial_date_pair_is_ignored() {
        let repo = InMemoryRepository::new();
        let event = seed(&repo).await;
        let service = create_service(&repo);

        let updated = service
            .update_event(UpdateEvent {
                date_start: Some(Utc::now() + TimeDelta::days(30)),
                date_registration_end: Some(Utc::now() + TimeDelta::days(1)),
                ..update(&event)
            })
            .await
            .unwrap();

        assert_eq!(updated.event_period(), event.event_period());
        assert_eq!(updated.registration_period(), event.registration_period());
    }

    #[tokio::test]
    async fn test_inverted_dates_are_rejected() {
        let repo = InMemoryRepository::new();
        let event = seed(&repo).await;
        let service = create_service(&repo);
        let start = Utc::now() + TimeDelta::days(20);

        let result = service
            .update_event(UpdateEvent {
                date_registration_start: Some(start),
                date_registration_end: Some(start - TimeDelta::days(1)),
                ..update(&event)
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Event(EventError::Period(PeriodError::InvalidDates)))
        ));
        let stored = repo.find_by_external_id(event.external_id()).await.unwrap();
        assert_eq!(stored.registration_period(), event.registration_period());
    }

    #[tokio::test]
    async fn test_unknown_event() {
        let service = create_service(&InMemoryRepository::new());

        let result = service
            .update_event(UpdateEvent {
                id: EventId::new().to_string(),
                ..Default::default()
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Repository {
                context: "event not found",
                source: RepositoryError::EventNotFound(_),
            })
        ));
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let service = create_service(&InMemoryRepository::new());

        let result = service
            .update_event(UpdateEvent {
                id: "abc".to_string(),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(DomainError::InvalidEventId(_))));
    }

    #[tokio::test]
    async fn test_observers_receive_updated_event() {
        let repo = InMemoryRepository::new();
        let event = seed(&repo).await;
        let recording = Arc::new(Recording::default());
        let service = EventUpdater::new(
            EventUpdaterConfig::new()
                .with_finder(Arc::new(repo.clone()))
                .with_updater(Arc::new(repo.clone()))
                .with_observer(recording.clone()),
        )
        .unwrap();

        service
            .update_event(UpdateEvent {
                description: Some("No apron needed".to_string()),
                ..update(&event)
            })
            .await
            .unwrap();

        let seen = recording.seen.lock().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].description(), "No apron needed");
    }
}
