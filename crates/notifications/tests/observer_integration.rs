//! Integration tests wiring notification observers into the domain services.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use domain::{
    CreateEvent, DomainError, EventCreator, EventCreatorConfig, EventUpdater, EventUpdaterConfig,
    InMemoryRepository, InvitationEventType, InvitationService, InvitationServiceConfig,
    UpdateEvent, UserId,
};
use notifications::{
    EventUpdateMessage, EventUpdateObserver, InMemoryMailer, InMemoryPublisher,
    InvitationNotificationObserver,
};

async fn create_event(repo: &InMemoryRepository) -> String {
    let creator =
        EventCreator::new(EventCreatorConfig::new().with_adder(Arc::new(repo.clone()))).unwrap();

    let event = creator
        .create_event(CreateEvent {
            user: UserId::new().to_string(),
            name: "Street food festival".to_string(),
            description: String::new(),
            capacity: 100,
            duration: TimeDelta::hours(10),
            location: None,
            date_start: Some(Utc::now() + TimeDelta::days(4)),
            date_registration_end: None,
            public: true,
        })
        .await
        .unwrap();

    event.external_id().to_string()
}

mod event_updates {
    use super::*;

    #[tokio::test]
    async fn update_publishes_message() {
        let repo = InMemoryRepository::new();
        let event_id = create_event(&repo).await;
        let publisher = InMemoryPublisher::new("event-update");
        let updater = EventUpdater::new(
            EventUpdaterConfig::new()
                .with_finder(Arc::new(repo.clone()))
                .with_updater(Arc::new(repo.clone()))
                .with_observer(Arc::new(EventUpdateObserver::new(Arc::new(
                    publisher.clone(),
                )))),
        )
        .unwrap();

        updater
            .update_event(UpdateEvent {
                id: event_id.clone(),
                capacity: Some(150),
                ..Default::default()
            })
            .await
            .unwrap();

        let messages = publisher.messages().await;
        assert_eq!(messages.len(), 1);
        let message: EventUpdateMessage = serde_json::from_slice(&messages[0].payload).unwrap();
        assert_eq!(message.event.external_id().to_string(), event_id);
        assert_eq!(message.event.capacity(), 150);
    }

    #[tokio::test]
    async fn failed_publish_does_not_roll_back_update() {
        let repo = InMemoryRepository::new();
        let event_id = create_event(&repo).await;
        let publisher = InMemoryPublisher::new("event-update");
        publisher.set_fail_on_publish(true).await;
        let updater = EventUpdater::new(
            EventUpdaterConfig::new()
                .with_finder(Arc::new(repo.clone()))
                .with_updater(Arc::new(repo.clone()))
                .with_observer(Arc::new(EventUpdateObserver::new(Arc::new(publisher)))),
        )
        .unwrap();

        let result = updater
            .update_event(UpdateEvent {
                id: event_id.clone(),
                capacity: Some(5),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(DomainError::Observer(_))));
        let stored = domain::Finder::find_by_external_id(&repo, event_id.parse().unwrap())
            .await
            .unwrap();
        assert_eq!(stored.capacity(), 5);
    }
}

mod invitation_mail {
    use super::*;

    fn create_service(repo: &InMemoryRepository, mailer: &InMemoryMailer) -> InvitationService {
        InvitationService::new(
            InvitationServiceConfig::new()
                .with_event_finder(Arc::new(repo.clone()))
                .with_inviter(Arc::new(repo.clone()))
                .with_invite_finder(Arc::new(repo.clone()))
                .with_observer(
                    InvitationEventType::UserInvited,
                    Arc::new(InvitationNotificationObserver::new(
                        Arc::new(mailer.clone()),
                        "no-reply@events.local",
                    )),
                ),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn invite_sends_one_email() {
        let repo = InMemoryRepository::new();
        let mailer = InMemoryMailer::new();
        let service = create_service(&repo, &mailer);
        let event_id = create_event(&repo).await;
        let guest = UserId::new();

        service.invite(&event_id, &guest.to_string()).await.unwrap();
        service.accept(&event_id, &guest.to_string()).await.unwrap();

        let outbox = mailer.outbox().await;
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].recipient, guest);
        assert_eq!(outbox[0].from, "no-reply@events.local");
    }

    #[tokio::test]
    async fn join_sends_no_email() {
        let repo = InMemoryRepository::new();
        let mailer = InMemoryMailer::new();
        let service = create_service(&repo, &mailer);
        let event_id = create_event(&repo).await;

        service
            .join(&event_id, &UserId::new().to_string())
            .await
            .unwrap();

        assert_eq!(mailer.sent_count().await, 0);
    }
}
