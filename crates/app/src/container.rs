//! Explicit construction of every service and collaborator.

use std::sync::Arc;

use domain::{
    DomainError, EventCreator, EventCreatorConfig, EventFinder, EventFinderConfig, EventUpdater,
    EventUpdaterConfig, InMemoryRepository, InvitationEventType, InvitationService,
    InvitationServiceConfig,
};
use notifications::{
    EventUpdateObserver, InMemoryMailer, InMemoryPublisher, InvitationNotificationObserver,
};

use crate::config::Config;

/// All services of the process, built once at startup.
///
/// Storage and delivery are in-memory; their handles are kept so callers
/// can inspect what was stored and sent.
pub struct Container {
    pub repository: InMemoryRepository,
    pub publisher: InMemoryPublisher,
    pub mailer: InMemoryMailer,
    pub event_creator: Arc<EventCreator>,
    pub event_finder: Arc<EventFinder>,
    pub event_updater: Arc<EventUpdater>,
    pub invitations: Arc<InvitationService>,
}

impl Container {
    /// Wires the services according to `config`.
    ///
    /// Updates are published on the configured routing key. Invited users
    /// are e-mailed when notifications are enabled. Creation has no
    /// observers.
    pub fn build(config: &Config) -> Result<Self, DomainError> {
        let repository = InMemoryRepository::new();
        let publisher = InMemoryPublisher::new(config.event_update_routing_key.clone());
        let mailer = InMemoryMailer::new();

        let event_creator =
            EventCreator::new(EventCreatorConfig::new().with_adder(Arc::new(repository.clone())))?;

        let event_finder =
            EventFinder::new(EventFinderConfig::new().with_finder(Arc::new(repository.clone())))?;

        let event_updater = EventUpdater::new(
            EventUpdaterConfig::new()
                .with_finder(Arc::new(repository.clone()))
                .with_updater(Arc::new(repository.clone()))
                .with_observer(Arc::new(EventUpdateObserver::new(Arc::new(
                    publisher.clone(),
                )))),
        )?;

        let mut invitation_config = InvitationServiceConfig::new()
            .with_event_finder(Arc::new(repository.clone()))
            .with_inviter(Arc::new(repository.clone()))
            .with_invite_finder(Arc::new(repository.clone()));
        if config.notifications_enabled {
            invitation_config = invitation_config.with_observer(
                InvitationEventType::UserInvited,
                Arc::new(InvitationNotificationObserver::new(
                    Arc::new(mailer.clone()),
                    config.notification_sender.clone(),
                )),
            );
        }
        let invitations = InvitationService::new(invitation_config)?;

        tracing::info!(
            routing_key = %config.event_update_routing_key,
            notifications_enabled = config.notifications_enabled,
            "services wired"
        );

        Ok(Self {
            repository,
            publisher,
            mailer,
            event_creator: Arc::new(event_creator),
            event_finder: Arc::new(event_finder),
            event_updater: Arc::new(event_updater),
            invitations: Arc::new(invitations),
        })
    }
}
