//! Sample workflow run on startup when `RUN_DEMO` is set.

use chrono::{TimeDelta, Utc};
use common::UserId;
use domain::{CreateEvent, DomainError, ListEvents, Location, UpdateEvent};

use crate::container::Container;

/// Creates an event, invites and accepts one guest, lets another join and
/// publishes an update.
#[tracing::instrument(skip(container))]
pub async fn run(container: &Container) -> Result<(), DomainError> {
    let owner = UserId::new();
    let guest = UserId::new().to_string();
    let walk_in = UserId::new().to_string();

    let event = container
        .event_creator
        .create_event(CreateEvent {
            user: owner.to_string(),
            name: "Community meetup".to_string(),
            description: "Talks and pizza".to_string(),
            capacity: 10,
            duration: TimeDelta::hours(3),
            location: Some(Location::new(52.2297, 21.0122)),
            date_start: Some(Utc::now() + TimeDelta::days(7)),
            date_registration_end: None,
            public: true,
        })
        .await?;
    let event_id = event.external_id().to_string();

    container.invitations.invite(&event_id, &guest).await?;
    container.invitations.accept(&event_id, &guest).await?;
    container.invitations.join(&event_id, &walk_in).await?;

    container
        .event_updater
        .update_event(UpdateEvent {
            id: event_id.clone(),
            description: Some("Talks, pizza and a raffle".to_string()),
            ..Default::default()
        })
        .await?;

    let listed = container
        .event_finder
        .list(ListEvents {
            user: Some(owner.to_string()),
            ..Default::default()
        })
        .await?;

    let messages = container.publisher.message_count().await;
    let emails = container.mailer.sent_count().await;
    tracing::info!(
        %event_id,
        events = listed.len(),
        messages,
        emails,
        "demo finished"
    );
    Ok(())
}
