//! Integration tests for the wired process.

use std::sync::OnceLock;

use app::{Config, Container};
use domain::{DomainError, InvitationError, UpdateEvent, UserId};
use metrics_exporter_prometheus::PrometheusHandle;
use notifications::EventUpdateMessage;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> Container {
    get_metrics_handle();
    Container::build(&Config::default()).unwrap()
}

#[tokio::test]
async fn demo_workflow_runs_end_to_end() {
    let container = setup();

    app::demo::run(&container).await.unwrap();

    assert_eq!(container.repository.event_count().await, 1);
    // invited guest + walk-in
    assert_eq!(container.repository.invitation_count().await, 2);
    assert_eq!(container.mailer.sent_count().await, 1);
    assert_eq!(container.publisher.message_count().await, 1);
}

#[tokio::test]
async fn update_message_uses_configured_routing_key() {
    get_metrics_handle();
    let config = Config {
        event_update_routing_key: "events.updated".to_string(),
        ..Config::default()
    };
    let container = Container::build(&config).unwrap();
    app::demo::run(&container).await.unwrap();

    let messages = container.publisher.messages().await;
    assert_eq!(messages[0].routing_key, "events.updated");
    let message: EventUpdateMessage = serde_json::from_slice(&messages[0].payload).unwrap();
    assert_eq!(message.event.description(), "Talks, pizza and a raffle");
    assert_eq!(message.event.participants_number(), 2);
}

#[tokio::test]
async fn disabled_notifications_send_no_mail() {
    get_metrics_handle();
    let config = Config {
        notifications_enabled: false,
        ..Config::default()
    };
    let container = Container::build(&config).unwrap();

    app::demo::run(&container).await.unwrap();

    assert_eq!(container.mailer.sent_count().await, 0);
}

#[tokio::test]
async fn private_event_cannot_be_joined() {
    let container = setup();
    app::demo::run(&container).await.unwrap();
    let event = container
        .event_finder
        .list(Default::default())
        .await
        .unwrap()
        .remove(0);
    let event_id = event.external_id().to_string();

    container
        .event_updater
        .update_event(UpdateEvent {
            id: event_id.clone(),
            public: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    let result = container
        .invitations
        .join(&event_id, &UserId::new().to_string())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Invitation(InvitationError::EventNotPublic))
    ));
}

#[tokio::test]
async fn metrics_are_recorded() {
    let handle = get_metrics_handle();
    let container = Container::build(&Config::default()).unwrap();

    app::demo::run(&container).await.unwrap();

    let rendered = handle.render();
    assert!(rendered.contains("events_created_total"));
    assert!(rendered.contains("invitations_sent_total"));
    assert!(rendered.contains("invitations_accepted_total"));
    assert!(rendered.contains("invitations_joined_total"));
    assert!(rendered.contains("events_updated_total"));
}
