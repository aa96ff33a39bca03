//! Tests for the HTTP notification gateway

use shared::NotificationChannel;

use crate::services::notifications::HttpNotificationGateway;
use crate::traits::{NotificationGateway, NotificationMessage};

#[tokio::test]
async fn log_only_gateway_accepts_both_channels() {
    let gateway = HttpNotificationGateway::log_only();
    let message = NotificationMessage {
        subject: "Arrival Card Submission Completed".to_string(),
        body: "Confirmation number: ARR-12345678-001".to_string(),
    };

    gateway
        .send(NotificationChannel::Email, "mia@example.com", &message)
        .await
        .unwrap();
    gateway
        .send(NotificationChannel::Messaging, "+6591234567", &message)
        .await
        .unwrap();
}

#[tokio::test]
async fn unreachable_endpoint_surfaces_a_channel_error() {
    // Nothing listens on port 1, the connection is refused immediately
    let gateway = HttpNotificationGateway::new(Some("http://127.0.0.1:1/notify".to_string()), None);
    let message = NotificationMessage {
        subject: "Arrival Card Filing Reminder".to_string(),
        body: "Window open".to_string(),
    };

    let err = gateway
        .send(NotificationChannel::Email, "mia@example.com", &message)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("email"));
}
