//! Dashboard notification slot endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::AppState;
use crate::domain::Severity;

/// Wire form of the notification slot
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// GET /dashboard/notification
pub async fn current_notification(State(state): State<AppState>) -> Json<NotificationResponse> {
    let current = state.notifier.current().await;

    Json(match current {
        Some(notification) => NotificationResponse {
            visible: true,
            message: Some(notification.message),
            severity: Some(notification.severity),
        },
        None => NotificationResponse {
            visible: false,
            message: None,
            severity: None,
        },
    })
}

/// DELETE /dashboard/notification
pub async fn dismiss_notification(State(state): State<AppState>) -> Json<NotificationResponse> {
    state.notifier.dismiss().await;

    Json(NotificationResponse {
        visible: false,
        message: None,
        severity: None,
    })
}
