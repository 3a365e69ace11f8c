//! Playground submission and protected view endpoints

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::gate::{ProtectedView, SUBMISSION_ROUTE};
use crate::infrastructure::session::SessionToken;

/// Header carrying the session token into the protected view
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Request to submit a candidate key
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub api_key: String,
}

/// Submission outcome on the wire
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub accepted: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_after_ms: Option<u64>,
}

/// Protected view payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedResponse {
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// Response to dismissing the notification on the protected view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DismissResponse {
    pub dismissed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// POST /playground/submit
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    debug!("Playground key submission");

    let result = state
        .gate
        .submit(&request.api_key)
        .await
        .map_err(ApiError::from)?;

    let response = match result.navigation {
        Some(navigation) => SubmitResponse {
            accepted: true,
            message: result.outcome.reason,
            session_token: Some(navigation.token.to_string()),
            redirect_to: Some(navigation.target.to_string()),
            redirect_after_ms: Some(navigation.after.as_millis() as u64),
        },
        None => SubmitResponse {
            accepted: false,
            message: result.outcome.reason,
            session_token: None,
            redirect_to: None,
            redirect_after_ms: None,
        },
    };

    Ok(Json(response))
}

/// GET /protected
pub async fn protected(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<ProtectedResponse>) {
    let token = headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(SessionToken::from_string);

    match state.gate.enter_protected(token.as_ref()).await {
        ProtectedView::Unlocked { api_key } => (
            StatusCode::OK,
            Json(ProtectedResponse {
                unlocked: true,
                api_key: Some(api_key),
                redirect_to: None,
            }),
        ),
        ProtectedView::RedirectToSubmission => (
            StatusCode::OK,
            Json(ProtectedResponse {
                unlocked: false,
                api_key: None,
                redirect_to: Some(SUBMISSION_ROUTE.to_string()),
            }),
        ),
        ProtectedView::Rejected => (
            StatusCode::OK,
            Json(ProtectedResponse {
                unlocked: false,
                api_key: None,
                redirect_to: None,
            }),
        ),
    }
}

/// DELETE /protected/notification
///
/// Dismissal doubles as the navigation trigger when the last outcome
/// was a rejection.
pub async fn dismiss_notification(State(state): State<AppState>) -> Json<DismissResponse> {
    let redirect = state.gate.acknowledge_notification().await;

    Json(DismissResponse {
        dismissed: true,
        redirect_to: redirect.map(String::from),
    })
}
