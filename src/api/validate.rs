//! Standalone key validation endpoint
//!
//! `POST /validate` with body `{"apiKey": "..."}`. The response shape
//! is fixed: a missing key is a 400, a shape or lookup miss is a 200
//! with `isValid: false`, and only an unexpected persistence error is
//! a 500.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::state::AppState;

/// Request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub is_valid: bool,
    pub message: String,
}

impl ValidateResponse {
    fn valid() -> Self {
        Self {
            is_valid: true,
            message: "Valid API key, /protected can be accessed".to_string(),
        }
    }

    fn invalid() -> Self {
        Self {
            is_valid: false,
            message: "Invalid API key".to_string(),
        }
    }

    fn missing() -> Self {
        Self {
            is_valid: false,
            message: "No API key provided".to_string(),
        }
    }

    fn server_error() -> Self {
        Self {
            is_valid: false,
            message: "Server error validating API key".to_string(),
        }
    }
}

/// POST /validate
pub async fn validate(
    State(state): State<AppState>,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> (StatusCode, Json<ValidateResponse>) {
    let api_key = match body {
        Ok(Json(ValidateRequest {
            api_key: Some(api_key),
        })) if !api_key.is_empty() => api_key,
        _ => {
            return (StatusCode::BAD_REQUEST, Json(ValidateResponse::missing()));
        }
    };

    match state.gate.check(&api_key).await {
        Ok(true) => (StatusCode::OK, Json(ValidateResponse::valid())),
        Ok(false) => (StatusCode::OK, Json(ValidateResponse::invalid())),
        Err(e) => {
            warn!(error = %e, "Validation errored");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ValidateResponse::server_error()),
            )
        }
    }
}
