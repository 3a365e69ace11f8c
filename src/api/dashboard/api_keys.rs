//! Dashboard API key endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::api_key::{ApiKey, ApiKeyId};

/// Request to create a new API key
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    pub name: String,
    #[serde(default)]
    pub monthly_limit: Option<u32>,
}

/// Request to rename an API key
#[derive(Debug, Clone, Deserialize)]
pub struct RenameApiKeyRequest {
    pub name: String,
}

/// One dashboard table row
///
/// The `key` field is rendered through the reveal state: masked unless
/// the row is toggled visible.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRow {
    pub id: String,
    pub name: String,
    pub usage: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<u32>,
    pub key: String,
    pub revealed: bool,
    pub copied: bool,
    pub created_at: String,
}

/// Full record returned once, at creation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedApiKeyResponse {
    pub id: String,
    pub name: String,
    pub usage: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<u32>,
    pub key: String,
    pub created_at: String,
}

impl From<&ApiKey> for CreatedApiKeyResponse {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: key.id().as_str().to_string(),
            name: key.name().to_string(),
            usage: key.usage(),
            monthly_limit: key.monthly_limit(),
            key: key.secret().to_string(),
            created_at: key.created_at().to_rfc3339(),
        }
    }
}

/// List API keys response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApiKeysResponse {
    pub api_keys: Vec<ApiKeyRow>,
    pub total: usize,
    pub loading: bool,
}

/// Reveal toggle response
#[derive(Debug, Clone, Serialize)]
pub struct RevealResponse {
    pub id: String,
    pub revealed: bool,
    pub key: String,
}

/// GET /dashboard/api-keys
pub async fn list_api_keys(State(state): State<AppState>) -> Json<ListApiKeysResponse> {
    debug!("Listing API keys");

    let keys = state.key_store.keys().await;
    let copied_id = state.clipboard.copied_id().await;

    let mut rows = Vec::with_capacity(keys.len());
    for key in &keys {
        let id = key.id().as_str();
        rows.push(ApiKeyRow {
            id: id.to_string(),
            name: key.name().to_string(),
            usage: key.usage(),
            monthly_limit: key.monthly_limit(),
            key: state.visibility.display(key).await,
            revealed: state.visibility.is_revealed(id).await,
            copied: copied_id.as_deref() == Some(id),
            created_at: key.created_at().to_rfc3339(),
        });
    }

    let total = rows.len();
    Json(ListApiKeysResponse {
        api_keys: rows,
        total,
        loading: state.key_store.is_loading(),
    })
}

/// POST /dashboard/api-keys
pub async fn create_api_key(
    State(state): State<AppState>,
    Json(request): Json<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<CreatedApiKeyResponse>), ApiError> {
    debug!(name = %request.name, "Creating API key");

    let created = state
        .key_store
        .create(&request.name, request.monthly_limit)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json((&created).into())))
}

/// PUT /dashboard/api-keys/{key_id}
pub async fn rename_api_key(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
    Json(request): Json<RenameApiKeyRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(key_id = %key_id, "Renaming API key");

    let id = ApiKeyId::new(key_id);
    state
        .key_store
        .rename(&id, &request.name)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(serde_json::json!({
        "id": id.as_str(),
        "name": request.name,
    })))
}

/// DELETE /dashboard/api-keys/{key_id}
pub async fn delete_api_key(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(key_id = %key_id, "Deleting API key");

    let id = ApiKeyId::new(key_id);
    state.key_store.delete(&id).await.map_err(ApiError::from)?;
    state.visibility.forget(id.as_str()).await;

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": id.as_str(),
    })))
}

/// POST /dashboard/api-keys/{key_id}/reveal
pub async fn toggle_reveal(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
) -> Result<Json<RevealResponse>, ApiError> {
    let id = ApiKeyId::new(key_id);

    let key = state
        .key_store
        .find(&id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("API key '{}' not found", id)))?;

    let revealed = state.visibility.toggle(id.as_str()).await;

    Ok(Json(RevealResponse {
        id: id.as_str().to_string(),
        revealed,
        key: state.visibility.display(&key).await,
    }))
}

/// POST /dashboard/api-keys/{key_id}/copy
pub async fn copy_api_key(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ApiKeyId::new(key_id);

    let key = state
        .key_store
        .find(&id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("API key '{}' not found", id)))?;

    state.clipboard.copy(&key).await.map_err(ApiError::from)?;

    Ok(Json(serde_json::json!({
        "copied": true,
        "id": id.as_str(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::NewApiKey;

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{"name": "Production", "monthlyLimit": 1000}"#;

        let request: CreateApiKeyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Production");
        assert_eq!(request.monthly_limit, Some(1000));
    }

    #[test]
    fn test_create_request_minimal() {
        let json = r#"{"name": "Minimal"}"#;

        let request: CreateApiKeyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Minimal");
        assert!(request.monthly_limit.is_none());
    }

    #[test]
    fn test_rename_request_deserialization() {
        let json = r#"{"name": "Renamed"}"#;

        let request: RenameApiKeyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Renamed");
    }

    #[test]
    fn test_created_response_includes_full_secret() {
        let key = ApiKey::from_new(
            ApiKeyId::new("key-1"),
            NewApiKey::new("Test Key", "dandi-abc123"),
        );

        let response = CreatedApiKeyResponse::from(&key);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"key\":\"dandi-abc123\""));
        assert!(json.contains("\"id\":\"key-1\""));
        assert!(json.contains("\"usage\":0"));
    }

    #[test]
    fn test_row_serialization() {
        let row = ApiKeyRow {
            id: "key-1".to_string(),
            name: "Test Key".to_string(),
            usage: 0,
            monthly_limit: None,
            key: "dandi-******".to_string(),
            revealed: false,
            copied: false,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"key\":\"dandi-******\""));
        assert!(json.contains("\"revealed\":false"));
        assert!(!json.contains("monthlyLimit"));
    }

    #[test]
    fn test_list_response_serialization() {
        let response = ListApiKeysResponse {
            api_keys: vec![],
            total: 0,
            loading: false,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"apiKeys\":[]"));
        assert!(json.contains("\"total\":0"));
    }
}
