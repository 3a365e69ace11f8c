use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use super::dashboard::{api_keys, notification};
use super::health;
use super::playground;
use super::state::AppState;
use super::validate;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Dashboard: key management
        .route("/dashboard/api-keys", get(api_keys::list_api_keys))
        .route("/dashboard/api-keys", post(api_keys::create_api_key))
        .route("/dashboard/api-keys/{key_id}", put(api_keys::rename_api_key))
        .route(
            "/dashboard/api-keys/{key_id}",
            delete(api_keys::delete_api_key),
        )
        .route(
            "/dashboard/api-keys/{key_id}/reveal",
            post(api_keys::toggle_reveal),
        )
        .route(
            "/dashboard/api-keys/{key_id}/copy",
            post(api_keys::copy_api_key),
        )
        // Dashboard: notification slot
        .route(
            "/dashboard/notification",
            get(notification::current_notification),
        )
        .route(
            "/dashboard/notification",
            delete(notification::dismiss_notification),
        )
        // Playground gate
        .route("/playground/submit", post(playground::submit))
        .route("/protected", get(playground::protected))
        .route(
            "/protected/notification",
            delete(playground::dismiss_notification),
        )
        // Standalone validation contract
        .route("/validate", post(validate::validate))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{create_app_state, AppConfig};

    fn test_app() -> Router {
        create_router(create_app_state(&AppConfig::default()))
    }

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
        session_token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = session_token {
            builder = builder.header("x-session-token", token);
        }

        let request = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_app(), Method::GET, "/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_validate_accepts_plausible_key() {
        let (status, body) = send(
            test_app(),
            Method::POST,
            "/validate",
            Some(json!({"apiKey": "dandi-1234567890"})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isValid"], true);
        assert_eq!(body["message"], "Valid API key, /protected can be accessed");
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_shape() {
        let (status, body) = send(
            test_app(),
            Method::POST,
            "/validate",
            Some(json!({"apiKey": "dandi-12"})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isValid"], false);
        assert_eq!(body["message"], "Invalid API key");
    }

    #[tokio::test]
    async fn test_validate_without_key_is_bad_request() {
        let (status, body) = send(
            test_app(),
            Method::POST,
            "/validate",
            Some(json!({})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["isValid"], false);
        assert_eq!(body["message"], "No API key provided");
    }

    #[tokio::test]
    async fn test_dashboard_create_and_list() {
        let app = test_app();

        let (status, created) = send(
            app.clone(),
            Method::POST,
            "/dashboard/api-keys",
            Some(json!({"name": "Production", "monthlyLimit": 1000})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(created["key"].as_str().unwrap().starts_with("dandi-"));

        let (status, listed) = send(app, Method::GET, "/dashboard/api-keys", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["total"], 1);
        // listed rows come back masked
        let row_key = listed["apiKeys"][0]["key"].as_str().unwrap();
        assert!(row_key.starts_with("dandi-"));
        assert!(row_key.ends_with('*'));
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_not_found() {
        let (status, body) = send(
            test_app(),
            Method::DELETE,
            "/dashboard/api-keys/missing",
            None,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_playground_submit_then_protected() {
        let app = test_app();

        let (status, submitted) = send(
            app.clone(),
            Method::POST,
            "/playground/submit",
            Some(json!({"apiKey": "dandi-1234567890"})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(submitted["accepted"], true);
        assert_eq!(submitted["redirectTo"], "/protected");
        assert_eq!(submitted["redirectAfterMs"], 1500);

        let token = submitted["sessionToken"].as_str().unwrap();
        let (status, protected) =
            send(app, Method::GET, "/protected", None, Some(token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(protected["unlocked"], true);
        assert_eq!(protected["apiKey"], "dandi-1234567890");
    }

    #[tokio::test]
    async fn test_protected_without_session_redirects() {
        let (status, body) = send(test_app(), Method::GET, "/protected", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["unlocked"], false);
        assert_eq!(body["redirectTo"], "/playground");
    }

    #[tokio::test]
    async fn test_notification_visible_after_mutation_and_dismissable() {
        let app = test_app();

        send(
            app.clone(),
            Method::POST,
            "/dashboard/api-keys",
            Some(json!({"name": "Production"})),
            None,
        )
        .await;

        let (_, current) = send(
            app.clone(),
            Method::GET,
            "/dashboard/notification",
            None,
            None,
        )
        .await;
        assert_eq!(current["visible"], true);
        assert_eq!(current["message"], "API Key created successfully");
        assert_eq!(current["severity"], "success");

        let (_, dismissed) = send(
            app.clone(),
            Method::DELETE,
            "/dashboard/notification",
            None,
            None,
        )
        .await;
        assert_eq!(dismissed["visible"], false);

        let (_, after) = send(app, Method::GET, "/dashboard/notification", None, None).await;
        assert_eq!(after["visible"], false);
    }
}
