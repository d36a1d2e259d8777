//! HTTP surface for the contact message store.
//!
//! The submission endpoint is public; the admin endpoints (listing, status
//! updates, unread count) require an API key loaded from a YAML config
//! file and presented as a Bearer token.

use std::collections::HashMap;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::models::{ContactSubmission, MessageStatus};
use crate::store::ContactStore;

// ============================================================================
// Configuration
// ============================================================================

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Path to the API key file
    pub api_keys_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = std::env::var("POSTBOX_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let api_keys_path = std::env::var("POSTBOX_API_KEYS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("postbox")
                    .join("api_keys.yaml")
            });

        Self {
            port,
            api_keys_path,
        }
    }
}

/// API key entry in the key file
#[derive(Debug, Clone, Deserialize)]
struct ApiKeyEntry {
    key: String,
    label: String,
}

/// Key file structure
#[derive(Debug, Clone, Deserialize, Default)]
struct KeyFile {
    #[serde(default)]
    api_keys: Vec<ApiKeyEntry>,
}

/// API key store - maps key -> label
#[derive(Debug, Clone)]
pub struct ApiKeyStore {
    keys: HashMap<String, String>,
}

impl ApiKeyStore {
    /// Load API keys from the key file
    pub fn load(path: &FsPath) -> Self {
        let keys = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str::<KeyFile>(&contents) {
                Ok(file) => {
                    let map: HashMap<String, String> = file
                        .api_keys
                        .into_iter()
                        .map(|entry| (entry.key, entry.label))
                        .collect();
                    tracing::info!("Loaded {} API key(s)", map.len());
                    map
                }
                Err(e) => {
                    tracing::warn!("Failed to parse key file: {}", e);
                    HashMap::new()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read key file {}: {}", path.display(), e);
                tracing::warn!("No API keys loaded - all admin requests will fail");
                HashMap::new()
            }
        };

        Self { keys }
    }

    /// Validate an API key and return its label
    fn validate(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    store: ContactStore,
    api_keys: Arc<ApiKeyStore>,
}

impl AppState {
    pub fn new(store: ContactStore, api_keys: ApiKeyStore) -> Self {
        Self {
            store,
            api_keys: Arc::new(api_keys),
        }
    }
}

/// Auth error response
#[derive(Serialize)]
struct AuthError {
    error: &'static str,
    message: &'static str,
}

fn unauthorized(error: &'static str, message: &'static str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(AuthError { error, message })).into_response()
}

/// Authentication middleware for the admin routes
async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let api_key = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        Some(_) => {
            return unauthorized(
                "invalid_auth",
                "Authorization header must use Bearer scheme",
            );
        }
        None => {
            return unauthorized("missing_auth", "Authorization header required");
        }
    };

    // Validate API key
    match state.api_keys.validate(api_key) {
        Some(label) => {
            tracing::debug!("Admin request authorized for {}", label);
            next.run(request).await
        }
        None => unauthorized("invalid_key", "Invalid API key"),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint (no auth required)
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Serialize)]
struct UnreadResponse {
    count: usize,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct StatusUpdate {
    status: String,
}

fn store_error(e: crate::store::StoreError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: e.to_string(),
        }),
    )
        .into_response()
}

/// Accept a contact form submission (no auth required)
async fn submit_message(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> Response {
    match state.store.create(&submission).await {
        Ok(id) => (StatusCode::CREATED, Json(SubmitResponse { id })).into_response(),
        Err(e) => store_error(e),
    }
}

/// List all messages, newest first (auth required)
async fn list_messages(State(state): State<AppState>) -> Response {
    match state.store.list_all().await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => store_error(e),
    }
}

/// Set the status of a message (auth required)
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Response {
    let status = match body.status.parse::<MessageStatus>() {
        Ok(status) => status,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody { error: e })).into_response();
        }
    };

    match state.store.update_status(&id, status).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error(e),
    }
}

/// Report the unread message count (auth required)
async fn unread_count(State(state): State<AppState>) -> Json<UnreadResponse> {
    Json(UnreadResponse {
        count: state.store.unread_count().await,
    })
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router.
pub fn app(state: AppState) -> Router {
    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/contact", post(submit_message));

    // Admin routes (auth required)
    let admin_routes = Router::new()
        .route("/api/messages", get(list_messages))
        .route("/api/messages/{id}/status", put(update_status))
        .route("/api/messages/unread", get(unread_count))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
