//! Postbox HTTP Server
//!
//! Serves the contact form submission endpoint and the API-key-protected
//! admin endpoints over the shared message store.
//!
//! # Configuration
//!
//! Environment variables:
//! - `POSTBOX_PORT`: Port to listen on (default: 8080)
//! - `POSTBOX_DATABASE_PATH`: Path to the SQLite database (default: ~/.postbox/postbox.db)
//! - `POSTBOX_API_KEYS`: Path to the API key file (default: ~/.config/postbox/api_keys.yaml)
//!
//! # API Key File Format
//!
//! ```yaml
//! api_keys:
//!   - key: "your-secret-key-here"
//!     label: "erik laptop"
//! ```
//!
//! # Endpoints
//!
//! - `POST /api/contact`: Submit a contact message (no auth required)
//! - `GET /health`: Health check endpoint (no auth required)
//! - `GET /api/messages`: List all messages, newest first (auth required)
//! - `PUT /api/messages/{id}/status`: Set a message's status (auth required)
//! - `GET /api/messages/unread`: Unread message count (auth required)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postbox::config::Config;
use postbox::db::{init_db, ContactRepository};
use postbox::server::{app, ApiKeyStore, AppState, ServerConfig};
use postbox::store::ContactStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postbox=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let server_config = ServerConfig::from_env();
    let config = match Config::load(None) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Database: {}", config.database_path.display());
    tracing::info!("API key file: {}", server_config.api_keys_path.display());

    // Open the store
    let pool = match init_db(Some(config.database_path.clone())).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };
    let store = ContactStore::new(Arc::new(ContactRepository::new(pool)));

    // Load API keys
    let api_keys = ApiKeyStore::load(&server_config.api_keys_path);

    // Build router
    let state = AppState::new(store, api_keys);
    let router = app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
