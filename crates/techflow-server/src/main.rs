//! TechFlow Catalog Server
//!
//! Serves the public service catalog and the session-gated admin surface.
//! Presentation lives in an external view layer; every response here is a
//! plain data record or a redirect.
//!
//! Uses SQLite (embedded) for persistence and an in-memory session store.

mod error;
mod extractors;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use services::{AuthService, CatalogService};
use storage::{Database, SessionStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub catalog: Arc<CatalogService>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting TechFlow Catalog Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_path
    );

    // Initialize SQLite database
    let db = Arc::new(
        Database::new(&config.database_path)
            .await
            .context("Failed to initialize database")?,
    );

    // Seed the default admin account and the example catalog; every insert
    // is individually idempotent, so this runs on each start.
    let admin_hash = AuthService::hash_password(&config.admin_password)
        .context("Failed to hash admin password")?;
    db.seed("admin", &admin_hash)
        .await
        .context("Failed to seed database")?;
    info!("Database seeded");

    // Initialize services
    let sessions = Arc::new(SessionStore::new(config.session_ttl));
    let auth_service = Arc::new(AuthService::new(db.clone(), sessions));
    let catalog = Arc::new(CatalogService::new(db));

    let state = AppState {
        auth_service,
        catalog,
    };

    let app = app(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Public catalog
        .route("/", get(handlers::catalog::home))
        .route("/servicios", get(handlers::catalog::list))
        .route("/detalle/:id", get(handlers::catalog::detail))
        .route("/api/servicios", get(handlers::api::services))
        // Auth
        .route("/login", post(handlers::auth::login))
        .route("/logout", get(handlers::auth::logout))
        // Admin panel (session-gated)
        .route("/admin", get(handlers::admin::list))
        .route("/admin/agregar", post(handlers::admin::create))
        .route("/admin/eliminar/:id", get(handlers::admin::delete))
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    database_path: String,
    admin_password: String,
    session_ttl: Duration,
}

fn load_config() -> Result<Config> {
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "techflow.db".to_string());

    let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        warn!("ADMIN_PASSWORD not set, using default (insecure for production)");
        "admin123".to_string()
    });

    let session_ttl = std::env::var("SESSION_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(3600));

    Ok(Config {
        bind_address,
        database_path,
        admin_password,
        session_ttl,
    })
}
