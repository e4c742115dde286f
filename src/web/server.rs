//! Axum web server for the estate API

use axum::{
    extract::FromRef,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::core::config::{Config, ServerConfig};
use crate::core::error::{Error, Result};
use crate::model::{
    AboutContent, ContactMessage, ContactPageContent, GuideContent, HomePageContent, Inquiry,
    Settings,
};
use crate::store::JsonStore;
use crate::web::admin::{api_login, api_logout, api_session, AdminGate};
use crate::web::content::{
    api_create_content, api_delete_content, api_get_content, api_list_content,
    api_update_content,
};
use crate::web::pages::{api_get_document, api_put_document};
use crate::web::properties::{
    api_create_property, api_delete_property, api_get_property, api_list_properties,
    api_update_property,
};
use crate::web::submissions::{
    api_delete_submissions, api_list_submissions, api_submit, api_update_status,
};

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub admin: Arc<AdminGate>,
}

impl AppState {
    pub fn new(store: JsonStore, admin: AdminGate) -> Self {
        Self {
            store: Arc::new(store),
            admin: Arc::new(admin),
        }
    }

    /// Build state from configuration, opening the data directory
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = JsonStore::open(&config.storage.data_dir)?;
        let admin = AdminGate::new(
            config.admin.password.clone(),
            Duration::from_secs(config.admin.session_ttl),
        );
        Ok(Self::new(store, admin))
    }
}

impl FromRef<AppState> for Arc<JsonStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<AdminGate> {
    fn from_ref(state: &AppState) -> Self {
        state.admin.clone()
    }
}

// =============================================================================
// HEALTH
// =============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health
pub async fn api_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the full `/api` router
pub fn router(state: AppState) -> Router {
    let property_routes = Router::new()
        .route("/", get(api_list_properties).post(api_create_property))
        .route(
            "/:id",
            get(api_get_property)
                .put(api_update_property)
                .delete(api_delete_property),
        );

    let content_routes = Router::new()
        .route("/", get(api_list_content).post(api_create_content))
        .route(
            "/:slug",
            get(api_get_content)
                .put(api_update_content)
                .delete(api_delete_content),
        );

    let inquiry_routes = Router::new().route(
        "/",
        get(api_list_submissions::<Inquiry>)
            .post(api_submit::<Inquiry>)
            .patch(api_update_status::<Inquiry>)
            .delete(api_delete_submissions::<Inquiry>),
    );

    let contact_routes = Router::new().route(
        "/",
        get(api_list_submissions::<ContactMessage>)
            .post(api_submit::<ContactMessage>)
            .patch(api_update_status::<ContactMessage>)
            .delete(api_delete_submissions::<ContactMessage>),
    );

    let admin_routes = Router::new()
        .route("/login", post(api_login))
        .route("/logout", post(api_logout))
        .route("/session", get(api_session));

    let api = Router::new()
        .route("/health", get(api_health))
        .route(
            "/home",
            get(api_get_document::<HomePageContent>).put(api_put_document::<HomePageContent>),
        )
        .route(
            "/about",
            get(api_get_document::<AboutContent>).put(api_put_document::<AboutContent>),
        )
        .route(
            "/contact-page",
            get(api_get_document::<ContactPageContent>)
                .put(api_put_document::<ContactPageContent>),
        )
        .route(
            "/guide",
            get(api_get_document::<GuideContent>).put(api_put_document::<GuideContent>),
        )
        .route(
            "/settings",
            get(api_get_document::<Settings>).put(api_put_document::<Settings>),
        )
        .nest("/properties", property_routes)
        .nest("/content", content_routes)
        .nest("/inquiries", inquiry_routes)
        .nest("/contact", contact_routes)
        .nest("/admin", admin_routes);

    Router::new().nest("/api", api).with_state(state)
}

// =============================================================================
// SERVER
// =============================================================================

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

/// Bind the listen socket; `host` may be a name such as `localhost`
pub async fn bind(server: &ServerConfig) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((server.host.as_str(), server.port))
        .await
        .map_err(|e| Error::ConfigError {
            message: format!("cannot listen on {}:{}: {}", server.host, server.port, e),
        })
}

pub async fn run(config: Config, open_browser: bool) -> Result<()> {
    let state = AppState::from_config(&config)?;

    if !state.admin.enabled() {
        warn!("no admin password configured; admin endpoints are locked");
    }

    let listener = bind(&config.server).await?;
    let addr = listener.local_addr()?;
    let app = router(state);

    info!(data_dir = %config.storage.data_dir.display(), "serving data");
    eprintln!();
    eprintln!(
        "\x1b[36m>\x1b[0m estate API running at \x1b[36mhttp://{}/api\x1b[0m",
        addr
    );
    eprintln!("\x1b[90m  Press Ctrl+C to stop\x1b[0m");

    if open_browser {
        let url = format!("http://{}/api/health", addr);
        let _ = open::that(&url);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_accepts_host_names() {
        let listener = bind(&ServerConfig {
            host: "localhost".to_string(),
            port: 0,
        })
        .await
        .unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }
}
