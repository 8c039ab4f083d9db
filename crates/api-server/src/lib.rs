//! YieldScope API server
//!
//! Serves the dashboard views (home, browse, detail, saved, premium) as JSON
//! view models over the data provider.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use yield_core::{YieldDataProvider, YieldError};
use yield_data::InMemoryProvider;

pub mod config;
mod dashboard_routes;
mod openapi;
mod opportunity_routes;
mod request_id;
mod security_headers;
mod user_routes;
mod view;


pub use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn YieldDataProvider>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(provider: Arc<dyn YieldDataProvider>, config: ServerConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }

    /// Caller identity: explicit `user_id` or the configured default.
    pub fn user_id<'a>(&'a self, query: &'a UserQuery) -> &'a str {
        query
            .user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.config.default_user_id)
    }
}

/// `?user_id=` selector shared by every user-scoped route
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] YieldError),
    /// Premium content requested by a viewer the gate locks out
    #[error("{0}")]
    Locked(String),
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Domain(YieldError::NotFound(..)) => {
                tracing::warn!("{}", self);
                StatusCode::NOT_FOUND
            }
            AppError::Locked(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .merge(opportunity_routes::opportunity_routes())
        .merge(dashboard_routes::dashboard_routes())
        .merge(user_routes::user_routes())
        .merge(openapi::openapi_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(request_id::UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(request_id::request_span::<axum::body::Body>))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(axum::middleware::from_fn(security_headers::security_headers))
                .layer(cors),
        )
}

async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("ok"))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    if config.allows_any_origin() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    base.allow_origin(origins)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;
    tracing::info!("Starting YieldScope API server");
    tracing::info!("  Latency scale: {}", config.latency_scale);
    tracing::info!("  Default user: {}", config.default_user_id);
    tracing::info!("  CORS origins: {}", config.cors_origins.join(", "));

    let provider: Arc<dyn YieldDataProvider> = Arc::new(InMemoryProvider::new(config.latency()));
    let app = build_router(AppState::new(provider, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
