pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::AnyPool;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::Config;
use crate::error::Result;
use crate::middleware::{
    auth::{require_basic_auth, BasicCredentials, INBOUND_USERNAME},
    secure::{secure_middleware, SecureOptions},
};
use crate::services::{message_service::MessageService, status_service::StatusService};
use crate::views::Views;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub message_service: MessageService,
    pub status_service: StatusService,
    pub views: Views,
}

impl AppState {
    pub fn new(pool: AnyPool, config: Config) -> Result<Self> {
        let message_service = MessageService::new(pool);
        let status_service = StatusService::new(
            message_service.clone(),
            config.freshness,
            config.display_timezone,
        );
        let views = Views::new()?;

        Ok(Self {
            config: Arc::new(config),
            message_service,
            status_service,
            views,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let credentials = BasicCredentials::new(INBOUND_USERNAME, state.config.inbound_password.clone());
    let secure = SecureOptions::from_config(&state.config);
    let static_dir = ServeDir::new(&state.config.static_dir);

    // Only the POST endpoint is guarded; other methods still get 405.
    let inbound_sms = post(routes::inbound_sms::receive).route_layer(
        axum::middleware::from_fn_with_state(credentials, require_basic_auth),
    );

    Router::new()
        .route("/", get(routes::home::index))
        .route("/health", get(routes::health::health))
        .route("/inbound_sms", inbound_sms)
        .nest_service("/static", static_dir)
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(secure, secure_middleware))
        .layer(TraceLayer::new_for_http())
}
