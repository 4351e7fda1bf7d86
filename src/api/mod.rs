// src/api/mod.rs
pub mod health;
pub mod payout;
pub mod quiz;

use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::constants::BASE_CHAIN_ID;
use crate::services::{EthersConnector, PayoutService};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub payout: PayoutService,
}

impl AppState {
    /// State wired to the real Base network connector.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            payout: PayoutService::new(Arc::new(EthersConnector::new(BASE_CHAIN_ID))),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_from_config(&state.config);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Quiz reward
        .route("/api/payout", post(payout::payout))
        .route("/api/quiz/config", get(quiz::get_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_from_config(config: &Config) -> CorsLayer {
    let raw = config.cors_allowed_origins.trim();
    if raw.is_empty() || raw == "*" {
        return CorsLayer::very_permissive();
    }

    let allowed: Vec<HeaderValue> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    if allowed.is_empty() {
        tracing::warn!("No valid CORS origins parsed; falling back to permissive");
        return CorsLayer::very_permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::services::TransferConnector;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    pub fn state_with(config: Config, connector: Arc<dyn TransferConnector>) -> AppState {
        AppState {
            config,
            payout: PayoutService::new(connector),
        }
    }

    pub async fn send(
        state: AppState,
        request: Request<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let response = build_router(state)
            .oneshot(request)
            .await
            .expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}
