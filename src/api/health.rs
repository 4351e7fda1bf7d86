use axum::{extract::State, Json};
use serde::Serialize;
use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub payout: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Only reports whether credentials are present; no RPC round trip.
    let payout_status = if state.config.payout_configured() {
        "configured".to_string()
    } else {
        "not_configured".to_string()
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        payout: payout_status,
    })
}
