use axum::{extract::State, Json};

use crate::{
    constants::{
        payout_amount, payout_amount_minor, BASE_CHAIN_ID, EXPLORER_TX_BASE_URL,
        PAYOUT_TOKEN_ADDRESS, PAYOUT_TOKEN_SYMBOL,
    },
    models::{ApiResponse, QuizConfigResponse},
};

use super::AppState;

/// GET /api/quiz/config
/// Reward and gate settings a front end needs before showing the quiz.
pub async fn get_config(State(state): State<AppState>) -> Json<ApiResponse<QuizConfigResponse>> {
    let payment_app_id = if state.config.payment_gate_enabled {
        state.config.payment_app_id.clone()
    } else {
        None
    };

    Json(ApiResponse::success(QuizConfigResponse {
        payout_amount: payout_amount().to_string(),
        payout_amount_minor: payout_amount_minor().to_string(),
        token_symbol: PAYOUT_TOKEN_SYMBOL.to_string(),
        token_address: PAYOUT_TOKEN_ADDRESS.to_string(),
        chain_id: BASE_CHAIN_ID,
        explorer_tx_base_url: EXPLORER_TX_BASE_URL.to_string(),
        payment_gate_enabled: state.config.payment_gate_enabled,
        payment_app_id,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{send, state_with};
    use crate::config::Config;
    use crate::services::payout_service::testing::RecordingConnector;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;

    fn get() -> Request<Body> {
        Request::builder()
            .uri("/api/quiz/config")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn config_exposes_reward_details() {
        let connector = Arc::new(RecordingConnector::succeeding("0x1"));
        let (status, body) = send(state_with(Config::default(), connector), get()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["payout_amount"], "1.10");
        assert_eq!(body["data"]["payout_amount_minor"], "1100000");
        assert_eq!(body["data"]["chain_id"], 8453);
        assert_eq!(body["data"]["payment_gate_enabled"], false);
        assert!(body["data"].get("payment_app_id").is_none());
    }

    #[tokio::test]
    async fn config_shares_payment_app_id_only_when_gated() {
        let connector = Arc::new(RecordingConnector::succeeding("0x1"));
        let config = Config {
            payment_gate_enabled: true,
            payment_app_id: Some("pay-app".to_string()),
            ..Config::default()
        };
        let (_, body) = send(state_with(config, connector), get()).await;

        assert_eq!(body["data"]["payment_gate_enabled"], true);
        assert_eq!(body["data"]["payment_app_id"], "pay-app");
    }
}
