use axum::{body::Bytes, extract::State, Json};
use ethers::types::Address;

use crate::{
    error::{AppError, Result},
    models::{PayoutRequest, PayoutResponse},
    services::onchain::parse_account_address,
};

use super::AppState;

pub const TO_ADDRESS_TYPE_MESSAGE: &str = "toAddress must be a string.";
pub const TO_ADDRESS_FORMAT_MESSAGE: &str =
    "Invalid toAddress format. Please provide a valid Ethereum address.";

fn validate_to_address(value: Option<&serde_json::Value>) -> Result<Address> {
    let raw = value
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::Validation(TO_ADDRESS_TYPE_MESSAGE.to_string()))?;
    parse_account_address(raw)
        .ok_or_else(|| AppError::Validation(TO_ADDRESS_FORMAT_MESSAGE.to_string()))
}

/// POST /api/payout
///
/// Pays the quiz reward to `toAddress`. The caller's quiz result is not
/// verified here; reaching this route is treated as a pass.
pub async fn payout(State(state): State<AppState>, body: Bytes) -> Result<Json<PayoutResponse>> {
    let req = PayoutRequest::from_json(&body).map_err(|e| {
        tracing::debug!("Rejecting unparsable payout body: {}", e);
        AppError::Validation(TO_ADDRESS_TYPE_MESSAGE.to_string())
    })?;

    let to_address = validate_to_address(req.to_address.as_ref())?;

    let tx_hash = state
        .payout
        .send_payout(&state.config, to_address)
        .await
        .inspect_err(|e| tracing::error!("Payout API Error: {}", e))?;

    Ok(Json(PayoutResponse { tx_hash }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{send, state_with};
    use crate::config::Config;
    use crate::services::payout_service::testing::{configured, RecordingConnector};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use ethers::types::U256;
    use std::sync::Arc;

    const VALID_ADDRESS: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/payout")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_address_is_rejected_without_transfer() {
        let connector = Arc::new(RecordingConnector::succeeding("0xdead"));
        let state = state_with(configured(), connector.clone());

        let (status, body) = send(state, post("{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], TO_ADDRESS_TYPE_MESSAGE);
        assert!(connector.transfers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_string_address_is_rejected() {
        let connector = Arc::new(RecordingConnector::succeeding("0xdead"));
        let state = state_with(configured(), connector.clone());

        let (status, body) = send(state, post(r#"{"toAddress": 12345}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], TO_ADDRESS_TYPE_MESSAGE);
        assert!(connector.transfers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_address_is_rejected() {
        let connector = Arc::new(RecordingConnector::succeeding("0xdead"));
        let state = state_with(configured(), connector.clone());

        let (status, body) = send(state, post(r#"{"toAddress": "0x1234"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], TO_ADDRESS_FORMAT_MESSAGE);
        assert!(connector.transfers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unparsable_body_is_rejected() {
        let connector = Arc::new(RecordingConnector::succeeding("0xdead"));
        let state = state_with(configured(), connector.clone());

        let (status, _) = send(state, post("not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(connector.transfers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_object_bodies_are_rejected_without_transfer() {
        let connector = Arc::new(RecordingConnector::succeeding("0xdead"));
        let bodies = [
            format!(r#"["{}"]"#, VALID_ADDRESS),
            format!(r#""{}""#, VALID_ADDRESS),
            "null".to_string(),
        ];

        for body in &bodies {
            let state = state_with(configured(), connector.clone());
            let (status, json) = send(state, post(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(json["error"], TO_ADDRESS_TYPE_MESSAGE);
        }

        assert!(connector.transfers.lock().unwrap().is_empty());
        assert_eq!(*connector.connects.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_configuration_returns_not_configured() {
        let connector = Arc::new(RecordingConnector::succeeding("0xdead"));
        let config = Config {
            rpc_url: Some("https://mainnet.base.org".to_string()),
            ..Config::default()
        };
        let state = state_with(config, connector.clone());

        let body = format!(r#"{{"toAddress": "{}"}}"#, VALID_ADDRESS);
        let (status, body) = send(state, post(&body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server not configured");
        assert_eq!(*connector.connects.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn valid_request_transfers_once_and_returns_hash() {
        let connector = Arc::new(RecordingConnector::succeeding("0xdeadbeef"));
        let state = state_with(configured(), connector.clone());

        let body = format!(r#"{{"toAddress": "{}"}}"#, VALID_ADDRESS.to_ascii_lowercase());
        let (status, body) = send(state, post(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["txHash"], "0xdeadbeef");
        let transfers = connector.transfers.lock().unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].1, parse_account_address(VALID_ADDRESS).unwrap());
        assert_eq!(transfers[0].2, U256::from(1_100_000_u64));
    }

    #[tokio::test]
    async fn submission_failure_returns_server_error_message() {
        let connector = Arc::new(RecordingConnector::failing("nonce too low"));
        let state = state_with(configured(), connector);

        let body = format!(r#"{{"toAddress": "{}"}}"#, VALID_ADDRESS);
        let (status, body) = send(state, post(&body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "nonce too low");
    }
}
