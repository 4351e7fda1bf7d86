use serde::{Deserialize, Serialize};

/// Envelope used by the informational routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Incoming payout body. `toAddress` is kept as raw JSON so a non-string
/// value can be told apart from a missing one.
#[derive(Debug, Default)]
pub struct PayoutRequest {
    pub to_address: Option<serde_json::Value>,
}

impl PayoutRequest {
    /// Parses a JSON object body. Arrays, strings and `null` are rejected
    /// rather than mapped onto fields by position.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let mut fields: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(bytes)?;
        Ok(Self {
            to_address: fields.remove("toAddress"),
        })
    }
}

/// Outgoing payout body sent by clients.
#[derive(Debug, Serialize)]
pub struct ClaimRequest<'a> {
    #[serde(rename = "toAddress")]
    pub to_address: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutResponse {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Either shape the payout route can answer with.
#[derive(Debug, Default, Deserialize)]
pub struct PayoutReply {
    #[serde(rename = "txHash", default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizConfigResponse {
    pub payout_amount: String,
    pub payout_amount_minor: String,
    pub token_symbol: String,
    pub token_address: String,
    pub chain_id: u64,
    pub explorer_tx_base_url: String,
    pub payment_gate_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_app_id: Option<String>,
}
