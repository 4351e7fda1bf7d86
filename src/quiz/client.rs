use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ClaimRequest, PayoutReply};

pub const PAYOUT_FAILED_FALLBACK: &str = "Payout failed";

#[derive(Error, Debug)]
pub enum ClientError {
    /// The endpoint answered with a non-success status.
    #[error("{}", .message.as_deref().unwrap_or(PAYOUT_FAILED_FALLBACK))]
    Rejected { status: u16, message: Option<String> },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("response did not include a transaction hash")]
    MissingTxHash,
}

/// Requests the quiz reward for a wallet address.
#[async_trait]
pub trait PayoutClient: Send + Sync {
    async fn request_payout(&self, to_address: &str) -> Result<String, ClientError>;
}

pub struct HttpPayoutClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPayoutClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/payout", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PayoutClient for HttpPayoutClient {
    async fn request_payout(&self, to_address: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ClaimRequest { to_address })
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let reply: PayoutReply = serde_json::from_slice(&bytes)?;
        interpret_reply(status.as_u16(), reply)
    }
}

fn interpret_reply(status: u16, reply: PayoutReply) -> Result<String, ClientError> {
    if !(200..300).contains(&status) {
        let message = reply.error.filter(|m| !m.trim().is_empty());
        return Err(ClientError::Rejected { status, message });
    }
    reply.tx_hash.ok_or(ClientError::MissingTxHash)
}
