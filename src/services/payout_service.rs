use crate::{
    config::Config,
    constants::{payout_amount, payout_amount_minor, PAYOUT_TOKEN_ADDRESS, PAYOUT_TOKEN_SYMBOL},
    error::{AppError, Result},
    services::onchain::{parse_account_address, TransferConnector},
};
use ethers::types::{Address, U256};
use std::sync::Arc;

/// Sends the fixed quiz reward to a validated address.
///
/// Stateless: every call builds fresh clients from the configured
/// credentials and submits exactly one transfer. There is no deduplication,
/// so repeated calls for one address pay out repeatedly.
#[derive(Clone)]
pub struct PayoutService {
    connector: Arc<dyn TransferConnector>,
}

impl PayoutService {
    pub fn new(connector: Arc<dyn TransferConnector>) -> Self {
        Self { connector }
    }

    pub async fn send_payout(&self, config: &Config, to: Address) -> Result<String> {
        let credentials = config
            .payout_credentials()
            .ok_or(AppError::NotConfigured)?;

        let token = parse_account_address(PAYOUT_TOKEN_ADDRESS)
            .ok_or_else(|| AppError::Internal("Payout token address is malformed".into()))?;
        let amount = U256::from(payout_amount_minor());

        let transfer = self.connector.connect(&credentials)?;

        tracing::info!(
            "Sending {} {} payout to {:#x}",
            payout_amount(),
            PAYOUT_TOKEN_SYMBOL,
            to
        );
        let tx_hash = transfer.transfer(token, to, amount).await?;
        tracing::info!("Payout broadcast: {}", tx_hash);

        Ok(tx_hash)
    }
}
