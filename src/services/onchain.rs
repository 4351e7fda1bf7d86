use crate::{
    config::PayoutCredentials,
    error::{AppError, Result},
};
use async_trait::async_trait;
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, U256},
    utils::to_checksum,
};
use std::str::FromStr;
use std::sync::Arc;
use url::Url;

ethers::contract::abigen!(
    Erc20,
    r#"[
        function transfer(address to, uint256 amount) returns (bool)
    ]"#
);

/// Submits a single ERC-20 transfer and returns the transaction hash.
#[async_trait]
pub trait TokenTransfer: Send + Sync {
    async fn transfer(&self, token: Address, to: Address, amount: U256) -> Result<String>;
}

/// Builds a [`TokenTransfer`] from signing credentials.
pub trait TransferConnector: Send + Sync {
    fn connect(&self, credentials: &PayoutCredentials) -> Result<Arc<dyn TokenTransfer>>;
}

/// Production connector backed by an HTTP JSON-RPC provider.
pub struct EthersConnector {
    chain_id: u64,
}

impl EthersConnector {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }
}

impl TransferConnector for EthersConnector {
    fn connect(&self, credentials: &PayoutCredentials) -> Result<Arc<dyn TokenTransfer>> {
        let invoker = OnchainInvoker::from_credentials(credentials, self.chain_id)?;
        Ok(Arc::new(invoker))
    }
}

pub struct OnchainInvoker {
    reader: Provider<Http>,
    writer: Arc<SignerMiddleware<Provider<Http>, LocalWallet>>,
    chain_id: u64,
}

impl OnchainInvoker {
    pub fn from_credentials(credentials: &PayoutCredentials, chain_id: u64) -> Result<Self> {
        let rpc_url = Url::parse(&credentials.rpc_url)
            .map_err(|e| AppError::Submission(format!("Invalid RPC URL: {}", e)))?;
        let reader = Provider::new(Http::new(rpc_url));

        let wallet = parse_signer(&credentials.private_key)?.with_chain_id(chain_id);
        let writer = Arc::new(SignerMiddleware::new(reader.clone(), wallet));

        Ok(Self {
            reader,
            writer,
            chain_id,
        })
    }

    pub fn signer_address(&self) -> Address {
        self.writer.address()
    }

    // The wallet is bound to one network; refuse to sign against another.
    async fn ensure_chain(&self) -> Result<()> {
        let remote = self
            .reader
            .get_chainid()
            .await
            .map_err(|e| AppError::Submission(e.to_string()))?;
        if remote != U256::from(self.chain_id) {
            return Err(AppError::Submission(format!(
                "RPC endpoint is on chain {} but payouts target chain {}",
                remote, self.chain_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenTransfer for OnchainInvoker {
    async fn transfer(&self, token: Address, to: Address, amount: U256) -> Result<String> {
        self.ensure_chain().await?;

        let contract = Erc20::new(token, self.writer.clone());
        let call = contract.transfer(to, amount);
        let pending = call
            .send()
            .await
            .map_err(|e| AppError::Submission(e.to_string()))?;

        let tx_hash = *pending;
        Ok(format!("{:#x}", tx_hash))
    }
}

pub fn parse_signer(private_key: &str) -> Result<LocalWallet> {
    LocalWallet::from_str(private_key.trim())
        .map_err(|e| AppError::Submission(format!("Invalid signing key: {}", e)))
}

/// Parses a 20-byte hex account address. Lowercase input is accepted as is;
/// any uppercase letter means the input must carry a valid EIP-55 checksum.
pub fn parse_account_address(value: &str) -> Option<Address> {
    let digits = value.strip_prefix("0x")?;
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let address = Address::from_str(value).ok()?;
    if value.to_ascii_lowercase() != value && to_checksum(&address, None) != value {
        return None;
    }
    Some(address)
}
