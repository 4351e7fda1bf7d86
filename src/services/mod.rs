// All service modules
pub mod onchain;
pub mod payout_service;

// Re-export for convenience
pub use onchain::{EthersConnector, TokenTransfer, TransferConnector};
pub use payout_service::PayoutService;
