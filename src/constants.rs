/// Application constants
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub const API_VERSION: &str = "v1";

// Target network (Base mainnet)
pub const BASE_CHAIN_ID: u64 = 8453;

// Payout token (USDC on Base)
pub const PAYOUT_TOKEN_SYMBOL: &str = "USDC";
pub const PAYOUT_TOKEN_ADDRESS: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
pub const PAYOUT_TOKEN_DECIMALS: u32 = 6;

// Explorer used for transaction links
pub const EXPLORER_TX_BASE_URL: &str = "https://base.blockscout.com/tx/";

// Client-side persisted completion marker
pub const COMPLETION_FLAG_KEY: &str = "hasTakenLeylinePopQuiz";
pub const COMPLETION_FLAG_VALUE: &str = "true";

/// Display amount paid to a winner: 1.10 USDC.
pub fn payout_amount() -> Decimal {
    Decimal::new(110, 2)
}

/// Payout amount in token minor units, floored like the on-chain amount.
pub fn payout_amount_minor() -> u128 {
    to_minor_units(payout_amount(), PAYOUT_TOKEN_DECIMALS).unwrap_or_default()
}

pub fn to_minor_units(amount: Decimal, decimals: u32) -> Option<u128> {
    if amount.is_sign_negative() {
        return None;
    }
    let scale = Decimal::from(10_u64.checked_pow(decimals)?);
    amount.checked_mul(scale)?.floor().to_u128()
}

pub fn explorer_tx_url(tx_hash: &str) -> String {
    format!("{}{}", EXPLORER_TX_BASE_URL, tx_hash)
}
