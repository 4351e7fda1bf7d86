// src/models/mod.rs
pub mod payout;

pub use payout::{
    ApiResponse,
    ClaimRequest,
    ErrorBody,
    PayoutReply,
    PayoutRequest,
    PayoutResponse,
    QuizConfigResponse,
};
