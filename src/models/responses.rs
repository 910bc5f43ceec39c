use crate::models::domain::BidDecision;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Bid,
    NoBid,
}

/// Response for the bid endpoint
///
/// `bid_price` and `campaign_id` are only present for `bid` decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidResponse {
    pub request_id: String,
    pub decision: DecisionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    pub latency_ms: u64,
}

impl BidResponse {
    pub fn from_decision(decision: BidDecision, latency_ms: u64) -> Self {
        match decision {
            BidDecision::Bid {
                request_id,
                campaign_id,
                price,
            } => Self {
                request_id,
                decision: DecisionKind::Bid,
                bid_price: Some(price),
                campaign_id: Some(campaign_id),
                latency_ms,
            },
            BidDecision::NoBid { request_id } => Self {
                request_id,
                decision: DecisionKind::NoBid,
                bid_price: None,
                campaign_id: None,
                latency_ms,
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub campaigns: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
