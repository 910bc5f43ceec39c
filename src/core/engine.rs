use crate::core::filters::is_eligible;
use crate::models::{BidDecision, BidRequest, Campaign};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Catalogs at least this large are scanned in parallel by default
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    /// Minimum catalog size for the rayon scan; smaller catalogs are scanned inline
    pub parallel_threshold: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Eligible campaign tagged with its position in the catalog
type Candidate<'a> = (usize, &'a Campaign);

/// Bid decision orchestrator
///
/// # Pipeline
/// 1. Activity
/// 2. Ad format
/// 3. Floor price
/// 4. Geo targeting
/// 5. Geo exclusions
///
/// Survivors are reduced to the highest `bid_price`; equal prices go to the
/// campaign that appears first in the catalog. The engine holds no mutable
/// state and can be shared across request handlers.
#[derive(Debug, Clone, Default)]
pub struct BidEngine {
    settings: EngineSettings,
}

impl BidEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Decide whether to bid on `request` given the current catalog snapshot
    ///
    /// Always returns a decision carrying the request id. An empty catalog, or
    /// one where nothing survives the filters, yields `NoBid`.
    pub fn decide(&self, request: &BidRequest, campaigns: &[Campaign]) -> BidDecision {
        let winner = if campaigns.len() >= self.settings.parallel_threshold {
            scan_parallel(request, campaigns)
        } else {
            scan_sequential(request, campaigns)
        };

        match winner {
            Some((index, campaign)) => {
                tracing::debug!(
                    "Bidding {} with campaign {} (catalog index {}) for request {}",
                    campaign.bid_price,
                    campaign.campaign_id,
                    index,
                    request.request_id
                );
                BidDecision::Bid {
                    request_id: request.request_id.clone(),
                    campaign_id: campaign.campaign_id.clone(),
                    price: campaign.bid_price,
                }
            }
            None => {
                tracing::debug!(
                    "No eligible campaign among {} for request {}",
                    campaigns.len(),
                    request.request_id
                );
                BidDecision::NoBid {
                    request_id: request.request_id.clone(),
                }
            }
        }
    }
}

fn scan_sequential<'a>(request: &BidRequest, campaigns: &'a [Campaign]) -> Option<Candidate<'a>> {
    campaigns
        .iter()
        .enumerate()
        .filter(|&(_, campaign)| is_eligible(campaign, request))
        .reduce(prefer)
}

/// Catalog order travels with each candidate, so the result does not depend
/// on how rayon splits and joins the work
fn scan_parallel<'a>(request: &BidRequest, campaigns: &'a [Campaign]) -> Option<Candidate<'a>> {
    campaigns
        .par_iter()
        .enumerate()
        .filter(|&(_, campaign)| is_eligible(campaign, request))
        .reduce_with(prefer)
}

/// Higher price wins; on equal price the lower catalog index wins
#[inline]
fn prefer<'a>(a: Candidate<'a>, b: Candidate<'a>) -> Candidate<'a> {
    match a.1.bid_price.cmp(&b.1.bid_price) {
        Ordering::Greater => a,
        Ordering::Less => b,
        Ordering::Equal if a.0 <= b.0 => a,
        Ordering::Equal => b,
    }
}
