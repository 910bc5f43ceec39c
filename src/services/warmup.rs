use crate::core::BidEngine;
use crate::models::{BidRequest, BidRequestBody};
use crate::services::catalog::CampaignSource;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarmupError {
    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid warm-up requests: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Summary of a warm-up pass
#[derive(Debug, Clone, Copy)]
pub struct WarmupReport {
    pub requests: usize,
    pub bids: usize,
    pub elapsed: Duration,
}

/// Run each request through the engine once against the current catalog
pub fn run(engine: &BidEngine, source: &dyn CampaignSource, requests: &[BidRequest]) -> WarmupReport {
    let start = Instant::now();
    let campaigns = source.campaigns();

    let bids = requests
        .iter()
        .filter(|request| engine.decide(request, &campaigns).is_bid())
        .count();

    WarmupReport {
        requests: requests.len(),
        bids,
        elapsed: start.elapsed(),
    }
}

/// Read a JSON array of bid request bodies
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<BidRequest>, WarmupError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| WarmupError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    let bodies: Vec<BidRequestBody> = serde_json::from_str(&json)?;
    Ok(bodies.into_iter().map(BidRequest::from).collect())
}

/// Startup warm-up; never fails the caller
pub fn warm_up(engine: &BidEngine, source: &dyn CampaignSource, path: &Path) {
    match load_requests(path) {
        Ok(requests) => {
            let report = run(engine, source, &requests);
            tracing::info!(
                "Warmup finished in {} ms ({} requests, {} bids)",
                report.elapsed.as_millis(),
                report.requests,
                report.bids
            );
        }
        Err(e) => {
            tracing::warn!("Warmup skipped, continuing startup: {}", e);
        }
    }
}
