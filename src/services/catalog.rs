use crate::models::{Campaign, TargetingSpec};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading the campaign catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid campaign catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Catalog was not loaded from a file and cannot be reloaded")]
    NoSourceFile,
}

/// Read access to the current campaign catalog
///
/// Implementations return an immutable, ordered snapshot. Callers keep the
/// snapshot for the duration of one decision even if the catalog is swapped
/// meanwhile.
pub trait CampaignSource: Send + Sync {
    fn campaigns(&self) -> Arc<[Campaign]>;
}

/// In-memory campaign catalog, optionally backed by a JSON file
pub struct CampaignCatalog {
    path: Option<PathBuf>,
    snapshot: RwLock<Arc<[Campaign]>>,
}

impl CampaignCatalog {
    /// Build a catalog from an already decoded list
    pub fn from_campaigns(campaigns: Vec<Campaign>) -> Self {
        Self {
            path: None,
            snapshot: RwLock::new(campaigns.into()),
        }
    }

    /// Load a catalog from a JSON array file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();
        let campaigns = read_catalog(&path)?;

        Ok(Self {
            path: Some(path),
            snapshot: RwLock::new(campaigns.into()),
        })
    }

    /// Re-read the backing file and swap the snapshot
    ///
    /// On error the previous snapshot stays in place.
    pub fn reload(&self) -> Result<usize, CatalogError> {
        let path = self.path.as_ref().ok_or(CatalogError::NoSourceFile)?;
        let campaigns = read_catalog(path)?;
        let count = campaigns.len();
        self.replace(campaigns);
        Ok(count)
    }

    /// Swap in a new campaign list
    pub fn replace(&self, campaigns: Vec<Campaign>) {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = campaigns.into();
    }

    pub fn len(&self) -> usize {
        self.campaigns().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl CampaignSource for CampaignCatalog {
    fn campaigns(&self) -> Arc<[Campaign]> {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Decode a catalog from JSON text
pub fn parse_catalog(json: &str) -> Result<Vec<Campaign>, CatalogError> {
    let campaigns: Vec<Campaign> = serde_json::from_str(json)?;
    log_catalog_summary(&campaigns);
    Ok(campaigns)
}

fn read_catalog(path: &Path) -> Result<Vec<Campaign>, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Read campaign catalog from {}", path.display());
    parse_catalog(&json)
}

fn log_catalog_summary(campaigns: &[Campaign]) {
    let active = campaigns.iter().filter(|c| c.active).count();
    let unmatchable = campaigns
        .iter()
        .filter(|c| c.targeting == TargetingSpec::Unmatchable)
        .count();

    tracing::info!(
        "Campaigns loaded: {} ({} active)",
        campaigns.len(),
        active
    );

    if unmatchable > 0 {
        tracing::warn!(
            "{} campaigns have missing or malformed targeting and will never bid",
            unmatchable
        );
    }
}

/// Periodically reload a file-backed catalog on the tokio runtime
///
/// Reload failures are logged and the previous snapshot keeps serving.
pub fn spawn_refresh(
    catalog: Arc<CampaignCatalog>,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // First tick fires immediately; the catalog was just loaded
        interval.tick().await;

        loop {
            interval.tick().await;

            let catalog = Arc::clone(&catalog);
            match tokio::task::spawn_blocking(move || catalog.reload()).await {
                Ok(Ok(count)) => tracing::debug!("Catalog refreshed ({} campaigns)", count),
                Ok(Err(e)) => tracing::warn!("Catalog refresh failed, keeping previous snapshot: {}", e),
                Err(e) => tracing::error!("Catalog refresh task panicked: {}", e),
            }
        }
    })
}
