// Service exports
pub mod catalog;
pub mod warmup;

pub use catalog::{parse_catalog, spawn_refresh, CampaignCatalog, CampaignSource, CatalogError};
pub use warmup::{WarmupError, WarmupReport};
