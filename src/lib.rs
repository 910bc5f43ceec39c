//! Geo Bidding - bid decision engine for geolocated ad requests
//!
//! Filters a campaign catalog by activity, ad format, floor price, geo
//! targeting and geo exclusions, then picks the highest bidder.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{BidEngine, EngineSettings, distance::{haversine_distance, is_point_inside_radius}};
pub use crate::models::{AdFormat, BidDecision, BidRequest, Campaign, ExclusionZone, GeoPoint, PolygonZone, RadiusZone, TargetingSpec};
