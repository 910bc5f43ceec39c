// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AdFormat, AreaKind, BidDecision, BidRequest, BoundingBox, Campaign, ExclusionZone, GeoPoint,
    PolygonZone, RadiusZone, TargetingSpec, UnknownAdFormat,
};
pub use requests::{BidRequestBody, BidRequestInventory, BidRequestUser};
pub use responses::{BidResponse, DecisionKind, ErrorResponse, HealthResponse};
