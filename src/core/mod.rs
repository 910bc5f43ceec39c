// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod filters;
pub mod polygon;
pub mod zones;

pub use distance::{
    bounding_box_contains, calculate_bounding_box, equirectangular_distance, haversine_distance,
    is_point_inside_radius, is_within_bounding_box,
};
pub use engine::{BidEngine, EngineSettings};
pub use filters::{is_eligible, is_excluded, matches_ad_format, matches_targeting, meets_floor_price};
pub use polygon::point_in_polygon;
pub use zones::is_point_inside_any_radius;
