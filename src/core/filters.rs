use crate::core::zones::is_point_inside_any_radius;
use crate::models::{AdFormat, BidRequest, Campaign, ExclusionZone, GeoPoint, TargetingSpec};
use rust_decimal::Decimal;

/// Check whether a location falls inside a campaign's targeting area
///
/// `Unmatchable` targeting (absent, unknown or incomplete in the catalog)
/// never matches.
#[inline]
pub fn matches_targeting(point: GeoPoint, targeting: &TargetingSpec) -> bool {
    match targeting {
        TargetingSpec::Radius(zone) => zone.contains(point),
        TargetingSpec::MultiRadius(zones) => is_point_inside_any_radius(point, zones),
        TargetingSpec::Polygon(zone) => zone.contains(point),
        TargetingSpec::Unmatchable => false,
    }
}

/// Check whether a location falls inside any exclusion zone
///
/// Walks the list in order and stops at the first hit. `Inert` entries are
/// skipped.
#[inline]
pub fn is_excluded(point: GeoPoint, exclusions: &[ExclusionZone]) -> bool {
    exclusions.iter().any(|exclusion| match exclusion {
        ExclusionZone::Radius(zone) => zone.contains(point),
        ExclusionZone::Polygon(zone) => zone.contains(point),
        ExclusionZone::Inert => false,
    })
}

#[inline]
pub fn matches_ad_format(campaign: &Campaign, format: AdFormat) -> bool {
    campaign.supports_format(format)
}

/// Decimal comparison; a bid equal to the floor is accepted
#[inline]
pub fn meets_floor_price(campaign: &Campaign, floor_price: Decimal) -> bool {
    campaign.bid_price >= floor_price
}

/// Run the full eligibility pipeline for one campaign
///
/// Cheap checks run first; the geometric checks only run for campaigns that
/// survive activity, format and floor filtering. Budget fields are not
/// consulted.
#[inline]
pub fn is_eligible(campaign: &Campaign, request: &BidRequest) -> bool {
    campaign.active
        && matches_ad_format(campaign, request.ad_format)
        && meets_floor_price(campaign, request.floor_price)
        && matches_targeting(request.user_location, &campaign.targeting)
        && !is_excluded(request.user_location, &campaign.exclusions)
}
