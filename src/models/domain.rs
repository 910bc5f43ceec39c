use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Closed disk of `radius_km` around `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusZone {
    pub center: GeoPoint,
    pub radius_km: f64,
}

impl RadiusZone {
    pub const fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radius_km }
    }
}

/// Polygon described by a ring of vertices.
///
/// The ring is only usable when it is closed (first point equals last point)
/// and has at least four points. Anything else never contains a point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonZone {
    pub ring: Vec<GeoPoint>,
}

impl PolygonZone {
    pub fn new(ring: Vec<GeoPoint>) -> Self {
        Self { ring }
    }

    /// Build a targeting ring from `[lat, lon]` pairs, dropping pairs with
    /// fewer than two values and ignoring anything past the second
    fn from_pairs(pairs: Vec<Option<Vec<f64>>>) -> Self {
        let ring = pairs
            .into_iter()
            .flatten()
            .filter_map(|pair| match pair.as_slice() {
                [lat, lon, ..] => Some(GeoPoint::new(*lat, *lon)),
                _ => None,
            })
            .collect();

        Self { ring }
    }

    /// Build an exclusion ring; only exact `[lat, lon]` pairs are kept
    fn from_exact_pairs(pairs: Vec<Option<Vec<f64>>>) -> Self {
        let ring = pairs
            .into_iter()
            .flatten()
            .filter_map(|pair| match pair.as_slice() {
                [lat, lon] => Some(GeoPoint::new(*lat, *lon)),
                _ => None,
            })
            .collect();

        Self { ring }
    }

    fn to_pairs(&self) -> Vec<Option<Vec<f64>>> {
        self.ring
            .iter()
            .map(|point| Some(vec![point.lat, point.lon]))
            .collect()
    }
}

/// Area tag used by targeting and exclusion records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    Radius,
    MultiRadius,
    Polygon,
}

impl AreaKind {
    /// Case-insensitive tag lookup; unknown tags yield `None`
    pub fn parse(tag: &str) -> Option<Self> {
        [Self::Radius, Self::MultiRadius, Self::Polygon]
            .into_iter()
            .find(|kind| tag.eq_ignore_ascii_case(kind.as_str()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Radius => "radius",
            Self::MultiRadius => "multi_radius",
            Self::Polygon => "polygon",
        }
    }
}

/// Catalog shape of a zone center; a missing coordinate leaves the zone unusable
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lon: Option<f64>,
}

impl PointRecord {
    fn into_point(self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.lat?, self.lon?))
    }
}

impl From<GeoPoint> for PointRecord {
    fn from(point: GeoPoint) -> Self {
        Self {
            lat: Some(point.lat),
            lon: Some(point.lon),
        }
    }
}

/// Raw catalog shape shared by targeting and exclusion entries.
///
/// Only used as the serde representation of [`TargetingSpec`] and [`ExclusionZone`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    center: Option<PointRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    radius_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    targets: Option<Vec<Option<RadiusRecord>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coords: Option<Vec<Option<Vec<f64>>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadiusRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    center: Option<PointRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    radius_km: Option<f64>,
}

impl RadiusRecord {
    fn into_zone(self) -> Option<RadiusZone> {
        Some(RadiusZone::new(self.center?.into_point()?, self.radius_km?))
    }
}

impl From<RadiusZone> for RadiusRecord {
    fn from(zone: RadiusZone) -> Self {
        Self {
            center: Some(zone.center.into()),
            radius_km: Some(zone.radius_km),
        }
    }
}

impl AreaRecord {
    fn kind(&self) -> Option<AreaKind> {
        self.kind.as_deref().and_then(AreaKind::parse)
    }

    fn radius_zone(&self) -> Option<RadiusZone> {
        Some(RadiusZone::new(self.center?.into_point()?, self.radius_km?))
    }

    fn radius(zone: RadiusZone) -> Self {
        Self {
            kind: Some(AreaKind::Radius.as_str().to_string()),
            center: Some(zone.center.into()),
            radius_km: Some(zone.radius_km),
            ..Self::default()
        }
    }

    fn polygon(zone: &PolygonZone) -> Self {
        Self {
            kind: Some(AreaKind::Polygon.as_str().to_string()),
            coords: Some(zone.to_pairs()),
            ..Self::default()
        }
    }
}

/// Where a campaign wants to bid.
///
/// Decoding never fails on geometry: an absent or unknown tag, or a variant
/// missing its payload, decodes to `Unmatchable`, which matches no location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<AreaRecord>", into = "AreaRecord")]
pub enum TargetingSpec {
    Radius(RadiusZone),
    MultiRadius(Vec<RadiusZone>),
    Polygon(PolygonZone),
    #[default]
    Unmatchable,
}

impl From<Option<AreaRecord>> for TargetingSpec {
    fn from(record: Option<AreaRecord>) -> Self {
        let Some(record) = record else {
            return Self::Unmatchable;
        };

        match record.kind() {
            Some(AreaKind::Radius) => record
                .radius_zone()
                .map_or(Self::Unmatchable, Self::Radius),
            Some(AreaKind::MultiRadius) => match record.targets {
                Some(targets) => Self::MultiRadius(
                    targets
                        .into_iter()
                        .flatten()
                        .filter_map(RadiusRecord::into_zone)
                        .collect(),
                ),
                None => Self::Unmatchable,
            },
            Some(AreaKind::Polygon) => match record.coords {
                Some(coords) => Self::Polygon(PolygonZone::from_pairs(coords)),
                None => Self::Unmatchable,
            },
            None => Self::Unmatchable,
        }
    }
}

impl From<TargetingSpec> for AreaRecord {
    fn from(spec: TargetingSpec) -> Self {
        match spec {
            TargetingSpec::Radius(zone) => AreaRecord::radius(zone),
            TargetingSpec::MultiRadius(zones) => AreaRecord {
                kind: Some(AreaKind::MultiRadius.as_str().to_string()),
                targets: Some(zones.into_iter().map(|z| Some(z.into())).collect()),
                ..AreaRecord::default()
            },
            TargetingSpec::Polygon(zone) => AreaRecord::polygon(&zone),
            TargetingSpec::Unmatchable => AreaRecord::default(),
        }
    }
}

/// One entry of a campaign's exclusion list.
///
/// Entries without a usable tag or geometry decode to `Inert` and are skipped
/// when evaluating exclusions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<AreaRecord>", into = "AreaRecord")]
pub enum ExclusionZone {
    Radius(RadiusZone),
    Polygon(PolygonZone),
    Inert,
}

impl From<Option<AreaRecord>> for ExclusionZone {
    fn from(record: Option<AreaRecord>) -> Self {
        let Some(record) = record else {
            return Self::Inert;
        };

        match record.kind() {
            Some(AreaKind::Radius) => record.radius_zone().map_or(Self::Inert, Self::Radius),
            Some(AreaKind::Polygon) => match record.coords {
                Some(coords) => Self::Polygon(PolygonZone::from_exact_pairs(coords)),
                None => Self::Inert,
            },
            Some(AreaKind::MultiRadius) | None => Self::Inert,
        }
    }
}

impl From<ExclusionZone> for AreaRecord {
    fn from(zone: ExclusionZone) -> Self {
        match zone {
            ExclusionZone::Radius(zone) => AreaRecord::radius(zone),
            ExclusionZone::Polygon(zone) => AreaRecord::polygon(&zone),
            ExclusionZone::Inert => AreaRecord::default(),
        }
    }
}

/// Inventory ad format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AdFormat {
    Native,
    Video,
    Banner,
    Interstitial,
}

#[derive(Debug, Clone, Error)]
#[error("unknown ad format: {0}")]
pub struct UnknownAdFormat(pub String);

impl AdFormat {
    pub const ALL: [AdFormat; 4] = [Self::Native, Self::Video, Self::Banner, Self::Interstitial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Video => "video",
            Self::Banner => "banner",
            Self::Interstitial => "interstitial",
        }
    }

    /// Canonical format comparison: ASCII case-insensitive against the tag name
    #[inline]
    pub fn matches_tag(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(self.as_str())
    }
}

impl FromStr for AdFormat {
    type Err = UnknownAdFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.matches_tag(s))
            .ok_or_else(|| UnknownAdFormat(s.to_string()))
    }
}

impl TryFrom<String> for AdFormat {
    type Error = UnknownAdFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Campaign as read from the catalog snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub campaign_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub bid_price: Decimal,
    /// Read from the catalog but never consulted or decremented when deciding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_remaining: Option<Decimal>,
    /// Same as `budget_remaining`: informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_budget: Option<Decimal>,
    #[serde(default)]
    pub active: bool,
    /// Raw format tags; unknown tags are kept and simply never match
    #[serde(default, deserialize_with = "null_as_default")]
    pub ad_formats: Vec<String>,
    #[serde(default)]
    pub targeting: TargetingSpec,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exclusions: Vec<ExclusionZone>,
}

impl Campaign {
    pub fn supports_format(&self, format: AdFormat) -> bool {
        self.ad_formats.iter().any(|tag| format.matches_tag(tag))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Validated bid request as seen by the decision engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRequest {
    pub request_id: String,
    pub user_location: GeoPoint,
    pub ad_format: AdFormat,
    pub floor_price: Decimal,
}

/// Outcome of a decision, always tied to the originating request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidDecision {
    Bid {
        request_id: String,
        campaign_id: String,
        price: Decimal,
    },
    NoBid {
        request_id: String,
    },
}

impl BidDecision {
    pub fn request_id(&self) -> &str {
        match self {
            Self::Bid { request_id, .. } | Self::NoBid { request_id } => request_id,
        }
    }

    pub fn is_bid(&self) -> bool {
        matches!(self, Self::Bid { .. })
    }

    pub fn campaign_id(&self) -> Option<&str> {
        match self {
            Self::Bid { campaign_id, .. } => Some(campaign_id),
            Self::NoBid { .. } => None,
        }
    }

    pub fn price(&self) -> Option<Decimal> {
        match self {
            Self::Bid { price, .. } => Some(*price),
            Self::NoBid { .. } => None,
        }
    }
}

/// Geospatial bounding box in degrees
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_targeting_decodes() {
        let spec: TargetingSpec = serde_json::from_str(
            r#"{"type": "RADIUS", "center": {"lat": -23.55, "lon": -46.63}, "radius_km": 5.0}"#,
        )
        .unwrap();

        assert_eq!(
            spec,
            TargetingSpec::Radius(RadiusZone::new(GeoPoint::new(-23.55, -46.63), 5.0))
        );
    }

    #[test]
    fn test_radius_without_center_is_unmatchable() {
        let spec: TargetingSpec =
            serde_json::from_str(r#"{"type": "radius", "radius_km": 5.0}"#).unwrap();
        assert_eq!(spec, TargetingSpec::Unmatchable);
    }

    #[test]
    fn test_unknown_tag_is_unmatchable() {
        let spec: TargetingSpec = serde_json::from_str(r#"{"type": "hexagon"}"#).unwrap();
        assert_eq!(spec, TargetingSpec::Unmatchable);

        let spec: TargetingSpec = serde_json::from_str("null").unwrap();
        assert_eq!(spec, TargetingSpec::Unmatchable);
    }

    #[test]
    fn test_multi_radius_drops_incomplete_targets() {
        let spec: TargetingSpec = serde_json::from_str(
            r#"{"type": "multi_radius", "targets": [
                {"center": {"lat": 1.0, "lon": 2.0}, "radius_km": 3.0},
                {"radius_km": 4.0},
                null
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            spec,
            TargetingSpec::MultiRadius(vec![RadiusZone::new(GeoPoint::new(1.0, 2.0), 3.0)])
        );
    }

    #[test]
    fn test_polygon_coords_are_lat_lon_pairs() {
        let spec: TargetingSpec = serde_json::from_str(
            r#"{"type": "polygon", "coords": [[0, 0], [0, 10], [10], null, [10, 10, 99], [0, 0]]}"#,
        )
        .unwrap();

        assert_eq!(
            spec,
            TargetingSpec::Polygon(PolygonZone::new(vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 10.0),
                GeoPoint::new(10.0, 10.0),
                GeoPoint::new(0.0, 0.0),
            ]))
        );
    }

    #[test]
    fn test_partial_center_is_unmatchable() {
        let spec: TargetingSpec = serde_json::from_str(
            r#"{"type": "radius", "center": {"lat": 0}, "radius_km": 5.0}"#,
        )
        .unwrap();
        assert_eq!(spec, TargetingSpec::Unmatchable);

        let spec: TargetingSpec = serde_json::from_str(
            r#"{"type": "multi_radius", "targets": [
                {"center": {"lon": 2.0}, "radius_km": 3.0},
                {"center": {"lat": 1.0, "lon": 2.0}, "radius_km": 3.0}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            spec,
            TargetingSpec::MultiRadius(vec![RadiusZone::new(GeoPoint::new(1.0, 2.0), 3.0)])
        );

        let zone: ExclusionZone = serde_json::from_str(
            r#"{"type": "radius", "center": {"lat": 0, "lon": null}, "radius_km": 1}"#,
        )
        .unwrap();
        assert_eq!(zone, ExclusionZone::Inert);
    }

    #[test]
    fn test_exclusion_polygon_keeps_exact_pairs_only() {
        let zone: ExclusionZone = serde_json::from_str(
            r#"{"type": "polygon", "coords": [[0, 0], [0, 10], [10], null, [10, 10, 99], [10, 0], [0, 0]]}"#,
        )
        .unwrap();

        assert_eq!(
            zone,
            ExclusionZone::Polygon(PolygonZone::new(vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 10.0),
                GeoPoint::new(10.0, 0.0),
                GeoPoint::new(0.0, 0.0),
            ]))
        );
    }

    #[test]
    fn test_exclusion_polygon_of_triples_is_empty() {
        let zone: ExclusionZone = serde_json::from_str(
            r#"{"type": "polygon", "coords": [[0, 0, 1], [0, 10, 1], [10, 10, 1], [10, 0, 1], [0, 0, 1]]}"#,
        )
        .unwrap();

        assert_eq!(zone, ExclusionZone::Polygon(PolygonZone::default()));
    }

    #[test]
    fn test_exclusion_without_tag_is_inert() {
        let zones: Vec<ExclusionZone> = serde_json::from_str(
            r#"[{"center": {"lat": 0, "lon": 0}, "radius_km": 1}, {"type": "multi_radius"}, null]"#,
        )
        .unwrap();

        assert!(zones.iter().all(|z| *z == ExclusionZone::Inert));
    }

    #[test]
    fn test_campaign_tolerates_nulls() {
        let campaign: Campaign = serde_json::from_str(
            r#"{"campaign_id": "c1", "bid_price": 2.5, "active": true,
                "ad_formats": null, "targeting": null, "exclusions": null}"#,
        )
        .unwrap();

        assert!(campaign.ad_formats.is_empty());
        assert!(campaign.exclusions.is_empty());
        assert_eq!(campaign.targeting, TargetingSpec::Unmatchable);
        assert_eq!(campaign.bid_price, Decimal::new(25, 1));
    }

    #[test]
    fn test_targeting_round_trips_through_catalog_shape() {
        let spec = TargetingSpec::MultiRadius(vec![
            RadiusZone::new(GeoPoint::new(1.0, 2.0), 3.0),
            RadiusZone::new(GeoPoint::new(4.0, 5.0), 60.0),
        ]);

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "multi_radius");

        let back: TargetingSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_ad_format_case_insensitive() {
        assert_eq!("BANNER".parse::<AdFormat>().unwrap(), AdFormat::Banner);
        assert_eq!("Video".parse::<AdFormat>().unwrap(), AdFormat::Video);
        assert!("billboard".parse::<AdFormat>().is_err());

        let format: AdFormat = serde_json::from_str(r#""Interstitial""#).unwrap();
        assert_eq!(format, AdFormat::Interstitial);
        assert_eq!(serde_json::to_string(&format).unwrap(), r#""interstitial""#);
    }

    #[test]
    fn test_supports_format_ignores_case() {
        let campaign: Campaign = serde_json::from_str(
            r#"{"campaign_id": "c1", "bid_price": 1, "ad_formats": ["Banner", "carousel"]}"#,
        )
        .unwrap();

        assert!(campaign.supports_format(AdFormat::Banner));
        assert!(!campaign.supports_format(AdFormat::Video));
    }

    #[test]
    fn test_decision_accessors() {
        let bid = BidDecision::Bid {
            request_id: "r1".to_string(),
            campaign_id: "c1".to_string(),
            price: Decimal::new(2, 0),
        };
        assert!(bid.is_bid());
        assert_eq!(bid.request_id(), "r1");
        assert_eq!(bid.campaign_id(), Some("c1"));

        let no_bid = BidDecision::NoBid { request_id: "r2".to_string() };
        assert!(!no_bid.is_bid());
        assert_eq!(no_bid.price(), None);
    }
}
