use crate::models::domain::{AdFormat, BidRequest, GeoPoint};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request body for the bid endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BidRequestBody {
    #[validate(length(min = 1))]
    pub request_id: String,
    #[validate(nested)]
    pub user: BidRequestUser,
    #[validate(nested)]
    pub inventory: BidRequestInventory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BidRequestUser {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BidRequestInventory {
    #[validate(length(min = 1))]
    pub publisher_id: String,
    /// Parsed case-insensitively; unknown formats reject the payload
    pub ad_format: AdFormat,
    #[validate(custom(function = "validate_floor_price"))]
    pub floor_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

fn validate_floor_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("negative_floor_price"));
    }
    Ok(())
}

impl From<BidRequestBody> for BidRequest {
    fn from(body: BidRequestBody) -> Self {
        BidRequest {
            request_id: body.request_id,
            user_location: GeoPoint::new(body.user.lat, body.user.lon),
            ad_format: body.inventory.ad_format,
            floor_price: body.inventory.floor_price,
        }
    }
}
