use crate::core::BidEngine;
use crate::models::{BidRequest, BidRequestBody, BidResponse, ErrorResponse, HealthResponse};
use crate::services::CampaignSource;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CampaignSource>,
    pub engine: BidEngine,
}

/// Configure bid-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/bid", web::post().to(bid));
}

/// Health check endpoint
///
/// Reports `degraded` while the catalog is empty, since every request would
/// then end in `no_bid`.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let campaigns = state.catalog.campaigns().len();
    let status = if campaigns > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        campaigns,
        timestamp: chrono::Utc::now(),
    })
}

/// Bid endpoint
///
/// POST /bid
///
/// Request body:
/// ```json
/// {
///   "request_id": "string",
///   "user": { "lat": -23.55, "lon": -46.63, "user_id": "string" },
///   "inventory": { "publisher_id": "string", "ad_format": "banner", "floor_price": 1.5 }
/// }
/// ```
async fn bid(state: web::Data<AppState>, req: web::Json<BidRequestBody>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!(
            "Validation failed for bid request {:?}: field_errors={:?}",
            req.request_id,
            errors
        );
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request = BidRequest::from(req.into_inner());

    let start = Instant::now();
    let campaigns = state.catalog.campaigns();
    let decision = state.engine.decide(&request, &campaigns);
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::debug!(
        "Request {} decided in {} ms: {:?}",
        request.request_id,
        latency_ms,
        decision
    );

    HttpResponse::Ok().json(BidResponse::from_decision(decision, latency_ms))
}
