use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use geo_bidding::config::Settings;
use geo_bidding::core::{BidEngine, EngineSettings};
use geo_bidding::routes::{self, bid::AppState};
use geo_bidding::services::{spawn_refresh, warmup, CampaignCatalog};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // Initialize logging; env vars win over the [logging] section
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default()
        .with_env_overrides();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&logging.level))
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting geo bidding service...");

    let settings = settings.unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    let catalog = Arc::new(CampaignCatalog::load(&settings.catalog.path).unwrap_or_else(|e| {
        error!("Failed to load campaign catalog: {}", e);
        panic!("Catalog error: {}", e);
    }));

    info!(
        "Campaign catalog loaded from {} ({} campaigns)",
        settings.catalog.path,
        catalog.len()
    );

    let engine = BidEngine::new(EngineSettings::from(&settings.engine));

    info!("Bid engine initialized with {:?}", engine.settings());

    if let Some(path) = &settings.catalog.warmup_requests_path {
        warmup::warm_up(&engine, catalog.as_ref(), Path::new(path));
    }

    if let Some(secs) = settings.catalog.refresh_secs.filter(|secs| *secs > 0) {
        spawn_refresh(Arc::clone(&catalog), Duration::from_secs(secs));
        info!("Catalog refresh scheduled every {}s", secs);
    }

    let app_state = AppState {
        catalog,
        engine,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
