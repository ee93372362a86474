use std::net::SocketAddr;
use std::time::Duration;

use chrono::Local;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use sale_server::route::RouteConfig;
use sale_server::store::{
    CachedListingSource, InMemoryFavorites, ListingStoreClient, SourceConfig, StoreConfig,
    StoreQuery, built_in_listings, load_seed,
};
use sale_server::web::{AppState, create_router};

/// How often to rewarm the default query so degraded mode has a
/// recent snapshot to fall back on (10 minutes).
const REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Seed listings: a configured file, else the bundled Fairbanks set
    let seed = match std::env::var("SALE_SEED_FILE") {
        Ok(path) => match load_seed(&path) {
            Ok(listings) => {
                println!("Loaded {} seed listings from {path}", listings.len());
                listings
            }
            Err(e) => {
                eprintln!("Warning: failed to load seed file {path}: {e}");
                built_in_listings(Local::now().date_naive())
            }
        },
        Err(_) => built_in_listings(Local::now().date_naive()),
    };

    // Listing store client; without a key we run on seed data alone
    let source = match std::env::var("SALE_STORE_API_KEY") {
        Ok(api_key) => {
            let mut config = StoreConfig::new(api_key);
            if let Ok(base_url) = std::env::var("SALE_STORE_URL") {
                config = config.with_base_url(base_url);
            }
            let client =
                ListingStoreClient::new(config).expect("Failed to create listing store client");
            CachedListingSource::new(client, Some(seed), &SourceConfig::default())
        }
        Err(_) => {
            eprintln!("Warning: SALE_STORE_API_KEY not set. Serving seed data only.");
            CachedListingSource::offline(seed, &SourceConfig::default())
        }
    };

    // Build app state
    let state = AppState::new(source, InMemoryFavorites::new(), RouteConfig::default());

    // Spawn background task to keep the default query warm
    let listings_refresh = state.listings.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            if let Err(e) = listings_refresh.fetch(&StoreQuery::default()).await {
                warn!(error = %e, "background listing refresh failed");
            }
        }
    });

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Garage Sale Planner listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health            - Health check");
    println!("  POST /filter            - Filter and order sale listings");
    println!("  POST /route             - Plan a route over chosen sales");
    println!("  POST /favorites/toggle  - Toggle a favorite");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
