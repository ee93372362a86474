//! Application state for the web layer.

use std::sync::Arc;

use crate::route::RouteConfig;
use crate::store::{CachedListingSource, InMemoryFavorites};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Listing source with caching and degraded-mode fallback
    pub listings: Arc<CachedListingSource>,

    /// In-process favorites store
    pub favorites: Arc<InMemoryFavorites>,

    /// Route planning configuration
    pub route_config: Arc<RouteConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        listings: CachedListingSource,
        favorites: InMemoryFavorites,
        route_config: RouteConfig,
    ) -> Self {
        Self {
            listings: Arc::new(listings),
            favorites: Arc::new(favorites),
            route_config: Arc::new(route_config),
        }
    }
}
