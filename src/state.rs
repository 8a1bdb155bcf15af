use std::sync::Arc;

use crate::application::services::{ResolverService, ResolverSettings};
use crate::domain::repositories::GeoLookup;
use crate::infrastructure::cache::CacheService;

/// Shared handles injected into every handler.
///
/// Built once at startup; nothing here is reached through global state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ResolverService>,
    pub geo: Arc<dyn GeoLookup>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        geo: Arc<dyn GeoLookup>,
        cache: Arc<dyn CacheService>,
        settings: ResolverSettings,
    ) -> Self {
        let resolver = ResolverService::new(geo.clone(), cache.clone(), settings);
        Self {
            resolver: Arc::new(resolver),
            geo,
            cache,
        }
    }
}
