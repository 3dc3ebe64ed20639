#![allow(dead_code)]

use axum::Router;
use favorites_service::api::routes::{favorites_routes, health_routes};
use favorites_service::infrastructure::cache::{
    CacheService, CacheSettings, FavoritesCache, MemoryCache,
};
use favorites_service::infrastructure::persistence::InMemoryFavoriteRepository;
use favorites_service::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub fn test_cache_settings() -> CacheSettings {
    CacheSettings {
        key_prefix: "test".to_string(),
        ttl: Duration::from_secs(60),
        op_timeout: Duration::from_millis(100),
        sweep_timeout: Duration::from_millis(100),
    }
}

/// State over the in-memory store and the given raw cache backend.
pub fn create_test_state_with_cache(store: Arc<dyn CacheService>) -> AppState {
    let repository = Arc::new(InMemoryFavoriteRepository::new());
    AppState::new(repository, FavoritesCache::new(store, test_cache_settings()))
}

/// State over the in-memory store and an in-process cache; the cache is
/// returned so tests can inspect what was written to it.
pub fn create_test_state() -> (AppState, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new());
    (create_test_state_with_cache(cache.clone()), cache)
}

/// Router with every public route, as mounted by the server.
pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .nest("/favorites", favorites_routes())
        .with_state(state)
}
