//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::FavoriteService;
use crate::domain::repositories::FavoriteRepository;
use crate::infrastructure::cache::FavoritesCache;

/// The favorites service over whichever store backend was selected at startup.
pub type SharedFavoriteService = Arc<FavoriteService<dyn FavoriteRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub favorite_service: SharedFavoriteService,
}

impl AppState {
    pub fn new(repository: Arc<dyn FavoriteRepository>, cache: FavoritesCache) -> Self {
        Self {
            favorite_service: Arc::new(FavoriteService::new(repository, cache)),
        }
    }
}
