//! Favorite management with cache-aside reads and write-then-invalidate.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{Favorite, NewFavorite, ProductSnapshot, UserFavoritesView};
use crate::domain::repositories::FavoriteRepository;
use crate::error::AppError;
use crate::infrastructure::cache::FavoritesCache;

/// Service owning the favorite business rules.
///
/// The repository is the source of truth. The cache holds two derived
/// projections per user, the full [`UserFavoritesView`] and per-product
/// existence flags. Mutations write to the repository first and then delete
/// the affected cache keys; they never update cached values in place.
pub struct FavoriteService<R: FavoriteRepository + ?Sized> {
    repository: Arc<R>,
    cache: FavoritesCache,
}

impl<R: FavoriteRepository + ?Sized> FavoriteService<R> {
    /// Creates a new favorite service.
    pub fn new(repository: Arc<R>, cache: FavoritesCache) -> Self {
        Self { repository, cache }
    }

    /// Adds a product to the user's favorites.
    ///
    /// The existence check only gives a fast, clean rejection; the store's
    /// unique constraint is what actually prevents duplicates, and a violation
    /// reported by the insert surfaces as the same conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user id or product id is blank or
    /// the price is negative.
    /// Returns [`AppError::Conflict`] if the product is already a favorite.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn add_favorite(
        &self,
        user_id: &str,
        product: ProductSnapshot,
    ) -> Result<Favorite, AppError> {
        validate_user_id(user_id)?;
        validate_product(&product)?;

        let product_id = product.product_id.clone();
        debug!(user_id, product_id = %product_id, "Adding favorite");

        if self
            .repository
            .exists_by_user_and_product(user_id, &product_id)
            .await?
        {
            return Err(AppError::duplicate_favorite(user_id, &product_id));
        }

        let favorite = self
            .repository
            .insert(NewFavorite::now(user_id, product))
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => {
                    debug!(user_id, product_id = %product_id, "Insert lost a race");
                    AppError::duplicate_favorite(user_id, &product_id)
                }
                other => other,
            })?;

        self.invalidate(user_id, &product_id).await;

        Ok(favorite)
    }

    /// Removes a product from the user's favorites.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no such favorite; nothing
    /// is modified in that case.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn remove_favorite(&self, user_id: &str, product_id: &str) -> Result<(), AppError> {
        debug!(user_id, product_id, "Removing favorite");

        let deleted = self
            .repository
            .delete_by_user_and_product(user_id, product_id)
            .await?;

        if !deleted {
            return Err(AppError::favorite_not_found(user_id, product_id));
        }

        self.invalidate(user_id, product_id).await;

        Ok(())
    }

    /// Returns all favorites of a user.
    ///
    /// Served from cache when present (a hit does not extend the entry's TTL);
    /// otherwise rebuilt from the store and cached, empty views included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_user_favorites(&self, user_id: &str) -> Result<UserFavoritesView, AppError> {
        let key = self.cache.keys().user_favorites(user_id);

        if let Some(view) = self.cache.get::<UserFavoritesView>(&key).await {
            return Ok(view);
        }

        let favorites = self.repository.find_all_by_user(user_id).await?;
        let view = UserFavoritesView::build(user_id, favorites);

        self.cache.set(&key, &view, self.cache.ttl()).await;

        Ok(view)
    }

    /// Returns whether the product is in the user's favorites.
    ///
    /// Uses the cached existence flag when present, otherwise asks the store
    /// and caches the answer, whether `true` or `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn is_favorite(&self, user_id: &str, product_id: &str) -> Result<bool, AppError> {
        let key = self.cache.keys().favorite_exists(user_id, product_id);

        if let Some(exists) = self.cache.get::<bool>(&key).await {
            return Ok(exists);
        }

        let exists = self
            .repository
            .exists_by_user_and_product(user_id, product_id)
            .await?;

        self.cache.set(&key, &exists, self.cache.ttl()).await;

        Ok(exists)
    }

    /// Counts the user's favorites straight from the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn count_favorites(&self, user_id: &str) -> Result<i64, AppError> {
        self.repository.count_by_user(user_id).await
    }

    /// Deletes all favorites of a user and returns how many were removed.
    ///
    /// The cached view is deleted by its exact key; the existence flags
    /// cannot be enumerated from here and are dropped by a prefix sweep.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn remove_all_favorites(&self, user_id: &str) -> Result<i64, AppError> {
        debug!(user_id, "Removing all favorites");

        let deleted = self.repository.delete_all_by_user(user_id).await?;

        self.evict_user(user_id).await;

        Ok(deleted)
    }

    /// Drops every cached entry of a user without touching the store.
    ///
    /// The view key goes first with a single `delete`, so a sweep that
    /// fails or times out can only leave existence flags behind. Returns
    /// the number of keys removed by the sweep, or `None` if it did not
    /// complete.
    pub async fn evict_user(&self, user_id: &str) -> Option<u64> {
        let keys = self.cache.keys();
        self.cache.delete(&keys.user_favorites(user_id)).await;

        let swept = self.cache.delete_by_prefix(&keys.user_scope(user_id)).await;
        if swept.is_none() {
            warn!(user_id, "User cache sweep incomplete, flags may be stale until TTL");
        }
        swept
    }

    /// Reports store reachability and cache health, in that order.
    pub async fn health(&self) -> (Result<(), AppError>, bool) {
        let store = self.repository.health_check().await;
        let cache = self.cache.health_check().await;
        (store, cache)
    }

    async fn invalidate(&self, user_id: &str, product_id: &str) {
        let keys = self.cache.keys();
        self.cache.delete(&keys.user_favorites(user_id)).await;
        self.cache
            .delete(&keys.favorite_exists(user_id, product_id))
            .await;
    }
}

fn validate_user_id(user_id: &str) -> Result<(), AppError> {
    if user_id.trim().is_empty() {
        return Err(AppError::bad_request(
            "User ID cannot be blank",
            json!({ "field": "user_id" }),
        ));
    }
    Ok(())
}

fn validate_product(product: &ProductSnapshot) -> Result<(), AppError> {
    if product.product_id.trim().is_empty() {
        return Err(AppError::bad_request(
            "Product ID cannot be blank",
            json!({ "field": "product_id" }),
        ));
    }

    if let Some(price) = product.product_price
        && (price.is_nan() || price < 0.0)
    {
        return Err(AppError::bad_request(
            "Product price must be positive or zero",
            json!({ "field": "product_price", "value": price }),
        ));
    }

    Ok(())
}
