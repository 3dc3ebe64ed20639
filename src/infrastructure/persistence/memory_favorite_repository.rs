//! In-memory implementation of the favorite repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::domain::entities::{Favorite, NewFavorite};
use crate::domain::repositories::FavoriteRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    // (user_id, product_id) -> favorite
    rows: BTreeMap<(String, String), Favorite>,
}

/// Process-local favorite store.
///
/// Check-and-insert happens under one lock, so the uniqueness guarantee
/// matches the unique index of the PostgreSQL store. Data is lost on restart.
///
/// # Use Cases
///
/// - Running the service locally without PostgreSQL
/// - HTTP-level integration tests
#[derive(Default)]
pub struct InMemoryFavoriteRepository {
    inner: Mutex<Inner>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn exists_by_user_and_product(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<bool, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .contains_key(&(user_id.to_string(), product_id.to_string())))
    }

    async fn insert(&self, new_favorite: NewFavorite) -> Result<Favorite, AppError> {
        let mut inner = self.inner.lock().await;
        let key = (
            new_favorite.user_id.clone(),
            new_favorite.product.product_id.clone(),
        );

        if inner.rows.contains_key(&key) {
            return Err(AppError::duplicate_favorite(&key.0, &key.1));
        }

        inner.next_id += 1;
        let favorite = Favorite::new(
            inner.next_id,
            new_favorite.user_id,
            new_favorite.product,
            new_favorite.created_at,
        );
        inner.rows.insert(key, favorite.clone());

        Ok(favorite)
    }

    async fn delete_by_user_and_product(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().await;
        Ok(inner
            .rows
            .remove(&(user_id.to_string(), product_id.to_string()))
            .is_some())
    }

    async fn find_all_by_user(&self, user_id: &str) -> Result<Vec<Favorite>, AppError> {
        let inner = self.inner.lock().await;
        let mut favorites: Vec<Favorite> = inner
            .rows
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();

        favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(favorites)
    }

    async fn delete_all_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        let mut inner = self.inner.lock().await;
        let before = inner.rows.len();
        inner.rows.retain(|(owner, _), _| owner != user_id);
        Ok((before - inner.rows.len()) as i64)
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.keys().filter(|(owner, _)| owner == user_id).count() as i64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
