//! Repository trait for favorite records.

use crate::domain::entities::{Favorite, NewFavorite};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable store of favorites, the source of truth for the service.
///
/// Implementations must enforce uniqueness of `(user_id, product_id)` on
/// insert (e.g. a unique index) and report a violation as
/// [`AppError::Conflict`], so that concurrent inserts racing past the
/// service's existence check still cannot create a second record.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgFavoriteRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryFavoriteRepository`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Returns whether the user has favorited the product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_by_user_and_product(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<bool, AppError>;

    /// Inserts a favorite and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already has this product.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_favorite: NewFavorite) -> Result<Favorite, AppError>;

    /// Deletes one favorite. Returns `Ok(false)` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_user_and_product(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<bool, AppError>;

    /// Lists all favorites of a user, newest first (ties by id, descending).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_all_by_user(&self, user_id: &str) -> Result<Vec<Favorite>, AppError>;

    /// Deletes every favorite of a user and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_all_by_user(&self, user_id: &str) -> Result<i64, AppError>;

    /// Counts the favorites of a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn health_check(&self) -> Result<(), AppError>;
}
