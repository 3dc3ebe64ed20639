//! PostgreSQL implementation of the favorite repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Favorite, NewFavorite, ProductSnapshot};
use crate::domain::repositories::FavoriteRepository;
use crate::error::{AppError, FAVORITE_UNIQUE_CONSTRAINT};

const FAVORITE_COLUMNS: &str =
    "id, user_id, product_id, product_name, product_price, product_image_url, category, created_at";

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: i64,
    user_id: String,
    product_id: String,
    product_name: Option<String>,
    product_price: Option<f64>,
    product_image_url: Option<String>,
    category: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(r: FavoriteRow) -> Self {
        Favorite::new(
            r.id,
            r.user_id,
            ProductSnapshot {
                product_id: r.product_id,
                product_name: r.product_name,
                product_price: r.product_price,
                product_image_url: r.product_image_url,
                category: r.category,
            },
            r.created_at,
        )
    }
}

/// PostgreSQL repository for favorites.
///
/// Uniqueness of `(user_id, product_id)` is enforced by the
/// `favorites_user_product_key` constraint.
pub struct PgFavoriteRepository {
    pool: Arc<PgPool>,
}

impl PgFavoriteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn is_duplicate_favorite(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && db_err.constraint() == Some(FAVORITE_UNIQUE_CONSTRAINT)
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    async fn exists_by_user_and_product(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND product_id = $2)",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn insert(&self, new_favorite: NewFavorite) -> Result<Favorite, AppError> {
        let sql = format!(
            r#"
            INSERT INTO favorites
                (user_id, product_id, product_name, product_price, product_image_url, category, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FAVORITE_COLUMNS}
            "#
        );

        let product = &new_favorite.product;
        let row = sqlx::query_as::<_, FavoriteRow>(&sql)
            .bind(&new_favorite.user_id)
            .bind(&product.product_id)
            .bind(&product.product_name)
            .bind(product.product_price)
            .bind(&product.product_image_url)
            .bind(&product.category)
            .bind(new_favorite.created_at)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_duplicate_favorite(&e) {
                    AppError::duplicate_favorite(&new_favorite.user_id, &product.product_id)
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(row.into())
    }

    async fn delete_by_user_and_product(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all_by_user(&self, user_id: &str) -> Result<Vec<Favorite>, AppError> {
        let sql = format!(
            "SELECT {FAVORITE_COLUMNS} FROM favorites WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query_as::<_, FavoriteRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    async fn delete_all_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() as i64)
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
