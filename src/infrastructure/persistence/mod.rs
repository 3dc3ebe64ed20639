//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgFavoriteRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryFavoriteRepository`] - Process-local storage for development and tests

pub mod memory_favorite_repository;
pub mod pg_favorite_repository;

pub use memory_favorite_repository::InMemoryFavoriteRepository;
pub use pg_favorite_repository::PgFavoriteRepository;
