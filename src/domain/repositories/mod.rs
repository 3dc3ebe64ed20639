//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`FavoriteRepository`] - Favorite storage, lookups and bulk removal
//!
//! # Testing
//!
//! See integration tests in `tests/repository_favorite.rs` for usage examples.

pub mod favorite_repository;

pub use favorite_repository::FavoriteRepository;

#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
