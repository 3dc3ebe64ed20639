//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the cache adapter and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::favorite_service::FavoriteService`] - Favorites with cache-aside reads

pub mod services;
