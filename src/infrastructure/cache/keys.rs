//! Cache key construction.
//!
//! Keys are `<prefix>:<part>:<part>...`. Parts are escaped (`%` → `%25`,
//! `:` → `%3A`) so ids containing the separator cannot produce a key that
//! belongs to another user or product.
//!
//! All keys of one user share [`CacheKeys::user_scope`] as a prefix, which is
//! what clear-all invalidation deletes by.

use std::borrow::Cow;

const SEPARATOR: char = ':';

/// Deterministic key builder bound to a namespace prefix.
#[derive(Debug, Clone)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Joins the prefix and the escaped parts with the separator.
    pub fn build(&self, parts: &[&str]) -> String {
        let mut key = self.prefix.clone();
        for part in parts {
            key.push(SEPARATOR);
            key.push_str(&escape_part(part));
        }
        key
    }

    /// Key of the cached [`crate::domain::entities::UserFavoritesView`].
    pub fn user_favorites(&self, user_id: &str) -> String {
        self.build(&["user", user_id, "favorites"])
    }

    /// Key of the cached existence flag for one product.
    pub fn favorite_exists(&self, user_id: &str, product_id: &str) -> String {
        self.build(&["user", user_id, "exists", product_id])
    }

    /// Common prefix of every key belonging to `user_id`, trailing separator included.
    pub fn user_scope(&self, user_id: &str) -> String {
        let mut scope = self.build(&["user", user_id]);
        scope.push(SEPARATOR);
        scope
    }
}

fn escape_part(part: &str) -> Cow<'_, str> {
    if part.contains(['%', SEPARATOR]) {
        Cow::Owned(part.replace('%', "%25").replace(SEPARATOR, "%3A"))
    } else {
        Cow::Borrowed(part)
    }
}
