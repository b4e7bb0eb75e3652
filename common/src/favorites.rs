//! Favorites store
//!
//! Ordered set of item ids. Every toggle flushes the full list to the
//! key-value store as a JSON array.

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::types::CanonicalItem;
use std::collections::HashSet;

/// Storage key for the favorites list
pub const FAVORITES_KEY: &str = "microbiobase-favs";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteStore {
    /// Insertion order
    order: Vec<String>,
    members: HashSet<String>,
}

impl FavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of ids; repeated ids keep their first position
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for id in ids {
            store.insert(id.into());
        }
        store
    }

    /// Load the persisted list; missing or malformed data loads as empty
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(e) => {
                tracing::warn!(error = %e, "favorites unreadable, starting empty");
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => Self::from_ids(ids),
            Err(e) => {
                tracing::warn!(error = %e, "favorites list malformed, starting empty");
                Self::new()
            }
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Flip membership and persist; returns true when the id is now a favorite.
    /// A re-added id moves to the end of the list.
    /// Nothing changes in memory unless the write succeeds.
    pub fn toggle(&mut self, id: &str, store: &mut dyn KeyValueStore) -> Result<bool> {
        let mut next = self.clone();
        let now_favorite = if next.members.remove(id) {
            next.order.retain(|existing| existing != id);
            false
        } else {
            next.insert(id.to_string());
            true
        };

        next.persist(store)?;
        *self = next;
        tracing::debug!(id, now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    /// Write the full list under `FAVORITES_KEY`
    pub fn persist(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.order)?;
        store.set(FAVORITES_KEY, &json)
    }

    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Favorited items in dataset order
    pub fn select<'a>(&self, items: &'a [CanonicalItem]) -> Vec<&'a CanonicalItem> {
        items.iter().filter(|item| self.is_favorite(&item.id)).collect()
    }

    fn insert(&mut self, id: String) {
        if self.members.insert(id.clone()) {
            self.order.push(id);
        }
    }
}
