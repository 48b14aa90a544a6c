//! Media library: reusable assets, insertion-ordered.
//!
//! Items are independent of timeline placement; removing one never touches
//! clips already created from it.

use indexmap::IndexMap;
use log::debug;

use crate::entities::{ClipKind, MediaItem};

#[derive(Debug, Default)]
pub struct MediaLibrary {
    items: IndexMap<String, MediaItem>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item; returns its id. Re-adding the same id replaces in place
    /// without changing display order.
    pub fn add(&mut self, item: MediaItem) -> String {
        let id = item.id.clone();
        self.items.insert(id.clone(), item);
        id
    }

    /// Remove by id, returning the item when present.
    pub fn remove(&mut self, item_id: &str) -> Option<MediaItem> {
        // shift_remove keeps the remaining display order intact.
        let removed = self.items.shift_remove(item_id);
        if removed.is_none() {
            debug!("library remove: unknown item '{}'", item_id);
        }
        removed
    }

    pub fn get(&self, item_id: &str) -> Option<&MediaItem> {
        self.items.get(item_id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.values()
    }

    /// Case-insensitive name search with an optional kind filter. An empty
    /// query matches everything of the requested kind.
    pub fn search(&self, query: &str, kind: Option<ClipKind>) -> Vec<&MediaItem> {
        let needle = query.to_lowercase();
        self.items
            .values()
            .filter(|item| kind.is_none_or(|k| item.kind == k))
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
