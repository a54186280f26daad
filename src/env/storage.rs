//! `localStorage` / `sessionStorage` stand-in.
//!
//! A plain in-memory string map. Nothing is persisted, and values written
//! during one route stay visible to the routes rendered after it.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct Storage {
    items: FxHashMap<String, String>,
    /// Insertion order, for `key(index)`.
    order: Vec<String>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: &str) {
        if self
            .items
            .insert(key.to_string(), value.to_string())
            .is_none()
        {
            self.order.push(key.to_string());
        }
    }

    pub fn remove_item(&mut self, key: &str) {
        if self.items.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.order.clear();
    }

    pub fn key(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
