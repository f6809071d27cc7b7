use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{ShortLinkStore, StoreError};
use crate::models::click::ClickEvent;
use crate::models::url::ShortLinkRecord;

/// In-memory store backed by a sharded concurrent map.
///
/// The entry API gives insert-if-absent in one step, and `get_mut`
/// holds the shard's write lock for the duration of a click append, so
/// both store invariants come straight from the map.
#[derive(Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, ShortLinkRecord>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
        }
    }
}

impl ShortLinkStore for MemoryLinkStore {
    fn exists(&self, code: &str) -> bool {
        self.links.contains_key(code)
    }

    fn get(&self, code: &str) -> Option<ShortLinkRecord> {
        self.links.get(code).map(|entry| entry.value().clone())
    }

    fn insert(&self, record: ShortLinkRecord) -> Result<(), StoreError> {
        match self.links.entry(record.shortcode.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), StoreError> {
        match self.links.get_mut(code) {
            Some(mut entry) => {
                entry.clicks.push(click);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}
