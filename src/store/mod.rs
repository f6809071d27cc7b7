pub mod memory;

use std::fmt;

use crate::models::click::ClickEvent;
use crate::models::url::ShortLinkRecord;

/// Storage interface for short link records.
///
/// `insert` is the single linearization point for shortcode uniqueness:
/// implementations must insert-if-absent in one atomic step rather than
/// expose a separate check-then-set sequence. `append_click` must
/// serialize concurrent appends to the same record so no click is lost
/// or partially visible.
pub trait ShortLinkStore: Send + Sync {
    fn exists(&self, code: &str) -> bool;

    fn get(&self, code: &str) -> Option<ShortLinkRecord>;

    /// Insert a new record, rejecting the call if its shortcode is
    /// already present.
    fn insert(&self, record: ShortLinkRecord) -> Result<(), StoreError>;

    /// Append one click to an existing record's history.
    fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    AlreadyExists,
    NotFound,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::AlreadyExists => write!(f, "shortcode already exists"),
            StoreError::NotFound => write!(f, "shortcode not found"),
        }
    }
}

impl std::error::Error for StoreError {}
