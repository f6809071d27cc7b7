use std::sync::Arc;

use crate::services::allocator::Allocator;
use crate::store::ShortLinkStore;

/// Shared per-worker application state.
pub struct AppState {
    pub store: Arc<dyn ShortLinkStore>,
    pub allocator: Allocator,
    pub base_url: String,
    pub ip_salt: String,
}
