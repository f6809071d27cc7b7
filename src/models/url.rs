use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::click::ClickEvent;

/// A shortcode -> target URL mapping with its click history.
///
/// Everything but `clicks` is immutable after insertion; clicks are
/// append-only. Records are never deleted, they only lapse once the
/// current time passes `expiry_at`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShortLinkRecord {
    pub shortcode: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry_at: DateTime<Utc>,
    #[serde(default)]
    pub clicks: Vec<ClickEvent>,
}

impl ShortLinkRecord {
    pub fn new(
        shortcode: String,
        target_url: String,
        validity_minutes: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            shortcode,
            target_url,
            created_at: now,
            expiry_at: now + Duration::minutes(validity_minutes),
            clicks: Vec::new(),
        }
    }

    /// A record is expired once `now` is strictly past `expiry_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_at
    }
}
