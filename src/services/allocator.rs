use std::sync::Arc;

use chrono::{DateTime, Utc};
use url::Url;

use crate::errors::ShortenError;
use crate::models::url::ShortLinkRecord;
use crate::store::{ShortLinkStore, StoreError};
use crate::utils::codegen::CodeGenerator;

/// Collision retries before generation is declared exhausted. Repeated
/// collisions in a 62^7 code space signal generator trouble rather than
/// load, so this is a circuit breaker, not a capacity limit.
pub const MAX_GENERATION_ATTEMPTS: u32 = 5;

/// Record validity when the caller does not supply one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Allocates new short link records against the store, either under a
/// caller-requested code or a generated one.
#[derive(Clone)]
pub struct Allocator {
    store: Arc<dyn ShortLinkStore>,
    generator: Arc<dyn CodeGenerator>,
}

impl Allocator {
    pub fn new(store: Arc<dyn ShortLinkStore>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self { store, generator }
    }

    /// Validate inputs, pick a shortcode and insert the record.
    ///
    /// The store's insert-if-absent is the only uniqueness check; there
    /// is no separate exists probe that could race a concurrent
    /// allocation. The returned record is exactly what was inserted.
    pub fn allocate(
        &self,
        target_url: &str,
        validity_minutes: Option<i64>,
        requested_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ShortLinkRecord, ShortenError> {
        validate_target_url(target_url)?;

        let minutes = match validity_minutes {
            Some(minutes) if minutes > 0 => minutes,
            Some(minutes) => return Err(ShortenError::InvalidValidity(minutes)),
            None => DEFAULT_VALIDITY_MINUTES,
        };

        match requested_code {
            Some(code) => {
                // The HTTP layer validates the format too; re-check here
                // so the service holds its own invariants.
                if !is_valid_shortcode(code) {
                    return Err(ShortenError::InvalidShortcode(code.to_string()));
                }
                let record = ShortLinkRecord::new(
                    code.to_string(),
                    target_url.to_string(),
                    minutes,
                    now,
                );
                match self.store.insert(record.clone()) {
                    Ok(()) => Ok(record),
                    Err(StoreError::AlreadyExists) => {
                        Err(ShortenError::ShortcodeTaken(code.to_string()))
                    }
                    Err(_) => Err(ShortenError::Internal),
                }
            }
            None => {
                for _ in 0..MAX_GENERATION_ATTEMPTS {
                    let code = self.generator.generate();
                    let record =
                        ShortLinkRecord::new(code, target_url.to_string(), minutes, now);
                    match self.store.insert(record.clone()) {
                        Ok(()) => return Ok(record),
                        Err(StoreError::AlreadyExists) => continue,
                        Err(_) => return Err(ShortenError::Internal),
                    }
                }
                Err(ShortenError::GenerationExhausted)
            }
        }
    }
}

/// Shortcodes are 3-32 chars of alphanumerics, dash or underscore.
pub fn is_valid_shortcode(code: &str) -> bool {
    (3..=32).contains(&code.len())
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn validate_target_url(raw: &str) -> Result<(), ShortenError> {
    match Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ShortenError::InvalidUrl(raw.to_string())),
    }
}
