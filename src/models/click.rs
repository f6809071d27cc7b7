use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse location of a visit. Country/region/city are caller-supplied
/// hints and stored as-is; the address fields are already obfuscated and
/// never contain the raw client IP.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClickGeo {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub ip_prefix: String,
    pub ip_hash: String,
}

/// One recorded visit to a short link.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClickEvent {
    pub ts: DateTime<Utc>,
    pub referrer: Option<String>,
    pub geo: ClickGeo,
}

impl ClickEvent {
    pub fn new(ts: DateTime<Utc>, referrer: Option<String>, geo: ClickGeo) -> Self {
        Self { ts, referrer, geo }
    }
}
