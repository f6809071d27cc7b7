use sha2::{Digest, Sha256};

/// Obfuscated view of a client address: a salted one-way hash plus a
/// coarsened network prefix. The raw address never leaves this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpObfuscation {
    pub ip_hash: String,
    pub ip_prefix: String,
}

/// Hex characters kept from the salted digest.
const HASH_LEN: usize = 16;

/// Hash an IP address for privacy and coarsen it to a network prefix.
///
/// The salt prevents rainbow-table reversal of the truncated digest.
/// This path must never block click recording, so unusable input
/// degrades to the `"na"` / `"unknown"` placeholders instead of failing.
pub fn obfuscate_ip(ip: &str, salt: &str) -> IpObfuscation {
    if ip.is_empty() {
        return IpObfuscation {
            ip_hash: "na".to_string(),
            ip_prefix: "unknown".to_string(),
        };
    }

    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hasher.update(salt.as_bytes());
    let mut ip_hash = format!("{:x}", hasher.finalize());
    ip_hash.truncate(HASH_LEN);

    let ip_prefix = if ip.contains('.') {
        // Dotted-decimal: keep the first two octets.
        let mut octets = ip.split('.');
        let a = octets.next().unwrap_or_default();
        let b = octets.next().unwrap_or_default();
        format!("{}.{}.x.x", a, b)
    } else if ip.contains(':') {
        // Colon-delimited: keep the leading segment.
        let first = ip.split(':').next().unwrap_or_default();
        format!("{}::/64", first)
    } else {
        "unknown".to_string()
    };

    IpObfuscation { ip_hash, ip_prefix }
}
