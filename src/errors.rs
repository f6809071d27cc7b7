use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

/// Typed outcomes of the shortening core.
///
/// Every variant except `Internal` is an expected, recoverable condition
/// surfaced to the caller as a normal result. `Internal` covers the
/// genuinely exceptional and must never leave a half-written record
/// behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenError {
    InvalidUrl(String),
    InvalidValidity(i64),
    InvalidShortcode(String),
    ShortcodeTaken(String),
    GenerationExhausted,
    NotFound(String),
    Expired(String),
    Internal,
}

impl ShortenError {
    /// Stable machine-readable code used in error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ShortenError::InvalidUrl(_) => "INVALID_URL",
            ShortenError::InvalidValidity(_) => "INVALID_VALIDITY",
            ShortenError::InvalidShortcode(_) => "INVALID_SHORTCODE",
            ShortenError::ShortcodeTaken(_) => "SHORTCODE_TAKEN",
            ShortenError::GenerationExhausted => "GENERATION_FAILURE",
            ShortenError::NotFound(_) => "NOT_FOUND",
            ShortenError::Expired(_) => "EXPIRED",
            ShortenError::Internal => "INTERNAL_ERROR",
        }
    }

    /// Human-readable message for error payloads.
    pub fn message(&self) -> &'static str {
        match self {
            ShortenError::InvalidUrl(_) => "Provide a valid http(s) URL.",
            ShortenError::InvalidValidity(_) => "validity must be a positive integer (minutes).",
            ShortenError::InvalidShortcode(_) => {
                "Shortcode must be 3-32 chars, alphanumeric, dash or underscore."
            }
            ShortenError::ShortcodeTaken(_) => "Provided shortcode already exists.",
            ShortenError::GenerationExhausted => "Unable to allocate unique shortcode.",
            ShortenError::NotFound(_) => "Shortcode does not exist.",
            ShortenError::Expired(_) => "The short link has expired.",
            ShortenError::Internal => "Something went wrong.",
        }
    }
}

impl fmt::Display for ShortenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortenError::InvalidUrl(url) => write!(f, "invalid target URL: {}", url),
            ShortenError::InvalidValidity(minutes) => write!(f, "invalid validity: {}", minutes),
            ShortenError::InvalidShortcode(code) => write!(f, "invalid shortcode format: {}", code),
            ShortenError::ShortcodeTaken(code) => write!(f, "shortcode already taken: {}", code),
            ShortenError::GenerationExhausted => write!(f, "unable to allocate a unique shortcode"),
            ShortenError::NotFound(code) => write!(f, "unknown shortcode: {}", code),
            ShortenError::Expired(code) => write!(f, "short link expired: {}", code),
            ShortenError::Internal => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for ShortenError {}

impl ResponseError for ShortenError {
    fn status_code(&self) -> StatusCode {
        match self {
            ShortenError::InvalidUrl(_)
            | ShortenError::InvalidValidity(_)
            | ShortenError::InvalidShortcode(_) => StatusCode::BAD_REQUEST,
            ShortenError::ShortcodeTaken(_) => StatusCode::CONFLICT,
            ShortenError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortenError::Expired(_) => StatusCode::GONE,
            ShortenError::GenerationExhausted | ShortenError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.code(),
            "message": self.message(),
        }))
    }
}
