//! Error types for the Path Finder domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Path Finder operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Reference data errors ---
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Reference data failures. A missing or unreadable catalog file is fatal
/// at startup; the advisor cannot present a meaningful profile without it.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Reference dataset missing: {path}")]
    Missing { path: PathBuf },

    #[error("Failed to read reference dataset {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse reference dataset {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn catalog_error_names_the_file() {
        let err = Error::Catalog(CatalogError::Missing {
            path: PathBuf::from("/data/examination_regulations.json"),
        });
        assert!(err.to_string().contains("examination_regulations.json"));
    }

    #[test]
    fn not_configured_error_is_descriptive() {
        let err = ProviderError::NotConfigured("no API key set".into());
        assert!(err.to_string().contains("no API key"));
    }
}
