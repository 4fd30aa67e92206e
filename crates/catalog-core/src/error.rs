//! Unified error types for all layers of the catalog service.

use thiserror::Error;

/// Unified error type for the catalog service.
///
/// Variants follow the failure points of the cache-aside read path plus the
/// infrastructure errors raised while starting the process.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Cache Errors ============
    /// Cache backend unreachable or failed to answer a read.
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Cached payload could not be decoded.
    #[error("Cached data is corrupt: {0}")]
    CacheCorrupt(String),

    /// Write-through to the cache failed.
    #[error("Cache write failed: {0}")]
    CacheWrite(String),

    // ============ Store Errors ============
    /// Relational store query or connection failed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A row returned by the store could not be mapped into a product.
    #[error("Row mapping failed: {0}")]
    RowMapping(String),

    // ============ Infrastructure Errors ============
    /// Product list could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CatalogError {
    /// Returns the HTTP status code for this error.
    ///
    /// A store failure maps to 404 for compatibility with existing clients.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::StoreUnavailable(_) => 404,
            Self::CacheUnavailable(_) | Self::Timeout(_) => 503,
            Self::CacheCorrupt(_)
            | Self::CacheWrite(_)
            | Self::RowMapping(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::CacheCorrupt(_) => "CACHE_CORRUPT",
            Self::CacheWrite(_) => "CACHE_WRITE_FAILED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::RowMapping(_) => "ROW_MAPPING_FAILED",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message exposed to HTTP clients.
    ///
    /// Messages are fixed per variant; backend detail stays in the logs.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "Can't get products",
            Self::CacheUnavailable(_) => "Cache unavailable",
            Self::CacheCorrupt(_) => "Cached products are unreadable",
            Self::CacheWrite(_) => "Can't cache products",
            Self::RowMapping(_) => "Can't read products",
            Self::Serialization(_) => "Can't convert products",
            Self::Timeout(_) => "Request timed out",
            Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => "Internal server error",
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Checks if this error comes from the cache tier.
    #[must_use]
    pub const fn is_cache_error(&self) -> bool {
        matches!(
            self,
            Self::CacheUnavailable(_) | Self::CacheCorrupt(_) | Self::CacheWrite(_)
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::TypeNotFound { .. } => Self::RowMapping(err.to_string()),
            _ => Self::StoreUnavailable(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CatalogError::StoreUnavailable("down".to_string()).status_code(), 404);
        assert_eq!(CatalogError::CacheCorrupt("bad json".to_string()).status_code(), 500);
        assert_eq!(CatalogError::CacheWrite("refused".to_string()).status_code(), 500);
        assert_eq!(CatalogError::RowMapping("null".to_string()).status_code(), 500);
        assert_eq!(CatalogError::Serialization("nan".to_string()).status_code(), 500);
        assert_eq!(CatalogError::Timeout("slow".to_string()).status_code(), 503);
        assert_eq!(CatalogError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CatalogError::StoreUnavailable("down".to_string()).error_code(),
            "STORE_UNAVAILABLE"
        );
        assert_eq!(CatalogError::CacheCorrupt("x".to_string()).error_code(), "CACHE_CORRUPT");
        assert_eq!(CatalogError::configuration("x").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(CatalogError::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_public_message_hides_store_details() {
        let err = CatalogError::StoreUnavailable("password authentication failed".to_string());
        assert_eq!(err.public_message(), "Can't get products");

        let err = CatalogError::CacheCorrupt("expected value at line 1".to_string());
        assert_eq!(err.public_message(), "Cached products are unreadable");
    }

    #[test]
    fn test_public_message_hides_backend_details() {
        let errors = [
            CatalogError::CacheUnavailable("redis://10.0.0.7:6379 refused".to_string()),
            CatalogError::CacheWrite("Failed to set key 'Products': READONLY".to_string()),
            CatalogError::Timeout("cache GET timed out after 2s".to_string()),
            CatalogError::Other(anyhow::anyhow!("redis://10.0.0.7:6379 reset")),
        ];

        for err in errors {
            let message = err.public_message();
            assert!(!message.contains("10.0.0.7"), "{}", message);
            assert!(!message.contains("Products"), "{}", message);
        }
        assert_eq!(
            CatalogError::internal("pool exhausted").public_message(),
            "Internal server error"
        );
    }

    #[test]
    fn test_cache_error_classification() {
        assert!(CatalogError::CacheUnavailable("x".to_string()).is_cache_error());
        assert!(CatalogError::CacheWrite("x".to_string()).is_cache_error());
        assert!(!CatalogError::StoreUnavailable("x".to_string()).is_cache_error());
    }

    #[test]
    fn test_json_error_becomes_serialization() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(CatalogError::from(err), CatalogError::Serialization(_)));
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_errors_split_between_mapping_and_availability() {
        let err = CatalogError::from(sqlx::Error::ColumnNotFound("retail_price".to_string()));
        assert!(matches!(err, CatalogError::RowMapping(_)));

        let err = CatalogError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, CatalogError::StoreUnavailable(_)));
    }
}
