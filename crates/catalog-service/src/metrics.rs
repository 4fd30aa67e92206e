//! Metrics for the product cache.
//!
//! Absent keys and backend failures both read as a miss on the fetch path;
//! these counters are where the two are told apart.

use ::metrics::{counter, describe_counter};

/// Metric names for the product cache.
pub mod names {
    /// Cache lookups answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "catalog_cache_hits_total";
    /// Cache lookups that fell through to the store.
    pub const CACHE_MISSES_TOTAL: &str = "catalog_cache_misses_total";
    /// Cache backend errors, by operation.
    pub const CACHE_ERRORS_TOTAL: &str = "catalog_cache_errors_total";
    /// Write-through attempts that failed.
    pub const CACHE_WRITE_FAILURES_TOTAL: &str = "catalog_cache_write_failures_total";
    /// Store queries issued after a miss, by outcome.
    pub const STORE_QUERIES_TOTAL: &str = "catalog_store_queries_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_HITS_TOTAL,
        "Total number of product list lookups served from the cache"
    );
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total number of product list lookups that missed the cache"
    );
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Total number of cache backend errors"
    );
    describe_counter!(
        names::CACHE_WRITE_FAILURES_TOTAL,
        "Total number of failed write-through attempts"
    );
    describe_counter!(
        names::STORE_QUERIES_TOTAL,
        "Total number of product store queries"
    );
}

/// Why a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// The key was not present.
    Absent,
    /// The backend failed or timed out.
    Error,
    /// Caching is switched off.
    Disabled,
}

impl MissReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Error => "error",
            Self::Disabled => "disabled",
        }
    }
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a cache hit.
    pub fn hit(key: &str) {
        counter!(names::CACHE_HITS_TOTAL, "key" => key.to_string()).increment(1);
    }

    /// Record a cache miss.
    pub fn miss(key: &str, reason: MissReason) {
        counter!(
            names::CACHE_MISSES_TOTAL,
            "key" => key.to_string(),
            "reason" => reason.as_str()
        )
        .increment(1);
    }

    /// Record a cache backend error.
    pub fn error(operation: &'static str, error_code: &'static str) {
        counter!(
            names::CACHE_ERRORS_TOTAL,
            "operation" => operation,
            "error_code" => error_code
        )
        .increment(1);
    }

    /// Record a failed write-through.
    pub fn write_failed(key: &str) {
        counter!(names::CACHE_WRITE_FAILURES_TOTAL, "key" => key.to_string()).increment(1);
    }

    /// Record a store query outcome.
    pub fn store_query(success: bool) {
        let outcome = if success { "success" } else { "failure" };
        counter!(names::STORE_QUERIES_TOTAL, "outcome" => outcome).increment(1);
    }
}
