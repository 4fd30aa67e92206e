//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with a Redis implementation.
//! Reads are folded into [`CacheLookup`] so callers only see hit or miss;
//! backend failures are reported through logs and metrics instead.

mod cache_interface;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface, CacheLookup};
pub use redis_cache::{RedisCacheService, DEFAULT_OPERATION_TIMEOUT};
