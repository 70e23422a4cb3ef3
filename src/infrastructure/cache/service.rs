//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::ReportRow;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching fetched report rows per query.
///
/// Only the raw rows are cached. The table model depends on "today" and is
/// rebuilt on every request.
///
/// Implementations must be thread-safe and fail open: a broken cache degrades
/// to repository lookups instead of failing the report.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves cached rows for a query key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(rows))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get_rows(&self, key: &str) -> CacheResult<Option<Vec<ReportRow>>>;

    /// Stores rows under a query key with optional TTL.
    ///
    /// # Arguments
    ///
    /// - `key` - Query cache key (see [`crate::domain::repositories::ReportQuery::cache_key`])
    /// - `rows` - Rows in the order returned by the repository
    /// - `ttl_seconds` - Optional TTL in seconds (implementation-specific default if None)
    async fn set_rows(&self, key: &str, rows: &[ReportRow], ttl_seconds: Option<u64>)
    -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
