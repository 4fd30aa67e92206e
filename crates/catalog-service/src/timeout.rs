//! Timeout wrapper for async operations.

use catalog_core::CatalogError;
use std::time::Duration;

/// Wraps an async operation with a timeout.
pub async fn with_timeout<F, Fut, T>(duration: Duration, operation: &str, f: F) -> Result<T, CatalogError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, CatalogError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| CatalogError::Timeout(format!("{} timed out after {:?}", operation, duration)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_success() {
        let result = with_timeout(Duration::from_secs(1), "answer", || async {
            Ok::<_, CatalogError>(42)
        })
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_timeout_exceeded() {
        let result = with_timeout(Duration::from_millis(10), "cache GET", || async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, CatalogError>(42)
        })
        .await;

        match result {
            Err(CatalogError::Timeout(message)) => assert!(message.starts_with("cache GET")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> = with_timeout(Duration::from_secs(1), "cache SET", || async {
            Err(CatalogError::CacheWrite("refused".to_string()))
        })
        .await;
        assert!(matches!(result, Err(CatalogError::CacheWrite(_))));
    }
}
