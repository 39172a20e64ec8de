//! Connection lifecycle of a repository.

use async_trait::async_trait;

use super::error::RepositoryResult;

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Release the underlying connection. Called once during shutdown.
    async fn close(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
