//! Backend trait seam
//!
//! Controllers talk to the backend through `Arc<dyn SolutionBackend>` so
//! tests can script responses without a network.

use async_trait::async_trait;

use crate::ConsoleClient;
use crate::error::Result;
use solwatch_core::domain::log::LogKind;
use solwatch_core::domain::solution::{Solution, SolutionId};

/// The backend contract the console polls against.
///
/// One method per remote operation; implementations perform no caching or
/// retry, that is the controllers' concern.
#[async_trait]
pub trait SolutionBackend: Send + Sync {
    /// Full solution set for the given server URL.
    async fn list(&self, server_url: &str) -> Result<Vec<Solution>>;

    /// Submit a solution; acknowledgement only.
    async fn submit(&self, repo_url: &str, server_url: &str) -> Result<()>;

    /// Status snapshot for one solution.
    async fn status_of(&self, server_url: &str, id: &SolutionId) -> Result<Solution>;

    /// Log suffix from `from_line`; empty when nothing new.
    async fn log_tail(
        &self,
        server_url: &str,
        id: &SolutionId,
        kind: LogKind,
        from_line: usize,
    ) -> Result<Vec<String>>;

    /// Request a kill; accepted, not confirmed.
    async fn kill(&self, server_url: &str, id: &SolutionId) -> Result<()>;
}

#[async_trait]
impl SolutionBackend for ConsoleClient {
    async fn list(&self, server_url: &str) -> Result<Vec<Solution>> {
        ConsoleClient::list(self, server_url).await
    }

    async fn submit(&self, repo_url: &str, server_url: &str) -> Result<()> {
        ConsoleClient::submit(self, repo_url, server_url).await
    }

    async fn status_of(&self, server_url: &str, id: &SolutionId) -> Result<Solution> {
        ConsoleClient::status_of(self, server_url, id).await
    }

    async fn log_tail(
        &self,
        server_url: &str,
        id: &SolutionId,
        kind: LogKind,
        from_line: usize,
    ) -> Result<Vec<String>> {
        ConsoleClient::log_tail(self, server_url, id, kind, from_line).await
    }

    async fn kill(&self, server_url: &str, id: &SolutionId) -> Result<()> {
        ConsoleClient::kill(self, server_url, id).await
    }
}
