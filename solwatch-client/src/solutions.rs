//! Solution lifecycle endpoints

use crate::ConsoleClient;
use crate::error::Result;
use solwatch_core::domain::solution::{Solution, SolutionId};
use solwatch_core::dto::solution::SubmitRequest;

impl ConsoleClient {
    /// List every solution the backend knows for the given server URL
    ///
    /// # Arguments
    /// * `server_url` - The configured target server URL
    ///
    /// # Returns
    /// The full set of solution snapshots; ordering is backend-owned and
    /// may change between calls.
    pub async fn list(&self, server_url: &str) -> Result<Vec<Solution>> {
        let url = format!("{}/all", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("serverUrl", server_url)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Submit a solution for execution
    ///
    /// Fire-and-forget from the console's perspective: the acknowledgement
    /// carries no correlation id, the new solution shows up in the next
    /// list poll.
    ///
    /// # Arguments
    /// * `repo_url` - The repository holding the solution
    /// * `server_url` - The target server the solution should play against
    pub async fn submit(&self, repo_url: &str, server_url: &str) -> Result<()> {
        let url = format!("{}/check", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&SubmitRequest {
                repo_url: repo_url.to_string(),
                server_url: server_url.to_string(),
            })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Get a status snapshot for a single solution
    ///
    /// # Arguments
    /// * `server_url` - The configured target server URL
    /// * `id` - The solution to inspect
    pub async fn status_of(&self, server_url: &str, id: &SolutionId) -> Result<Solution> {
        let url = format!("{}/summary", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("serverUrl", server_url), ("solutionId", id.as_str())])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Request that a running solution be killed
    ///
    /// Success only means the backend accepted the request; the solution
    /// reaches KILLED asynchronously and a later status snapshot confirms.
    pub async fn kill(&self, server_url: &str, id: &SolutionId) -> Result<()> {
        let url = format!("{}/stop", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("serverUrl", server_url), ("solutionId", id.as_str())])
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
