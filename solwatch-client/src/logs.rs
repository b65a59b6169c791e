//! Log tailing endpoints

use crate::ConsoleClient;
use crate::error::Result;
use solwatch_core::domain::log::LogKind;
use solwatch_core::domain::solution::SolutionId;

impl ConsoleClient {
    /// Fetch new log lines for a solution, starting at a line offset
    ///
    /// The backend returns exactly the suffix from `from_line` to the
    /// current end of the stream, with no gaps or duplicates, and an empty
    /// list when nothing new has been produced.
    ///
    /// # Arguments
    /// * `server_url` - The configured target server URL
    /// * `id` - The solution whose log to tail
    /// * `kind` - Runtime or build stream
    /// * `from_line` - Count of lines the caller already holds
    pub async fn log_tail(
        &self,
        server_url: &str,
        id: &SolutionId,
        kind: LogKind,
        from_line: usize,
    ) -> Result<Vec<String>> {
        let path = match kind {
            LogKind::Runtime => "runtime_logs",
            LogKind::Build => "build_logs",
        };
        let url = format!("{}/{}", self.base_url, path);
        let from_line = from_line.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("serverUrl", server_url),
                ("solutionId", id.as_str()),
                ("startFromLine", from_line.as_str()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
