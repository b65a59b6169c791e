//! Solwatch HTTP Client
//!
//! A typed HTTP client for the client-runner backend that executes
//! submitted solutions.
//!
//! The backend exposes a small query-parameter API; the target server URL
//! accompanies every request rather than being part of the client, because
//! the backend scopes solutions per (player, server) pair.
//!
//! # Example
//!
//! ```no_run
//! use solwatch_client::ConsoleClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), solwatch_client::ClientError> {
//!     let client = ConsoleClient::new("http://localhost:8080");
//!
//!     let solutions = client.list("https://game.example.com/p1").await?;
//!     println!("{} solution(s)", solutions.len());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
mod logs;
mod solutions;

// Re-export commonly used types
pub use backend::SolutionBackend;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the client-runner backend
///
/// Provides methods for the full backend contract:
/// - Solution listing and status snapshots
/// - Submission (fire-and-forget)
/// - Offset-based log tailing (runtime and build streams)
/// - Kill requests
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    /// Base URL of the backend (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ConsoleClient {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the client-runner backend
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// Allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!("backend returned {status}: {error_text}");
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that carries no useful body (acknowledgements)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!("backend returned {status}: {error_text}");
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ConsoleClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ConsoleClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = ConsoleClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
