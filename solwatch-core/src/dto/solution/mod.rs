//! Solution DTOs

use serde::{Deserialize, Serialize};

/// Body of a solution submission (`POST /check`).
///
/// Both configured endpoint identifiers travel with the request; the
/// backend clones the repository and runs it against the target server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub repo_url: String,
    pub server_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_uses_camel_case_wire_names() {
        let req = SubmitRequest {
            repo_url: "https://github.com/user/bot.git".to_string(),
            server_url: "https://game.example.com/p1".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["repoUrl"], "https://github.com/user/bot.git");
        assert_eq!(json["serverUrl"], "https://game.example.com/p1");
    }
}
