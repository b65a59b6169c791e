//! Log domain types

use serde::{Deserialize, Serialize};

/// Which of a solution's two log streams a tail request targets.
///
/// The backend keeps a build log (image/compile output) and a runtime log
/// per solution; both are tailed with the same offset contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Runtime,
    Build,
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Runtime => write!(f, "runtime"),
            Self::Build => write!(f, "build"),
        }
    }
}
