//! Solution domain types

use serde::{Deserialize, Serialize};

/// Opaque identifier of a submitted solution.
///
/// The backend assigns and owns these; the console never inspects their
/// structure, only echoes them back on status/log/kill requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionId(String);

impl SolutionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SolutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SolutionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Solution lifecycle status
///
/// Monotonic in practice: NEW and COMPILING precede execution, RUNNING is
/// active, the rest are terminal. The console never mutates a status, it
/// only observes snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolutionStatus {
    New,
    Compiling,
    Running,
    Finished,
    Error,
    Killed,
}

impl SolutionStatus {
    /// Whether no further transitions are expected.
    ///
    /// Once a solution is terminal the console must never schedule further
    /// polling for it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Error | Self::Killed)
    }

    /// Presentation bucket for this status.
    pub fn class(&self) -> StatusClass {
        match self {
            Self::New | Self::Compiling => StatusClass::Info,
            Self::Running => StatusClass::Warning,
            Self::Finished => StatusClass::Success,
            Self::Error => StatusClass::Danger,
            Self::Killed => StatusClass::Dark,
        }
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::New => "NEW",
            Self::Compiling => "COMPILING",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
            Self::Error => "ERROR",
            Self::Killed => "KILLED",
        };
        write!(f, "{s}")
    }
}

/// Visual classification of a status, a pure function of [`SolutionStatus`].
///
/// Views decide how each bucket looks; controllers never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Info,
    Warning,
    Success,
    Danger,
    Dark,
}

/// Snapshot of a submitted solution as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub id: SolutionId,
    pub status: SolutionStatus,
    #[serde(default)]
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub started: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub finished: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(!SolutionStatus::New.is_terminal());
        assert!(!SolutionStatus::Compiling.is_terminal());
        assert!(!SolutionStatus::Running.is_terminal());
        assert!(SolutionStatus::Finished.is_terminal());
        assert!(SolutionStatus::Error.is_terminal());
        assert!(SolutionStatus::Killed.is_terminal());
    }

    #[test]
    fn status_classification() {
        assert_eq!(SolutionStatus::New.class(), StatusClass::Info);
        assert_eq!(SolutionStatus::Compiling.class(), StatusClass::Info);
        assert_eq!(SolutionStatus::Running.class(), StatusClass::Warning);
        assert_eq!(SolutionStatus::Finished.class(), StatusClass::Success);
        assert_eq!(SolutionStatus::Error.class(), StatusClass::Danger);
        assert_eq!(SolutionStatus::Killed.class(), StatusClass::Dark);
    }

    #[test]
    fn status_wire_form_is_screaming_snake() {
        let json = serde_json::to_string(&SolutionStatus::Compiling).unwrap();
        assert_eq!(json, "\"COMPILING\"");

        let status: SolutionStatus = serde_json::from_str("\"KILLED\"").unwrap();
        assert_eq!(status, SolutionStatus::Killed);
    }

    #[test]
    fn solution_deserializes_with_absent_timestamps() {
        let solution: Solution =
            serde_json::from_str(r#"{"id":"42","status":"NEW"}"#).unwrap();
        assert_eq!(solution.id, SolutionId::from("42"));
        assert_eq!(solution.status, SolutionStatus::New);
        assert!(solution.created.is_none());
        assert!(solution.started.is_none());
        assert!(solution.finished.is_none());
    }

    #[test]
    fn solution_id_is_transparent_over_numbers_and_strings() {
        // Backends that number their solutions still send the id as a
        // JSON string; the console treats it as opaque either way.
        let id: SolutionId = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(id.as_str(), "17");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"17\"");
    }
}
