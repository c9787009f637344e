use serde::{Deserialize, Serialize};

/// Machine-readable error codes shared by the service and its clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    TeamExists,
    UserExists,
    PrExists,
    PrMerged,
    NotAssigned,
    NoCandidate,
    InvalidRequest,
    MethodNotAllowed,
    Internal,
}

/// A reviewer swapped out by a deactivation cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reassignment {
    pub pull_request_id: String,
    pub old_reviewer: String,
    pub new_reviewer: String,
}

/// A step of a deactivation cascade that did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeFailure {
    /// `None` when the user's open reviews could not be listed at all.
    pub pull_request_id: Option<String>,
    pub user_id: String,
    pub code: ErrorCode,
    pub message: String,
}

/// Outcome of deactivating a user or a whole team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub reassigned: Vec<Reassignment>,
    pub failed: Vec<CascadeFailure>,
    /// Users whose active flag was cleared.
    pub deactivated: Vec<String>,
}

impl CascadeReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
