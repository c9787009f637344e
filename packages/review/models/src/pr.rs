use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of reviewers assigned to a single pull request.
pub const MAX_REVIEWERS: usize = 2;

/// Lifecycle state of a pull request. `Merged` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrStatus {
    Open,
    Merged,
}

impl fmt::Display for PrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("OPEN"),
            Self::Merged => f.write_str("MERGED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
    /// Reviewer ids. Never contains the author, never contains duplicates.
    pub assigned_reviewers: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Create an open pull request.
    #[must_use]
    pub fn open(
        pull_request_id: String,
        pull_request_name: String,
        author_id: String,
        assigned_reviewers: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pull_request_id,
            pull_request_name,
            author_id,
            status: PrStatus::Open,
            assigned_reviewers,
            created_at,
            merged_at: None,
        }
    }

    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.status == PrStatus::Merged
    }

    #[must_use]
    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.assigned_reviewers.iter().any(|r| r == user_id)
    }

    /// Transition to `Merged`, stamping `merged_at`.
    ///
    /// Returns `false` without touching the timestamp if the pull request
    /// was already merged.
    pub fn merge(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_merged() {
            return false;
        }
        self.status = PrStatus::Merged;
        self.merged_at = Some(at);
        true
    }

    /// Remove a reviewer by value. Returns whether it was present.
    pub fn remove_reviewer(&mut self, user_id: &str) -> bool {
        let before = self.assigned_reviewers.len();
        self.assigned_reviewers.retain(|r| r != user_id);
        self.assigned_reviewers.len() != before
    }

    /// Add a reviewer unless it is the author, already assigned, or the
    /// reviewer set is full. Returns whether it was added.
    pub fn add_reviewer(&mut self, user_id: String) -> bool {
        if user_id == self.author_id
            || self.has_reviewer(&user_id)
            || self.assigned_reviewers.len() >= MAX_REVIEWERS
        {
            return false;
        }
        self.assigned_reviewers.push(user_id);
        true
    }

    #[must_use]
    pub fn to_short(&self) -> PullRequestShort {
        PullRequestShort {
            pull_request_id: self.pull_request_id.clone(),
            pull_request_name: self.pull_request_name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }
}

/// Summary view of a pull request, as returned by reviewer lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PullRequest {
        PullRequest::open(
            "pr-1".to_string(),
            "Add feature".to_string(),
            "author".to_string(),
            vec!["r1".to_string(), "r2".to_string()],
            Utc::now(),
        )
    }

    #[test]
    fn test_merge_sets_timestamp_once() {
        let mut pr = sample();
        let first = Utc::now();

        assert!(pr.merge(first));
        assert!(!pr.merge(first + chrono::Duration::seconds(5)));

        assert_eq!(pr.status, PrStatus::Merged);
        assert_eq!(pr.merged_at, Some(first));
    }

    #[test]
    fn test_remove_reviewer_by_value() {
        let mut pr = sample();

        assert!(pr.remove_reviewer("r1"));
        assert!(!pr.remove_reviewer("r1"));
        assert_eq!(pr.assigned_reviewers, vec!["r2".to_string()]);
    }

    #[test]
    fn test_add_reviewer_rejects_author_duplicate_and_overflow() {
        let mut pr = sample();

        assert!(!pr.add_reviewer("r3".to_string()));

        pr.remove_reviewer("r2");
        assert!(!pr.add_reviewer("author".to_string()));
        assert!(!pr.add_reviewer("r1".to_string()));
        assert!(pr.add_reviewer("r3".to_string()));
        assert_eq!(
            pr.assigned_reviewers,
            vec!["r1".to_string(), "r3".to_string()]
        );
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&PrStatus::Open).unwrap(), "\"OPEN\"");
        assert_eq!(
            serde_json::to_string(&PrStatus::Merged).unwrap(),
            "\"MERGED\""
        );
        assert_eq!(PrStatus::Merged.to_string(), "MERGED");
    }
}
