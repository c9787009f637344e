use revassign_review_models::ErrorCode;
use revassign_store::StoreError;

/// Errors returned by `ReviewService` operations.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Team not found.
    #[error("Team not found: {0}")]
    TeamNotFound(String),

    /// Pull request not found.
    #[error("Pull request not found: {0}")]
    PrNotFound(String),

    /// Team name already registered.
    #[error("Team already exists: {0}")]
    TeamExists(String),

    /// User id already registered.
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Pull request id already in use.
    #[error("Pull request already exists: {0}")]
    PrExists(String),

    /// Merged pull requests cannot be changed.
    #[error("Cannot reassign on merged pull request {0}")]
    PrMerged(String),

    /// The user is not a reviewer of the pull request.
    #[error("Reviewer {user_id} is not assigned to pull request {pull_request_id}")]
    NotAssigned {
        pull_request_id: String,
        user_id: String,
    },

    /// Nobody can take over the review. The departing reviewer stays removed.
    #[error("No active replacement candidate in team {team_name} for pull request {pull_request_id}")]
    NoCandidate {
        pull_request_id: String,
        team_name: String,
    },

    /// Backend failure.
    #[error("Storage error: {0}")]
    Storage(#[source] StoreError),
}

impl ReviewError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UserNotFound(_) | Self::TeamNotFound(_) | Self::PrNotFound(_) => {
                ErrorCode::NotFound
            }
            Self::TeamExists(_) => ErrorCode::TeamExists,
            Self::UserExists(_) => ErrorCode::UserExists,
            Self::PrExists(_) => ErrorCode::PrExists,
            Self::PrMerged(_) => ErrorCode::PrMerged,
            Self::NotAssigned { .. } => ErrorCode::NotAssigned,
            Self::NoCandidate { .. } => ErrorCode::NoCandidate,
            Self::Storage(_) => ErrorCode::Internal,
        }
    }
}

impl From<StoreError> for ReviewError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UserNotFound(id) => Self::UserNotFound(id),
            StoreError::TeamNotFound(name) => Self::TeamNotFound(name),
            StoreError::PrNotFound(id) => Self::PrNotFound(id),
            StoreError::TeamExists(name) => Self::TeamExists(name),
            StoreError::UserExists(id) => Self::UserExists(id),
            StoreError::PrExists(id) => Self::PrExists(id),
            other => {
                log::error!("Storage failure: {other}");
                Self::Storage(other)
            }
        }
    }
}
