//! Collaborator traits the review service reads from and writes to.

use async_trait::async_trait;

use revassign_review_models::{
    AssignmentStat, PrStatus, PullRequest, PullRequestShort, Team, User,
};

/// Errors that can occur when using a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
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

    /// Failed to read or write the backing file.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse stored data.
    #[error("Failed to parse stored data: {0}")]
    Parse(serde_json::Error),

    /// Failed to serialize data.
    #[error("Failed to serialize data: {0}")]
    Serialize(serde_json::Error),

    /// Could not determine data directory.
    #[error("Could not determine data directory")]
    NoDataDir,
}

impl StoreError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::TeamNotFound(_) | Self::PrNotFound(_)
        )
    }

    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(
            self,
            Self::TeamExists(_) | Self::UserExists(_) | Self::PrExists(_)
        )
    }
}

/// Durable store of teams and users.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Register a team together with its members.
    ///
    /// # Errors
    ///
    /// * `StoreError::TeamExists` if the team name is taken
    /// * `StoreError::UserExists` if any member id is already registered
    async fn add_team(&self, team: Team) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::TeamNotFound` if no team has this name.
    async fn get_team(&self, team_name: &str) -> Result<Team, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if no user has this id.
    async fn get_user(&self, user_id: &str) -> Result<User, StoreError>;

    /// Members of a team in registration order. Unknown teams yield an empty
    /// list.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend fails.
    async fn get_users_by_team(&self, team_name: &str) -> Result<Vec<User>, StoreError>;

    /// Set a user's active flag and return the updated user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if no user has this id.
    async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User, StoreError>;

    /// Mark every member of a team inactive in one step, returning the ids
    /// of all members.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TeamNotFound` if no team has this name.
    async fn deactivate_team(&self, team_name: &str) -> Result<Vec<String>, StoreError>;
}

/// Durable store of pull requests keyed by id.
#[async_trait]
pub trait PullRequestStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError::PrNotFound` if no pull request has this id.
    async fn get_pr(&self, pull_request_id: &str) -> Result<PullRequest, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::PrExists` if the id is already in use.
    async fn create_pr(&self, pr: &PullRequest) -> Result<(), StoreError>;

    /// Overwrite the stored pull request with the same id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PrNotFound` if no pull request has this id.
    async fn replace_pr(&self, pr: &PullRequest) -> Result<(), StoreError>;

    /// Every pull request, open or merged, the user is assigned to review.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend fails.
    async fn get_prs_by_reviewer(&self, user_id: &str)
    -> Result<Vec<PullRequestShort>, StoreError>;

    /// Open pull requests the user is assigned to review.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend fails.
    async fn get_open_prs_by_reviewer(
        &self,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>, StoreError> {
        let mut prs = self.get_prs_by_reviewer(user_id).await?;
        prs.retain(|pr| pr.status == PrStatus::Open);
        Ok(prs)
    }

    /// Number of review assignments per user across all pull requests,
    /// highest count first.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend fails.
    async fn assignment_stats(&self) -> Result<Vec<AssignmentStat>, StoreError>;
}

/// A backend that serves both collaborator roles.
pub trait Store: Directory + PullRequestStore {}

impl<T: Directory + PullRequestStore> Store for T {}
