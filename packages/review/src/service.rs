use std::sync::Arc;

use revassign_assignment::AssignmentEngine;
use revassign_review_models::{AssignmentStat, PullRequest, PullRequestShort, Team};
use revassign_store::{Directory, PullRequestStore, Store};

use crate::ReviewError;
use crate::locks::PrLocks;

/// Entry point for every team, user and pull request operation.
///
/// Holds explicit handles to its storage collaborators; nothing is global.
pub struct ReviewService {
    pub(crate) directory: Arc<dyn Directory>,
    pub(crate) pull_requests: Arc<dyn PullRequestStore>,
    pub(crate) engine: AssignmentEngine,
    pub(crate) pr_locks: PrLocks,
}

impl ReviewService {
    #[must_use]
    pub fn new(
        directory: Arc<dyn Directory>,
        pull_requests: Arc<dyn PullRequestStore>,
        engine: AssignmentEngine,
    ) -> Self {
        Self {
            directory,
            pull_requests,
            engine,
            pr_locks: PrLocks::default(),
        }
    }

    /// Use one backend for both the directory and pull request roles.
    #[must_use]
    pub fn with_store<S: Store + 'static>(store: Arc<S>, engine: AssignmentEngine) -> Self {
        let directory: Arc<dyn Directory> = store.clone();
        let pull_requests: Arc<dyn PullRequestStore> = store;
        Self::new(directory, pull_requests, engine)
    }

    /// Register a team and its members.
    ///
    /// # Errors
    ///
    /// * `ReviewError::TeamExists` if the team name is taken
    /// * `ReviewError::UserExists` if a member id is already registered
    pub async fn add_team(&self, team: Team) -> Result<Team, ReviewError> {
        self.directory.add_team(team.clone()).await?;
        log::info!(
            "Registered team {} with {} member(s)",
            team.team_name,
            team.members.len()
        );
        Ok(team)
    }

    /// # Errors
    ///
    /// Returns `ReviewError::TeamNotFound` if no team has this name.
    pub async fn get_team(&self, team_name: &str) -> Result<Team, ReviewError> {
        Ok(self.directory.get_team(team_name).await?)
    }

    /// # Errors
    ///
    /// Returns `ReviewError::PrNotFound` if no pull request has this id.
    pub async fn get_pr(&self, pull_request_id: &str) -> Result<PullRequest, ReviewError> {
        Ok(self.pull_requests.get_pr(pull_request_id).await?)
    }

    /// Pull requests, open or merged, the user is assigned to review.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::UserNotFound` if no user has this id.
    pub async fn get_reviews(&self, user_id: &str) -> Result<Vec<PullRequestShort>, ReviewError> {
        self.directory.get_user(user_id).await?;
        Ok(self.pull_requests.get_prs_by_reviewer(user_id).await?)
    }

    /// Review assignment counts per user, highest first.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Storage` if the backend fails.
    pub async fn assignment_stats(&self) -> Result<Vec<AssignmentStat>, ReviewError> {
        Ok(self.pull_requests.assignment_stats().await?)
    }
}
