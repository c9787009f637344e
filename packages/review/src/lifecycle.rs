//! `OPEN -> MERGED` state machine and per-PR reviewer replacement.

use chrono::Utc;

use revassign_assignment::AssignmentError;
use revassign_review_models::PullRequest;

use crate::{ReviewError, ReviewService};

/// A successful reviewer replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassigned {
    pub pr: PullRequest,
    pub replaced_by: String,
}

impl ReviewService {
    /// Open a pull request and assign up to two reviewers from the author's
    /// team.
    ///
    /// # Errors
    ///
    /// * `ReviewError::UserNotFound` if the author is unknown
    /// * `ReviewError::PrExists` if the id is already in use
    pub async fn create_pr(
        &self,
        pull_request_id: &str,
        pull_request_name: &str,
        author_id: &str,
    ) -> Result<PullRequest, ReviewError> {
        let author = self.directory.get_user(author_id).await?;
        let team = self.directory.get_users_by_team(&author.team_name).await?;

        let reviewers = self.engine.initial_reviewers(&team, author_id);

        let pr = PullRequest::open(
            pull_request_id.to_string(),
            pull_request_name.to_string(),
            author_id.to_string(),
            reviewers,
            Utc::now(),
        );
        self.pull_requests.create_pr(&pr).await?;

        log::info!(
            "Created pull request {} by {} with {} reviewer(s)",
            pr.pull_request_id,
            pr.author_id,
            pr.assigned_reviewers.len()
        );

        Ok(pr)
    }

    /// Merge a pull request. Merging an already merged pull request returns
    /// it unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::PrNotFound` if no pull request has this id.
    pub async fn merge_pr(&self, pull_request_id: &str) -> Result<PullRequest, ReviewError> {
        let _guard = self.pr_locks.lock(pull_request_id).await;

        let mut pr = self.pull_requests.get_pr(pull_request_id).await?;
        if !pr.merge(Utc::now()) {
            log::debug!("Pull request {pull_request_id} already merged");
            return Ok(pr);
        }

        self.pull_requests.replace_pr(&pr).await?;
        log::info!("Merged pull request {pull_request_id}");

        Ok(pr)
    }

    /// Replace `old_user_id` on a pull request with another active member
    /// of that reviewer's team.
    ///
    /// When no replacement exists the old reviewer is still removed and
    /// persisted before `ReviewError::NoCandidate` is returned.
    ///
    /// # Errors
    ///
    /// * `ReviewError::PrNotFound` if no pull request has this id
    /// * `ReviewError::PrMerged` if the pull request is merged
    /// * `ReviewError::NotAssigned` if `old_user_id` is not a reviewer
    /// * `ReviewError::UserNotFound` if `old_user_id` is unknown
    /// * `ReviewError::NoCandidate` if nobody can take over
    pub async fn reassign_pr(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> Result<Reassigned, ReviewError> {
        let _guard = self.pr_locks.lock(pull_request_id).await;

        let mut pr = self.pull_requests.get_pr(pull_request_id).await?;
        if pr.is_merged() {
            return Err(ReviewError::PrMerged(pr.pull_request_id));
        }
        if !pr.has_reviewer(old_user_id) {
            return Err(ReviewError::NotAssigned {
                pull_request_id: pr.pull_request_id,
                user_id: old_user_id.to_string(),
            });
        }

        let departing = self.directory.get_user(old_user_id).await?;
        let team = self.directory.get_users_by_team(&departing.team_name).await?;

        let picked = self
            .engine
            .replacement(&team, &pr.author_id, &pr.assigned_reviewers, &departing);

        pr.remove_reviewer(old_user_id);

        match picked {
            Ok(new_reviewer) => {
                pr.add_reviewer(new_reviewer.clone());
                self.pull_requests.replace_pr(&pr).await?;
                log::info!(
                    "Reassigned pull request {pull_request_id}: {old_user_id} -> {new_reviewer}"
                );
                Ok(Reassigned {
                    pr,
                    replaced_by: new_reviewer,
                })
            }
            Err(AssignmentError::NoCandidate(team_name)) => {
                self.pull_requests.replace_pr(&pr).await?;
                log::warn!(
                    "No replacement for {old_user_id} on pull request {pull_request_id}; \
                     reviewer removed"
                );
                Err(ReviewError::NoCandidate {
                    pull_request_id: pr.pull_request_id,
                    team_name,
                })
            }
        }
    }
}
