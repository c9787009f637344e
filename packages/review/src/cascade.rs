//! Best-effort reassignment when users or whole teams are deactivated.

use revassign_review_models::{CascadeFailure, CascadeReport, Reassignment, User};

use crate::{ReviewError, ReviewService};

impl ReviewService {
    /// Set a user's active flag.
    ///
    /// Going from active to inactive first tries to hand every open review
    /// of the user to someone else. Failed hand-offs are recorded in the
    /// report and do not stop the flag from being cleared.
    ///
    /// # Errors
    ///
    /// * `ReviewError::UserNotFound` if no user has this id
    /// * `ReviewError::Storage` if the flag cannot be written
    pub async fn set_user_active(
        &self,
        user_id: &str,
        is_active: bool,
    ) -> Result<(User, CascadeReport), ReviewError> {
        let user = self.directory.get_user(user_id).await?;
        let mut report = CascadeReport::default();

        let deactivating = user.is_active && !is_active;
        if deactivating {
            self.hand_off_reviews(user_id, &mut report).await;
        }

        let user = self.directory.set_user_active(user_id, is_active).await?;
        if deactivating {
            report.deactivated.push(user.user_id.clone());
            log_summary(&format!("user {user_id}"), &report);
        }

        Ok((user, report))
    }

    /// Deactivate every member of a team.
    ///
    /// Each active member's open reviews are reassigned first, best effort,
    /// exactly as `set_user_active` does for a single user. Teammates not yet
    /// cleared are still eligible replacements. All members are then cleared
    /// in one bulk write regardless of how the reassignments went.
    ///
    /// # Errors
    ///
    /// * `ReviewError::TeamNotFound` if no team has this name
    /// * `ReviewError::Storage` if the bulk write fails
    pub async fn deactivate_team(&self, team_name: &str) -> Result<CascadeReport, ReviewError> {
        let team = self.directory.get_team(team_name).await?;
        let mut report = CascadeReport::default();

        for member in team.members.iter().filter(|m| m.is_active) {
            self.hand_off_reviews(&member.user_id, &mut report).await;
        }

        report.deactivated = self.directory.deactivate_team(team_name).await?;
        log_summary(&format!("team {team_name}"), &report);

        Ok(report)
    }

    /// Attempt to hand off every open review of `user_id`, recording every
    /// outcome in `report`.
    async fn hand_off_reviews(&self, user_id: &str, report: &mut CascadeReport) {
        if let Err(e) = self.reassign_open_reviews(user_id, report).await {
            log::warn!("Could not list open reviews of {user_id}: {e}");
            report.failed.push(CascadeFailure {
                pull_request_id: None,
                user_id: user_id.to_string(),
                code: e.code(),
                message: e.to_string(),
            });
        }
    }

    /// Only a failure to list the reviews is returned; per-PR outcomes go
    /// into `report`.
    async fn reassign_open_reviews(
        &self,
        user_id: &str,
        report: &mut CascadeReport,
    ) -> Result<(), ReviewError> {
        let open = self.pull_requests.get_open_prs_by_reviewer(user_id).await?;

        for pr in open {
            match self.reassign_pr(&pr.pull_request_id, user_id).await {
                Ok(reassigned) => report.reassigned.push(Reassignment {
                    pull_request_id: pr.pull_request_id,
                    old_reviewer: user_id.to_string(),
                    new_reviewer: reassigned.replaced_by,
                }),
                Err(e) => {
                    log::warn!(
                        "Skipping pull request {} while deactivating {user_id}: {e}",
                        pr.pull_request_id
                    );
                    report.failed.push(CascadeFailure {
                        pull_request_id: Some(pr.pull_request_id),
                        user_id: user_id.to_string(),
                        code: e.code(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn log_summary(subject: &str, report: &CascadeReport) {
    log::info!(
        "Deactivated {subject}: {} user(s) cleared, {} review(s) reassigned, {} failed",
        report.deactivated.len(),
        report.reassigned.len(),
        report.failed.len()
    );
}
