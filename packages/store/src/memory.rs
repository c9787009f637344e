//! In-memory implementation of the store traits.
//!
//! All state is lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use revassign_review_models::{AssignmentStat, PullRequest, PullRequestShort, Team, User};

use crate::{Directory, PullRequestStore, StoreError, StoreSnapshot};

/// Teams, users and pull requests held behind a single `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StoreSnapshot>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Directory for InMemoryStore {
    async fn add_team(&self, team: Team) -> Result<(), StoreError> {
        self.data.write().await.add_team(team)
    }

    async fn get_team(&self, team_name: &str) -> Result<Team, StoreError> {
        self.data.read().await.get_team(team_name)
    }

    async fn get_user(&self, user_id: &str) -> Result<User, StoreError> {
        self.data.read().await.get_user(user_id)
    }

    async fn get_users_by_team(&self, team_name: &str) -> Result<Vec<User>, StoreError> {
        Ok(self.data.read().await.get_users_by_team(team_name))
    }

    async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User, StoreError> {
        self.data.write().await.set_user_active(user_id, is_active)
    }

    async fn deactivate_team(&self, team_name: &str) -> Result<Vec<String>, StoreError> {
        self.data.write().await.deactivate_team(team_name)
    }
}

#[async_trait]
impl PullRequestStore for InMemoryStore {
    async fn get_pr(&self, pull_request_id: &str) -> Result<PullRequest, StoreError> {
        self.data.read().await.get_pr(pull_request_id)
    }

    async fn create_pr(&self, pr: &PullRequest) -> Result<(), StoreError> {
        self.data.write().await.create_pr(pr)
    }

    async fn replace_pr(&self, pr: &PullRequest) -> Result<(), StoreError> {
        self.data.write().await.replace_pr(pr)
    }

    async fn get_prs_by_reviewer(
        &self,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>, StoreError> {
        Ok(self.data.read().await.get_prs_by_reviewer(user_id))
    }

    async fn assignment_stats(&self) -> Result<Vec<AssignmentStat>, StoreError> {
        Ok(self.data.read().await.assignment_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use revassign_review_models::{PrStatus, TeamMember};

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .add_team(Team {
                team_name: "core".to_string(),
                members: vec![
                    TeamMember {
                        user_id: "a".to_string(),
                        username: "alice".to_string(),
                        is_active: true,
                    },
                    TeamMember {
                        user_id: "b".to_string(),
                        username: "bob".to_string(),
                        is_active: true,
                    },
                ],
            })
            .await
            .unwrap();
        store
    }

    #[test_log::test(tokio::test)]
    async fn test_get_team_and_users() {
        let store = seeded().await;

        let team = store.get_team("core").await.unwrap();
        assert_eq!(team.members.len(), 2);

        let users = store.get_users_by_team("core").await.unwrap();
        assert!(users.iter().all(|u| u.team_name == "core"));

        assert!(store.get_users_by_team("nope").await.unwrap().is_empty());
        assert!(store.get_team("nope").await.unwrap_err().is_not_found());
    }

    #[test_log::test(tokio::test)]
    async fn test_set_user_active_unknown_user() {
        let store = seeded().await;

        let err = store.set_user_active("zed", false).await.unwrap_err();

        assert!(matches!(err, StoreError::UserNotFound(id) if id == "zed"));
    }

    #[test_log::test(tokio::test)]
    async fn test_open_prs_by_reviewer_skips_merged() {
        let store = seeded().await;
        let mut open = PullRequest::open(
            "p1".to_string(),
            "one".to_string(),
            "a".to_string(),
            vec!["b".to_string()],
            Utc::now(),
        );
        store.create_pr(&open).await.unwrap();

        open.pull_request_id = "p2".to_string();
        open.merge(Utc::now());
        store.create_pr(&open).await.unwrap();

        let all = store.get_prs_by_reviewer("b").await.unwrap();
        assert_eq!(all.len(), 2);

        let open_only = store.get_open_prs_by_reviewer("b").await.unwrap();
        assert_eq!(open_only.len(), 1);
        assert_eq!(open_only[0].pull_request_id, "p1");
        assert_eq!(open_only[0].status, PrStatus::Open);
    }

    #[test_log::test(tokio::test)]
    async fn test_create_pr_twice_conflicts() {
        let store = seeded().await;
        let pr = PullRequest::open(
            "p1".to_string(),
            "one".to_string(),
            "a".to_string(),
            vec![],
            Utc::now(),
        );

        store.create_pr(&pr).await.unwrap();
        let err = store.create_pr(&pr).await.unwrap_err();

        assert!(err.is_already_exists());
    }
}
