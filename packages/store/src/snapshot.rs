//! Plain data behind both store implementations.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use revassign_review_models::{
    AssignmentStat, PullRequest, PullRequestShort, Team, User,
};

use crate::StoreError;

/// Full contents of a store. This is also the on-disk format of
/// `JsonFileStore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Team name to member ids, in registration order.
    #[serde(default)]
    pub teams: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub users: BTreeMap<String, User>,
    #[serde(default)]
    pub pull_requests: BTreeMap<String, PullRequest>,
}

impl StoreSnapshot {
    pub(crate) fn add_team(&mut self, team: Team) -> Result<(), StoreError> {
        if self.teams.contains_key(&team.team_name) {
            return Err(StoreError::TeamExists(team.team_name));
        }
        if let Some(taken) = team
            .members
            .iter()
            .find(|m| self.users.contains_key(&m.user_id))
        {
            return Err(StoreError::UserExists(taken.user_id.clone()));
        }

        let mut member_ids: Vec<String> = Vec::with_capacity(team.members.len());
        for member in &team.members {
            if member_ids.contains(&member.user_id) {
                return Err(StoreError::UserExists(member.user_id.clone()));
            }
            member_ids.push(member.user_id.clone());
        }

        for member in team.members {
            let user = member.into_user(&team.team_name);
            self.users.insert(user.user_id.clone(), user);
        }
        self.teams.insert(team.team_name, member_ids);

        Ok(())
    }

    pub(crate) fn get_team(&self, team_name: &str) -> Result<Team, StoreError> {
        if !self.teams.contains_key(team_name) {
            return Err(StoreError::TeamNotFound(team_name.to_string()));
        }

        Ok(Team::from_users(team_name, self.get_users_by_team(team_name)))
    }

    pub(crate) fn get_user(&self, user_id: &str) -> Result<User, StoreError> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(user_id.to_string()))
    }

    pub(crate) fn get_users_by_team(&self, team_name: &str) -> Vec<User> {
        self.teams
            .get(team_name)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.users.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn set_user_active(
        &mut self,
        user_id: &str,
        is_active: bool,
    ) -> Result<User, StoreError> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::UserNotFound(user_id.to_string()))?;
        user.is_active = is_active;
        Ok(user.clone())
    }

    pub(crate) fn deactivate_team(&mut self, team_name: &str) -> Result<Vec<String>, StoreError> {
        let member_ids = self
            .teams
            .get(team_name)
            .cloned()
            .ok_or_else(|| StoreError::TeamNotFound(team_name.to_string()))?;

        for id in &member_ids {
            if let Some(user) = self.users.get_mut(id) {
                user.is_active = false;
            }
        }

        Ok(member_ids)
    }

    pub(crate) fn get_pr(&self, pull_request_id: &str) -> Result<PullRequest, StoreError> {
        self.pull_requests
            .get(pull_request_id)
            .cloned()
            .ok_or_else(|| StoreError::PrNotFound(pull_request_id.to_string()))
    }

    pub(crate) fn create_pr(&mut self, pr: &PullRequest) -> Result<(), StoreError> {
        if self.pull_requests.contains_key(&pr.pull_request_id) {
            return Err(StoreError::PrExists(pr.pull_request_id.clone()));
        }
        self.pull_requests
            .insert(pr.pull_request_id.clone(), pr.clone());
        Ok(())
    }

    pub(crate) fn replace_pr(&mut self, pr: &PullRequest) -> Result<(), StoreError> {
        let stored = self
            .pull_requests
            .get_mut(&pr.pull_request_id)
            .ok_or_else(|| StoreError::PrNotFound(pr.pull_request_id.clone()))?;
        *stored = pr.clone();
        Ok(())
    }

    pub(crate) fn get_prs_by_reviewer(&self, user_id: &str) -> Vec<PullRequestShort> {
        self.pull_requests
            .values()
            .filter(|pr| pr.has_reviewer(user_id))
            .map(PullRequest::to_short)
            .collect()
    }

    pub(crate) fn assignment_stats(&self) -> Vec<AssignmentStat> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for reviewer in self
            .pull_requests
            .values()
            .flat_map(|pr| pr.assigned_reviewers.iter())
        {
            *counts.entry(reviewer.as_str()).or_default() += 1;
        }

        let mut stats: Vec<_> = counts
            .into_iter()
            .map(|(user_id, count)| AssignmentStat {
                user_id: user_id.to_string(),
                count,
            })
            .collect();
        stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.user_id.cmp(&b.user_id)));
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revassign_review_models::TeamMember;
    use chrono::Utc;

    fn member(id: &str, active: bool) -> TeamMember {
        TeamMember {
            user_id: id.to_string(),
            username: format!("user-{id}"),
            is_active: active,
        }
    }

    fn pr(id: &str, author: &str, reviewers: &[&str]) -> PullRequest {
        PullRequest::open(
            id.to_string(),
            format!("PR {id}"),
            author.to_string(),
            reviewers.iter().map(ToString::to_string).collect(),
            Utc::now(),
        )
    }

    #[test]
    fn test_add_team_rejects_duplicate_team_and_user() {
        let mut snapshot = StoreSnapshot::default();
        snapshot
            .add_team(Team {
                team_name: "core".to_string(),
                members: vec![member("a", true)],
            })
            .unwrap();

        let err = snapshot
            .add_team(Team {
                team_name: "core".to_string(),
                members: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::TeamExists(name) if name == "core"));

        let err = snapshot
            .add_team(Team {
                team_name: "infra".to_string(),
                members: vec![member("b", true), member("a", true)],
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::UserExists(id) if id == "a"));
        assert!(!snapshot.teams.contains_key("infra"));
        assert!(!snapshot.users.contains_key("b"));
    }

    #[test]
    fn test_add_team_rejects_repeated_member() {
        let mut snapshot = StoreSnapshot::default();

        let err = snapshot
            .add_team(Team {
                team_name: "core".to_string(),
                members: vec![member("a", true), member("a", false)],
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::UserExists(id) if id == "a"));
    }

    #[test]
    fn test_deactivate_team_flips_every_member() {
        let mut snapshot = StoreSnapshot::default();
        snapshot
            .add_team(Team {
                team_name: "core".to_string(),
                members: vec![member("a", true), member("b", false), member("c", true)],
            })
            .unwrap();

        let ids = snapshot.deactivate_team("core").unwrap();

        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(snapshot.users.values().all(|u| !u.is_active));
    }

    #[test]
    fn test_get_team_reflects_current_flags_in_registration_order() {
        let mut snapshot = StoreSnapshot::default();
        snapshot
            .add_team(Team {
                team_name: "core".to_string(),
                members: vec![member("z", true), member("a", true)],
            })
            .unwrap();
        snapshot.set_user_active("a", false).unwrap();

        let team = snapshot.get_team("core").unwrap();

        assert_eq!(team.members, vec![member("z", true), member("a", false)]);
        assert!(matches!(
            snapshot.get_team("nope"),
            Err(StoreError::TeamNotFound(_))
        ));
    }

    #[test]
    fn test_assignment_stats_orders_by_count_then_id() {
        let mut snapshot = StoreSnapshot::default();
        snapshot.create_pr(&pr("p1", "a", &["b", "c"])).unwrap();
        snapshot.create_pr(&pr("p2", "a", &["c", "d"])).unwrap();
        snapshot.create_pr(&pr("p3", "c", &["b"])).unwrap();

        let stats = snapshot.assignment_stats();

        let flat: Vec<_> = stats
            .iter()
            .map(|s| (s.user_id.as_str(), s.count))
            .collect();
        assert_eq!(flat, vec![("b", 2), ("c", 2), ("d", 1)]);
    }

    #[test]
    fn test_replace_unknown_pr_fails() {
        let mut snapshot = StoreSnapshot::default();

        let err = snapshot.replace_pr(&pr("p1", "a", &[])).unwrap_err();

        assert!(err.is_not_found());
    }
}
