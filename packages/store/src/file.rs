//! JSON-file-backed implementation of the store traits.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use revassign_review_models::{AssignmentStat, PullRequest, PullRequestShort, Team, User};

use crate::{Directory, PullRequestStore, StoreError, StoreSnapshot};

/// Store that keeps everything in memory and rewrites a JSON snapshot file
/// after every mutation.
///
/// Storage layout:
/// ```text
/// {path}          # pretty-printed StoreSnapshot
/// {path}.tmp      # written first, then renamed over {path}
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<StoreSnapshot>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading the existing snapshot if present.
    ///
    /// A missing file starts an empty store; the file is created on the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// * `StoreError::Io` if the file exists but cannot be read
    /// * `StoreError::Parse` if the file is not a valid snapshot
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Parse)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No state file at {}, starting empty", path.display());
                StoreSnapshot::default()
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        log::info!(
            "Loaded state from {} ({} teams, {} users, {} pull requests)",
            path.display(),
            snapshot.teams.len(),
            snapshot.users.len(),
            snapshot.pull_requests.len()
        );

        Ok(Self {
            path,
            data: RwLock::new(snapshot),
        })
    }

    /// Default state file location under the user data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the data directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let data_dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(data_dir.join("revassign").join("state.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(snapshot).map_err(StoreError::Serialize)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }

    /// Apply `f` to a copy of the data, write it out, and only then make it
    /// visible. A failed write leaves the in-memory state untouched.
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreSnapshot) -> Result<T, StoreError> + Send,
    ) -> Result<T, StoreError> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let out = f(&mut next)?;
        self.persist(&next).await.inspect_err(|e| {
            log::error!("Failed to write state to {}: {e}", self.path.display());
        })?;
        *data = next;
        Ok(out)
    }
}

#[async_trait]
impl Directory for JsonFileStore {
    async fn add_team(&self, team: Team) -> Result<(), StoreError> {
        self.mutate(|data| data.add_team(team)).await
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
        self.mutate(|data| data.set_user_active(user_id, is_active))
            .await
    }

    async fn deactivate_team(&self, team_name: &str) -> Result<Vec<String>, StoreError> {
        self.mutate(|data| data.deactivate_team(team_name)).await
    }
}

#[async_trait]
impl PullRequestStore for JsonFileStore {
    async fn get_pr(&self, pull_request_id: &str) -> Result<PullRequest, StoreError> {
        self.data.read().await.get_pr(pull_request_id)
    }

    async fn create_pr(&self, pr: &PullRequest) -> Result<(), StoreError> {
        self.mutate(|data| data.create_pr(pr)).await
    }

    async fn replace_pr(&self, pr: &PullRequest) -> Result<(), StoreError> {
        self.mutate(|data| data.replace_pr(pr)).await
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
