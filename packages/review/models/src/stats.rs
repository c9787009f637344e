use serde::{Deserialize, Serialize};

/// Number of pull requests a user has been assigned to review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentStat {
    pub user_id: String,
    pub count: usize,
}
