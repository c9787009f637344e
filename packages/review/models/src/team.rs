use serde::{Deserialize, Serialize};

/// A registered user. Every user belongs to exactly one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

/// A user as listed inside a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl TeamMember {
    #[must_use]
    pub fn into_user(self, team_name: &str) -> User {
        User {
            user_id: self.user_id,
            username: self.username,
            team_name: team_name.to_string(),
            is_active: self.is_active,
        }
    }
}

impl From<User> for TeamMember {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}

impl Team {
    /// Builds a team from users already known to belong to it.
    #[must_use]
    pub fn from_users(team_name: &str, users: Vec<User>) -> Self {
        Self {
            team_name: team_name.to_string(),
            members: users.into_iter().map(TeamMember::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_into_user_carries_team() {
        let member = TeamMember {
            user_id: "u1".to_string(),
            username: "alice".to_string(),
            is_active: true,
        };

        let user = member.into_user("backend");

        assert_eq!(user.user_id, "u1");
        assert_eq!(user.team_name, "backend");
        assert!(user.is_active);
    }

    #[test]
    fn test_team_from_users_keeps_order() {
        let users = vec![
            TeamMember {
                user_id: "u2".to_string(),
                username: "bob".to_string(),
                is_active: false,
            }
            .into_user("core"),
            TeamMember {
                user_id: "u1".to_string(),
                username: "alice".to_string(),
                is_active: true,
            }
            .into_user("core"),
        ];

        let team = Team::from_users("core", users);

        assert_eq!(team.team_name, "core");
        let ids: Vec<_> = team.members.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["u2", "u1"]);
    }
}
