use std::sync::Arc;

use revassign_review_models::{MAX_REVIEWERS, User};

use crate::{RandomSource, ThreadRandom};

/// Errors that can occur when selecting reviewers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    /// Nobody on the team can take over the review.
    #[error("No active replacement candidate in team {0}")]
    NoCandidate(String),
}

/// Picks reviewers from a team roster.
///
/// No load balancing is applied: every eligible member is equally likely.
#[derive(Clone)]
pub struct AssignmentEngine {
    random: Arc<dyn RandomSource>,
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl std::fmt::Debug for AssignmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentEngine").finish_non_exhaustive()
    }
}

impl AssignmentEngine {
    #[must_use]
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Reviewers for a new pull request.
    ///
    /// Draws up to `MAX_REVIEWERS` distinct active members of `team`, never
    /// the author. Fewer eligible members yield fewer reviewers.
    #[must_use]
    pub fn initial_reviewers(&self, team: &[User], author_id: &str) -> Vec<String> {
        let pool: Vec<&str> = team
            .iter()
            .filter(|u| u.is_active && u.user_id != author_id)
            .map(|u| u.user_id.as_str())
            .collect();

        self.sample(pool, MAX_REVIEWERS)
    }

    /// One reviewer to take over from `departing`.
    ///
    /// `team` is the departing reviewer's team and `assigned` the pull
    /// request's reviewers before removal. Candidates are active, not the
    /// author, and not already assigned (which excludes `departing`).
    ///
    /// # Errors
    ///
    /// Returns `AssignmentError::NoCandidate` if nobody is eligible.
    pub fn replacement(
        &self,
        team: &[User],
        author_id: &str,
        assigned: &[String],
        departing: &User,
    ) -> Result<String, AssignmentError> {
        let pool: Vec<&str> = team
            .iter()
            .filter(|u| {
                u.is_active
                    && u.user_id != author_id
                    && u.user_id != departing.user_id
                    && !assigned.contains(&u.user_id)
            })
            .map(|u| u.user_id.as_str())
            .collect();

        if pool.is_empty() {
            log::debug!(
                "No replacement for {} in team {}",
                departing.user_id,
                departing.team_name
            );
            return Err(AssignmentError::NoCandidate(departing.team_name.clone()));
        }

        Ok(pool[self.random.pick_index(pool.len())].to_string())
    }

    /// Partial Fisher-Yates: the first `count` slots end up a uniform sample
    /// without replacement.
    fn sample(&self, mut pool: Vec<&str>, count: usize) -> Vec<String> {
        let take = count.min(pool.len());
        for i in 0..take {
            let j = i + self.random.pick_index(pool.len() - i);
            pool.swap(i, j);
        }
        pool.into_iter().take(take).map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};
    use std::sync::Mutex;

    use super::*;
    use crate::SeededRandom;

    struct Scripted(Mutex<VecDeque<usize>>);

    impl Scripted {
        fn new(picks: &[usize]) -> Arc<Self> {
            Arc::new(Self(Mutex::new(picks.iter().copied().collect())))
        }
    }

    impl RandomSource for Scripted {
        fn pick_index(&self, len: usize) -> usize {
            self.0.lock().unwrap().pop_front().unwrap_or(0) % len
        }
    }

    fn user(id: &str, active: bool) -> User {
        User {
            user_id: id.to_string(),
            username: id.to_string(),
            team_name: "core".to_string(),
            is_active: active,
        }
    }

    fn roster() -> Vec<User> {
        vec![
            user("author", true),
            user("r1", true),
            user("r2", false),
            user("r3", true),
            user("r4", true),
        ]
    }

    #[test]
    fn test_initial_never_picks_author_or_inactive() {
        let engine = AssignmentEngine::new(Arc::new(SeededRandom::new(42)));
        let team = roster();

        for _ in 0..200 {
            let picked = engine.initial_reviewers(&team, "author");
            assert_eq!(picked.len(), 2);
            assert!(!picked.contains(&"author".to_string()));
            assert!(!picked.contains(&"r2".to_string()));
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
        }
    }

    #[test]
    fn test_initial_with_small_pool() {
        let engine = AssignmentEngine::default();

        let alone = vec![user("author", true)];
        assert!(engine.initial_reviewers(&alone, "author").is_empty());

        let pair = vec![user("author", true), user("r1", true)];
        assert_eq!(engine.initial_reviewers(&pair, "author"), vec!["r1"]);
    }

    #[test]
    fn test_initial_follows_random_source() {
        // pool is [r1, r3, r4]; pick 2 -> swap(0, 2) gives [r4, r3, r1], then pick 0 -> swap(1, 1)
        let engine = AssignmentEngine::new(Scripted::new(&[2, 0]));

        let picked = engine.initial_reviewers(&roster(), "author");

        assert_eq!(picked, vec!["r4", "r3"]);
    }

    #[test]
    fn test_initial_reaches_every_candidate() {
        let engine = AssignmentEngine::new(Arc::new(SeededRandom::new(1)));
        let team = roster();
        let mut seen = HashSet::new();

        for _ in 0..200 {
            seen.extend(engine.initial_reviewers(&team, "author"));
        }

        let expected: HashSet<String> = ["r1", "r3", "r4"].iter().map(ToString::to_string).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_replacement_excludes_assigned_author_and_departing() {
        let engine = AssignmentEngine::new(Arc::new(SeededRandom::new(3)));
        let team = roster();
        let assigned = vec!["r1".to_string(), "r3".to_string()];

        for _ in 0..50 {
            let picked = engine
                .replacement(&team, "author", &assigned, &team[1])
                .unwrap();
            assert_eq!(picked, "r4");
        }
    }

    #[test]
    fn test_replacement_without_candidates() {
        let engine = AssignmentEngine::default();
        let team = vec![user("author", true), user("r1", true), user("r2", true)];
        let assigned = vec!["r1".to_string(), "r2".to_string()];

        let err = engine
            .replacement(&team, "author", &assigned, &team[1])
            .unwrap_err();

        assert_eq!(err, AssignmentError::NoCandidate("core".to_string()));
    }

    #[test]
    fn test_replacement_never_returns_departing_even_if_unlisted() {
        let engine = AssignmentEngine::default();
        let team = vec![user("author", true), user("r1", true)];

        let err = engine.replacement(&team, "author", &[], &team[1]);

        assert!(err.is_err());
    }
}
