use std::sync::Arc;

use revassign_assignment::{AssignmentEngine, SeededRandom};
use revassign_review::ReviewService;
use revassign_review::models::{Team, TeamMember};
use revassign_store::InMemoryStore;

#[must_use]
pub fn member(id: &str, active: bool) -> TeamMember {
    TeamMember {
        user_id: id.to_string(),
        username: format!("user-{id}"),
        is_active: active,
    }
}

#[must_use]
pub fn seeded_service(store: Arc<InMemoryStore>) -> ReviewService {
    ReviewService::with_store(
        store,
        AssignmentEngine::new(Arc::new(SeededRandom::new(0x5eed))),
    )
}

/// A service over a fresh in-memory store holding one team.
pub async fn service_with_team(
    team_name: &str,
    members: &[(&str, bool)],
) -> (ReviewService, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let service = seeded_service(store.clone());

    service
        .add_team(Team {
            team_name: team_name.to_string(),
            members: members
                .iter()
                .map(|(id, active)| member(id, *active))
                .collect(),
        })
        .await
        .unwrap();

    (service, store)
}
