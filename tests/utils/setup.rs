#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::{json, Value};
use std::sync::Arc;

use ancb_stats::{
    league::paths,
    store::{CollectionPath, InMemoryDocumentStore},
    StatsService,
};

use super::record_builders::{EventBuilder, GameBuilder};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub store: Arc<InMemoryDocumentStore>,
    pub stats_service: StatsService,
}

/// Collects documents and seeds a fresh in-memory store with them
pub struct TestSetupBuilder {
    documents: Vec<(CollectionPath, String, Value)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { documents: vec![] }
    }

    pub fn with_player(mut self, id: &str, name: &str) -> Self {
        self.documents.push((
            paths::players(),
            id.to_string(),
            json!({"nome": name, "status": "ativo"}),
        ));
        self
    }

    pub fn with_players(self, players: &[(&str, &str)]) -> Self {
        players
            .iter()
            .fold(self, |builder, (id, name)| builder.with_player(id, name))
    }

    pub fn with_event(mut self, event: EventBuilder) -> Self {
        let (id, body) = event.build();
        self.documents.push((paths::events(), id, body));
        self
    }

    pub fn with_game(mut self, event_id: &str, game: GameBuilder) -> Self {
        let (id, body) = game.build();
        self.documents.push((paths::games(event_id), id, body));
        self
    }

    /// Scoring record under the game's own collection
    pub fn with_nested_cesta(
        mut self,
        event_id: &str,
        game_id: &str,
        cesta_id: &str,
        player_id: &str,
        points: u8,
    ) -> Self {
        self.documents.push((
            paths::game_scoring_events(event_id, game_id),
            cesta_id.to_string(),
            json!({"playerId": player_id, "points": points}),
        ));
        self
    }

    /// Scoring record in the legacy season-wide collection
    pub fn with_flat_cesta(mut self, cesta_id: &str, body: Value) -> Self {
        self.documents
            .push((paths::flat_scoring_events(), cesta_id.to_string(), body));
        self
    }

    pub async fn build(self) -> TestSetup {
        let store = Arc::new(InMemoryDocumentStore::new());
        for (path, id, body) in self.documents {
            store.put(&path, &id, body).await;
        }
        let stats_service = StatsService::new(store.clone());
        TestSetup {
            store,
            stats_service,
        }
    }
}
