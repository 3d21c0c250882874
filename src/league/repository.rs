use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::models::{Event, Game, GameDocument, Player};
use super::paths;
use crate::store::{CollectionPath, Document, DocumentStore, Query, StoreError};

/// Typed read access to events, games and players.
///
/// Documents that fail to decode are skipped with a warning; a bad record
/// written by an old screen must not hide the rest of the collection.
#[derive(Clone)]
pub struct LeagueRepository {
    store: Arc<dyn DocumentStore>,
}

impl LeagueRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let docs = self
            .query_or_empty(&paths::events(), &Query::all().order_by("data", true))
            .await?;
        let events = decode_all::<Event>(&docs);
        debug!(event_count = events.len(), "Events loaded");
        Ok(events)
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: &str) -> Result<Option<Event>, StoreError> {
        match self.store.get(&paths::events(), event_id).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_games(&self, event_id: &str) -> Result<Vec<Game>, StoreError> {
        self.games_matching(event_id, &Query::all().order_by("dataJogo", false))
            .await
    }

    /// Finished games of an event, filtered by the store.
    #[instrument(skip(self))]
    pub async fn list_finished_games(&self, event_id: &str) -> Result<Vec<Game>, StoreError> {
        self.games_matching(event_id, &Query::all().where_eq("status", "finalizado"))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_game(&self, event_id: &str, game_id: &str) -> Result<Option<Game>, StoreError> {
        match self.store.get(&paths::games(event_id), game_id).await? {
            Some(doc) => {
                let raw: GameDocument = doc.decode()?;
                Ok(Some(raw.into_game(event_id)))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        let docs = self
            .query_or_empty(&paths::players(), &Query::all().order_by("nome", false))
            .await?;
        let players = decode_all::<Player>(&docs);
        debug!(player_count = players.len(), "Players loaded");
        Ok(players)
    }

    async fn games_matching(&self, event_id: &str, query: &Query) -> Result<Vec<Game>, StoreError> {
        let docs = self.query_or_empty(&paths::games(event_id), query).await?;
        let games: Vec<Game> = decode_all::<GameDocument>(&docs)
            .into_iter()
            .map(|raw| raw.into_game(event_id))
            .collect();
        debug!(event_id, game_count = games.len(), "Games loaded");
        Ok(games)
    }

    /// A collection nobody has written to yet reads as empty.
    async fn query_or_empty(
        &self,
        path: &CollectionPath,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError> {
        match self.store.query(path, query).await {
            Ok(docs) => Ok(docs),
            Err(StoreError::CollectionNotFound(_)) => {
                debug!(path = %path, "Collection absent, treating as empty");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}

fn decode_all<T: DeserializeOwned>(docs: &[Document]) -> Vec<T> {
    docs.iter()
        .filter_map(|doc| match doc.decode::<T>() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(doc_id = %doc.id, error = %err, "Skipping undecodable document");
                None
            }
        })
        .collect()
}
