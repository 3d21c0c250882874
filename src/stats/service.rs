use futures::future::join_all;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::league::{Event, EventType, Game, LeagueRepository};
use crate::store::DocumentStore;

use super::{
    season::years_in, BoxScoreLine, ContextIndex, GameRef, PlayerAggregator, PlayerLine,
    RankingMode, RecordScope, RecordSource, ScopedGame, ScoreRecordCollector, SeasonYear,
    StandingRow, StandingsAggregator, StatsError,
};

/// Read-only query surface over the store: rankings, box scores and
/// standings, each recomputed from current store contents on every call.
pub struct StatsService {
    league: LeagueRepository,
    collector: ScoreRecordCollector,
}

impl StatsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::builder(store).build()
    }

    pub fn builder(store: Arc<dyn DocumentStore>) -> StatsServiceBuilder {
        StatsServiceBuilder::new(store)
    }

    /// Season ranking for `year` under `mode`. Fails only when the player or
    /// event list cannot be read.
    #[instrument(skip(self, mode), fields(mode = %mode))]
    pub async fn get_player_ranking(
        &self,
        year: i32,
        mode: RankingMode,
    ) -> Result<Vec<PlayerLine>, StatsError> {
        let season = SeasonYear(year);
        let players = self.league.list_players().await?;
        let events: Vec<Event> = self
            .league
            .list_events()
            .await?
            .into_iter()
            .filter(|event| event.date.as_deref().is_some_and(|d| season.matches(d)))
            .filter(|event| mode.includes(event.modality))
            .collect();

        if events.is_empty() {
            info!("No events match the ranking filter");
            return Ok(Vec::new());
        }

        let games_by_event = self.load_started_games(&events).await;

        let mut index = ContextIndex::new();
        let mut game_refs = Vec::new();
        for (event, games) in events.iter().zip(&games_by_event) {
            index.insert_event(event);
            for game in games {
                index.insert_game(game, event.modality);
                game_refs.push(GameRef::new(event.id.as_str(), game.id.as_str()));
            }
        }

        let scope = RecordScope::Contexts {
            games: game_refs,
            context_ids: index.context_ids(),
        };
        let records = self.collector.collect(&scope).await;

        let scoped: Vec<ScopedGame<'_>> = events
            .iter()
            .zip(&games_by_event)
            .flat_map(|(event, games)| games.iter().map(move |game| ScopedGame { game, event }))
            .collect();

        let lines = PlayerAggregator::new(mode).aggregate(&players, &scoped, &records, &index);
        info!(
            event_count = events.len(),
            game_count = scoped.len(),
            record_count = records.len(),
            ranked_players = lines.len(),
            "Player ranking computed"
        );
        Ok(lines)
    }

    /// Per-player points for one game, always in points mode.
    #[instrument(skip(self))]
    pub async fn get_game_box_score(
        &self,
        event_id: &str,
        game_id: &str,
    ) -> Result<Vec<BoxScoreLine>, StatsError> {
        let event = self
            .league
            .get_event(event_id)
            .await?
            .ok_or_else(|| StatsError::NotFound(format!("event {}", event_id)))?;
        let game = self
            .league
            .get_game(event_id, game_id)
            .await?
            .ok_or_else(|| StatsError::NotFound(format!("game {}/{}", event_id, game_id)))?;
        let players = self.league.list_players().await?;

        let mut index = ContextIndex::new();
        index.insert_event(&event);
        index.insert_game(&game, event.modality);

        let scope = RecordScope::Game(GameRef::new(event_id, game_id));
        let records = self.collector.collect(&scope).await;

        let scoped = [ScopedGame {
            game: &game,
            event: &event,
        }];
        let mut rows: Vec<BoxScoreLine> = PlayerAggregator::new(RankingMode::Points(event.modality))
            .including_inactive()
            .aggregate(&players, &scoped, &records, &index)
            .into_iter()
            .map(BoxScoreLine::from)
            .collect();
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| a.player_name.cmp(&b.player_name))
        });

        info!(record_count = records.len(), rows = rows.len(), "Box score computed");
        Ok(rows)
    }

    /// Standings of an internal tournament.
    #[instrument(skip(self))]
    pub async fn get_standings(&self, event_id: &str) -> Result<Vec<StandingRow>, StatsError> {
        let event = self
            .league
            .get_event(event_id)
            .await?
            .ok_or_else(|| StatsError::NotFound(format!("event {}", event_id)))?;

        if event.event_type != EventType::InternalTournament {
            return Err(StatsError::Validation(format!(
                "event {} is not an internal tournament",
                event_id
            )));
        }

        let games: Vec<Game> = match self.league.list_finished_games(event_id).await {
            Ok(games) => games,
            Err(err) => {
                warn!(error = %err, "Failed to read finished games, standings will be empty");
                Vec::new()
            }
        }
        .into_iter()
        .filter(|game| game.team_ids().is_some())
        .collect();

        let rows = StandingsAggregator::aggregate(&event, &games);
        info!(game_count = games.len(), team_count = rows.len(), "Standings computed");
        Ok(rows)
    }

    /// Years that have at least one event, newest first.
    #[instrument(skip(self))]
    pub async fn available_seasons(&self) -> Result<Vec<i32>, StatsError> {
        let years: BTreeSet<i32> = self
            .league
            .list_events()
            .await?
            .iter()
            .filter_map(|event| event.date.as_deref())
            .flat_map(years_in)
            .collect();
        Ok(years.into_iter().rev().collect())
    }

    /// Games of each event that have started, loaded concurrently. An event
    /// whose games cannot be read contributes none.
    async fn load_started_games(&self, events: &[Event]) -> Vec<Vec<Game>> {
        let results = join_all(events.iter().map(|event| self.league.list_games(&event.id))).await;

        events
            .iter()
            .zip(results)
            .map(|(event, result)| match result {
                Ok(games) => games
                    .into_iter()
                    .filter(|game| game.status.has_started())
                    .collect(),
                Err(err) => {
                    warn!(event_id = %event.id, error = %err, "Failed to read games for event");
                    Vec::new()
                }
            })
            .collect()
    }
}

pub struct StatsServiceBuilder {
    store: Arc<dyn DocumentStore>,
    extra_sources: Vec<Arc<dyn RecordSource>>,
}

impl StatsServiceBuilder {
    fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            extra_sources: Vec::new(),
        }
    }

    /// Adds a record source next to the nested and flat collections.
    pub fn with_source(mut self, source: Arc<dyn RecordSource>) -> Self {
        self.extra_sources.push(source);
        self
    }

    pub fn build(self) -> StatsService {
        let mut collector = ScoreRecordCollector::new(Arc::clone(&self.store));
        for source in self.extra_sources {
            collector.push_source(source);
        }
        StatsService {
            league: LeagueRepository::new(self.store),
            collector,
        }
    }
}
