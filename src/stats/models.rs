use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use super::StatsError;
use crate::league::models::value_as_u32;
use crate::league::{Event, Game, Modality};
use crate::store::Document;

/// One made shot ("cesta").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringEvent {
    pub id: String,
    pub points: u8,
    pub timestamp: Option<DateTime<Utc>>,
    pub game_id: Option<String>,
    pub event_id: Option<String>,
    pub team_id: Option<String>,
    pub player_id: Option<String>,
}

/// Raw shape of a scoring record. The screens that wrote these used either
/// spelling of each field, and some documents carry both.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoringEventDocument {
    id: String,
    #[serde(default)]
    pontos: Option<Value>,
    #[serde(default)]
    points: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    jogo_id: Option<String>,
    #[serde(default)]
    game_id: Option<String>,
    #[serde(default)]
    evento_id: Option<String>,
    #[serde(default)]
    event_id: Option<String>,
    #[serde(default)]
    time_id: Option<String>,
    #[serde(default)]
    team_id: Option<String>,
    #[serde(default)]
    jogador_id: Option<String>,
    #[serde(default)]
    player_id: Option<String>,
}

impl ScoringEvent {
    /// Decodes a stored record. `linkage` fills in the game and event of a
    /// record read from a per-game collection when the body omits them.
    pub fn from_document(doc: &Document, linkage: Option<&GameRef>) -> Result<Self, StatsError> {
        let raw: ScoringEventDocument = doc.decode()?;

        let points = [&raw.pontos, &raw.points]
            .into_iter()
            .flatten()
            .find_map(value_as_u32)
            .filter(|p| (1..=3).contains(p))
            .ok_or_else(|| {
                StatsError::InvalidRecord(format!(
                    "cesta {} has no valid point value: {:?}",
                    raw.id,
                    raw.pontos.as_ref().or(raw.points.as_ref())
                ))
            })? as u8;

        let mut game_id = first_non_blank(raw.jogo_id, raw.game_id);
        let mut event_id = first_non_blank(raw.evento_id, raw.event_id);
        if let Some(link) = linkage {
            game_id.get_or_insert_with(|| link.game_id.clone());
            event_id.get_or_insert_with(|| link.event_id.clone());
        }

        let timestamp = [&raw.timestamp, &raw.created_at]
            .into_iter()
            .flatten()
            .find_map(parse_timestamp);

        Ok(Self {
            id: raw.id,
            points,
            timestamp,
            game_id,
            event_id,
            team_id: first_non_blank(raw.time_id, raw.team_id),
            player_id: first_non_blank(raw.jogador_id, raw.player_id),
        })
    }

    /// The most specific linkage id of this record: its game, else its
    /// event, else its team. Scope and modality are resolved through this id
    /// alone, so a record tied to a game outside the scope stays out even if
    /// its event or team is in scope.
    pub fn anchor_id(&self) -> Option<&str> {
        self.game_id
            .as_deref()
            .or(self.event_id.as_deref())
            .or(self.team_id.as_deref())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn first_non_blank(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    non_blank(preferred).or_else(|| non_blank(fallback))
}

/// Accepts RFC 3339 strings, epoch milliseconds and `{seconds, nanoseconds}`
/// objects.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Value::Object(map) => {
            let seconds = map.get("seconds").or_else(|| map.get("_seconds"))?.as_i64()?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0) as u32;
            Utc.timestamp_opt(seconds, nanos).single()
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameRef {
    pub event_id: String,
    pub game_id: String,
}

impl GameRef {
    pub fn new(event_id: impl Into<String>, game_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            game_id: game_id.into(),
        }
    }
}

/// What a collection run should gather.
#[derive(Debug, Clone)]
pub enum RecordScope {
    /// A single game: its nested records plus flat records linked to it.
    Game(GameRef),
    /// Many games at once. Flat records are kept when any of their linkage
    /// ids is in `context_ids`.
    Contexts {
        games: Vec<GameRef>,
        context_ids: HashSet<String>,
    },
}

impl RecordScope {
    pub fn games(&self) -> &[GameRef] {
        match self {
            RecordScope::Game(game) => std::slice::from_ref(game),
            RecordScope::Contexts { games, .. } => games,
        }
    }

    /// Whether a record read from the flat collection belongs to this scope.
    pub fn admits(&self, record: &ScoringEvent) -> bool {
        match self {
            RecordScope::Game(game) => record.game_id.as_deref() == Some(game.game_id.as_str()),
            RecordScope::Contexts { context_ids, .. } => record
                .anchor_id()
                .is_some_and(|id| context_ids.contains(id)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.games().is_empty()
            && matches!(self, RecordScope::Contexts { context_ids, .. } if context_ids.is_empty())
    }
}

/// Maps every in-scope game, team and event id to the modality of the event
/// it belongs to.
#[derive(Debug, Clone, Default)]
pub struct ContextIndex {
    modality_by_id: HashMap<String, Modality>,
}

impl ContextIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_event(&mut self, event: &Event) {
        self.modality_by_id.insert(event.id.clone(), event.modality);
        for team in &event.teams {
            self.modality_by_id.insert(team.id.clone(), event.modality);
        }
    }

    pub fn insert_game(&mut self, game: &Game, modality: Modality) {
        self.modality_by_id.insert(game.id.clone(), modality);
    }

    /// Modality of the event that produced `record`, resolved through its
    /// anchor id only.
    pub fn modality_of(&self, record: &ScoringEvent) -> Option<Modality> {
        record
            .anchor_id()
            .and_then(|id| self.modality_by_id.get(id).copied())
    }

    pub fn context_ids(&self) -> HashSet<String> {
        self.modality_by_id.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.modality_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modality_by_id.is_empty()
    }
}

/// Which metric a ranking run aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMode {
    /// Point totals over events of one modality.
    Points(Modality),
    /// Count of long-range makes over events of every modality.
    Shooters,
}

impl RankingMode {
    pub fn includes(&self, modality: Modality) -> bool {
        match self {
            RankingMode::Points(selected) => *selected == modality,
            RankingMode::Shooters => true,
        }
    }
}

impl FromStr for RankingMode {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shooters" | "arremessadores" => Ok(RankingMode::Shooters),
            other => Modality::from_str(other)
                .map(RankingMode::Points)
                .map_err(|_| StatsError::Validation(format!("unknown ranking mode: {}", s))),
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingMode::Points(modality) => write!(f, "{}", modality),
            RankingMode::Shooters => f.write_str("shooters"),
        }
    }
}

/// Made shots split by point value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotBreakdown {
    pub makes1: u32,
    pub makes2: u32,
    pub makes3: u32,
}

impl ShotBreakdown {
    pub fn record(&mut self, points: u8) {
        match points {
            1 => self.makes1 += 1,
            2 => self.makes2 += 1,
            3 => self.makes3 += 1,
            _ => {}
        }
    }

    pub fn points(&self) -> u32 {
        self.makes1 + 2 * self.makes2 + 3 * self.makes3
    }
}

/// Aggregated line for one player over a scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLine {
    pub player_id: String,
    pub player_name: String,
    /// Points in points mode, qualifying makes in shooters mode.
    pub total_metric: u32,
    #[serde(flatten)]
    pub shots: ShotBreakdown,
    pub games_played: u32,
    pub per_game_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScoreLine {
    pub player_id: String,
    pub player_name: String,
    pub points: u32,
    #[serde(flatten)]
    pub shots: ShotBreakdown,
}

impl From<PlayerLine> for BoxScoreLine {
    fn from(line: PlayerLine) -> Self {
        Self {
            player_id: line.player_id,
            player_name: line.player_name,
            points: line.total_metric,
            shots: line.shots,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub team_id: String,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub diff: i64,
}
