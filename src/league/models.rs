use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};

/// Game format of an event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Modality {
    #[serde(rename = "3x3")]
    #[strum(serialize = "3x3")]
    ThreeOnThree,
    #[serde(rename = "5x5")]
    #[strum(serialize = "5x5")]
    FiveOnFive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum EventType {
    #[serde(rename = "amistoso")]
    Friendly,
    #[serde(rename = "torneio_interno")]
    InternalTournament,
    #[serde(rename = "torneio_externo")]
    ExternalTournament,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "agendado")]
    Scheduled,
    #[serde(rename = "andamento")]
    InProgress,
    #[serde(rename = "finalizado")]
    Finished,
    #[serde(other)]
    Unknown,
}

impl GameStatus {
    /// Whether the game has tipped off (live or finished).
    pub fn has_started(&self) -> bool {
        matches!(self, GameStatus::InProgress | GameStatus::Finished)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    #[serde(rename = "nomeTime", default)]
    pub name: String,
    #[serde(rename = "jogadores", default)]
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "modalidade")]
    pub modality: Modality,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(rename = "data", default)]
    pub date: Option<String>,
    #[serde(rename = "times", default)]
    pub teams: Vec<Team>,
    #[serde(rename = "jogadoresEscalados", default)]
    pub roster: Option<Vec<String>>,
}

impl Event {
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl Player {
    /// Players without a status predate the field and are treated as active.
    pub fn is_active(&self) -> bool {
        match self.status.as_deref() {
            None => true,
            Some(status) => matches!(
                status.trim().to_lowercase().as_str(),
                "ativo" | "active"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSlot {
    pub id: String,
    pub name: Option<String>,
}

/// The two score shapes a game document can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Matchup {
    /// The club against an outside opponent.
    External {
        opponent: Option<String>,
        club_score: u32,
        opponent_score: u32,
    },
    /// Two registered teams of an internal tournament.
    Internal {
        team_a: TeamSlot,
        team_b: TeamSlot,
        score_a: u32,
        score_b: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub id: String,
    pub event_id: String,
    pub date: Option<String>,
    pub status: GameStatus,
    pub roster: Option<Vec<String>>,
    pub matchup: Matchup,
}

impl Game {
    pub fn team_ids(&self) -> Option<(&str, &str)> {
        match &self.matchup {
            Matchup::Internal { team_a, team_b, .. } => {
                Some((team_a.id.as_str(), team_b.id.as_str()))
            }
            Matchup::External { .. } => None,
        }
    }

    /// Explicit per-game roster, if one was recorded and is non-empty.
    pub fn explicit_roster(&self) -> Option<&[String]> {
        self.roster.as_deref().filter(|r| !r.is_empty())
    }
}

/// Returns the authoritative `(side A, side B)` score of a game. For external
/// games side A is the club.
pub fn resolve_score(game: &Game) -> (u32, u32) {
    match &game.matchup {
        Matchup::External {
            club_score,
            opponent_score,
            ..
        } => (*club_score, *opponent_score),
        Matchup::Internal {
            score_a, score_b, ..
        } => (*score_a, *score_b),
    }
}

/// Raw shape of a game document. Both score pairs are optional because the
/// stored documents carry whichever pair the recording screen wrote.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GameDocument {
    pub id: String,
    #[serde(rename = "dataJogo", default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(rename = "jogadoresEscalados", default)]
    pub roster: Option<Vec<String>>,
    #[serde(rename = "adversario", default)]
    pub opponent: Option<String>,
    #[serde(rename = "placarANCB_final", default, deserialize_with = "lenient_u32")]
    pub club_score: Option<u32>,
    #[serde(
        rename = "placarAdversario_final",
        default,
        deserialize_with = "lenient_u32"
    )]
    pub opponent_score: Option<u32>,
    #[serde(rename = "timeA_id", default)]
    pub team_a_id: Option<String>,
    #[serde(rename = "timeA_nome", default)]
    pub team_a_name: Option<String>,
    #[serde(rename = "timeB_id", default)]
    pub team_b_id: Option<String>,
    #[serde(rename = "timeB_nome", default)]
    pub team_b_name: Option<String>,
    #[serde(rename = "placarTimeA_final", default, deserialize_with = "lenient_u32")]
    pub team_a_score: Option<u32>,
    #[serde(rename = "placarTimeB_final", default, deserialize_with = "lenient_u32")]
    pub team_b_score: Option<u32>,
}

impl GameDocument {
    pub fn into_game(self, event_id: &str) -> Game {
        let internal = (self.team_a_score, self.team_b_score);
        let external = (self.club_score, self.opponent_score);
        let team_a = non_empty(self.team_a_id);
        let team_b = non_empty(self.team_b_id);

        let matchup = match (team_a, team_b) {
            (Some(a), Some(b)) => {
                let (score_a, score_b) = pick_score_pair(internal, external);
                Matchup::Internal {
                    team_a: TeamSlot {
                        id: a,
                        name: self.team_a_name,
                    },
                    team_b: TeamSlot {
                        id: b,
                        name: self.team_b_name,
                    },
                    score_a,
                    score_b,
                }
            }
            _ => {
                let (club_score, opponent_score) = pick_score_pair(external, internal);
                Matchup::External {
                    opponent: self.opponent,
                    club_score,
                    opponent_score,
                }
            }
        };

        Game {
            id: self.id,
            event_id: event_id.to_string(),
            date: self.date,
            status: self.status,
            roster: self.roster,
            matchup,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_populated(pair: (Option<u32>, Option<u32>)) -> bool {
    pair.0.unwrap_or(0) != 0 || pair.1.unwrap_or(0) != 0
}

/// The primary pair wins when either side is populated with a non-zero value;
/// otherwise the fallback pair is used if it is, and a 0-0 primary if neither is.
fn pick_score_pair(primary: (Option<u32>, Option<u32>), fallback: (Option<u32>, Option<u32>)) -> (u32, u32) {
    let chosen = if !is_populated(primary) && is_populated(fallback) {
        fallback
    } else {
        primary
    };
    (chosen.0.unwrap_or(0), chosen.1.unwrap_or(0))
}

/// Reads a non-negative integer stored as a JSON number or a numeric string.
pub(crate) fn value_as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_u32))
}
