//! Builders for event and game documents as the portal stores them
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::{json, Map, Value};

// ============================================================================
// Event Documents
// ============================================================================

pub struct EventBuilder {
    id: String,
    body: Map<String, Value>,
    teams: Vec<Value>,
}

impl EventBuilder {
    pub fn new(id: &str, modality: &str, date: &str) -> Self {
        let mut body = Map::new();
        body.insert("modalidade".to_string(), json!(modality));
        body.insert("type".to_string(), json!("amistoso"));
        body.insert("data".to_string(), json!(date));
        Self {
            id: id.to_string(),
            body,
            teams: vec![],
        }
    }

    /// Mark the event as an internal tournament
    pub fn internal_tournament(mut self) -> Self {
        self.body
            .insert("type".to_string(), json!("torneio_interno"));
        self
    }

    pub fn with_team(mut self, id: &str, name: &str, players: &[&str]) -> Self {
        self.teams
            .push(json!({"id": id, "nomeTime": name, "jogadores": players}));
        self
    }

    /// Season-level roster used when a game records none
    pub fn with_roster(mut self, players: &[&str]) -> Self {
        self.body
            .insert("jogadoresEscalados".to_string(), json!(players));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn build(mut self) -> (String, Value) {
        if !self.teams.is_empty() {
            self.body.insert("times".to_string(), Value::Array(self.teams));
        }
        (self.id, Value::Object(self.body))
    }
}

// ============================================================================
// Game Documents
// ============================================================================

pub struct GameBuilder {
    id: String,
    body: Map<String, Value>,
}

impl GameBuilder {
    pub fn new(id: &str) -> Self {
        let mut body = Map::new();
        body.insert("status".to_string(), json!("finalizado"));
        body.insert("dataJogo".to_string(), json!("2025-06-01"));
        Self {
            id: id.to_string(),
            body,
        }
    }

    pub fn status(mut self, status: &str) -> Self {
        self.body.insert("status".to_string(), json!(status));
        self
    }

    /// Internal tournament pairing with final scores
    pub fn between(mut self, team_a: &str, score_a: u32, team_b: &str, score_b: u32) -> Self {
        self.body.insert("timeA_id".to_string(), json!(team_a));
        self.body.insert("timeB_id".to_string(), json!(team_b));
        self.body
            .insert("placarTimeA_final".to_string(), json!(score_a));
        self.body
            .insert("placarTimeB_final".to_string(), json!(score_b));
        self
    }

    /// Club game against an outside opponent
    pub fn against(mut self, opponent: &str, club_score: u32, opponent_score: u32) -> Self {
        self.body.insert("adversario".to_string(), json!(opponent));
        self.body
            .insert("placarANCB_final".to_string(), json!(club_score));
        self.body
            .insert("placarAdversario_final".to_string(), json!(opponent_score));
        self
    }

    pub fn with_roster(mut self, players: &[&str]) -> Self {
        self.body
            .insert("jogadoresEscalados".to_string(), json!(players));
        self
    }

    pub fn build(self) -> (String, Value) {
        (self.id, Value::Object(self.body))
    }
}
