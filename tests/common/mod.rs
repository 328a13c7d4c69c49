//! Fakes and fixtures shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeZone;
use chrono::Utc;
use hooprag::embeddings::Embedder;
use hooprag::llm::TextGenerator;
use hooprag::models::GameHit;
use hooprag::models::GameRecord;
use hooprag::models::GameSummary;
use hooprag::models::PerformanceHit;
use hooprag::models::PerformanceSummary;
use hooprag::models::Player;
use hooprag::models::PlayerPerformance;
use hooprag::models::Team;
use hooprag::rag::RagService;
use hooprag::reference::ReferenceData;
use hooprag::store::MemoryStore;
use hooprag::store::StatsStore;
use hooprag::AppConfig;
use hooprag::HoopRagError;
use hooprag::Result;

pub const DIM: usize = 3;

/// Returns the same vector for every text.
pub struct FixedEmbedder {
    pub vector: Vec<f32>,
    pub calls: AtomicUsize,
}

impl FixedEmbedder {
    pub fn new(vector: Vec<f32>) -> Arc<Self> {
        Arc::new(Self {
            vector,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector.clone())
    }
}

pub struct DownEmbedder;

#[async_trait]
impl Embedder for DownEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(HoopRagError::HttpError(
            "error sending request: connection refused".to_string(),
        ))
    }
}

/// Replies with a fixed string and records every prompt.
pub struct ScriptedGenerator {
    reply: String,
    delay: Option<Duration>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            delay: Some(delay),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.reply.clone())
    }
}

/// Reference lookups work; every similarity query fails.
pub struct UnreachableStore;

#[async_trait]
impl StatsStore for UnreachableStore {
    async fn teams(&self) -> Result<Vec<Team>> {
        Ok(Vec::new())
    }

    async fn players(&self) -> Result<Vec<Player>> {
        Ok(Vec::new())
    }

    async fn nearest_games(&self, _query: &[f32], _k: usize) -> Result<Vec<GameHit>> {
        Err(HoopRagError::retrieval("connection reset by peer"))
    }

    async fn nearest_performances(&self, _query: &[f32], _k: usize) -> Result<Vec<PerformanceHit>> {
        Err(HoopRagError::retrieval("connection reset by peer"))
    }

    async fn game(&self, _game_id: i64) -> Result<Option<GameRecord>> {
        Err(HoopRagError::retrieval("connection reset by peer"))
    }

    async fn nearest_game_summaries(&self, _query: &[f32], _k: usize) -> Result<Vec<GameSummary>> {
        Err(HoopRagError::retrieval("connection reset by peer"))
    }

    async fn nearest_performance_summaries(
        &self,
        _query: &[f32],
        _k: usize,
    ) -> Result<Vec<PerformanceSummary>> {
        Err(HoopRagError::retrieval("connection reset by peer"))
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.embeddings.dimension = DIM;
    config
}

fn team(team_id: i64, city: &str, name: &str, abbreviation: &str) -> Team {
    Team {
        team_id,
        city: city.to_string(),
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
    }
}

/// Two games and one box score.
///
/// - game 15: LA Lakers (7) at Boston Celtics (3), 108-110, 2024-01-10, embedding `[1, 0, 0]`
/// - game 16: Boston at LA, 101-95, 2024-01-12, embedding `[0, 1, 0]`
/// - LeBron James in game 15, 31/11/12, embedding `[1, 0, 0]`
pub fn nba_store() -> MemoryStore {
    let mut store = MemoryStore::new(DIM);
    store.insert_team(team(3, "Boston", "Celtics", "BOS"));
    store.insert_team(team(7, "LA", "Lakers", "LAL"));
    store.insert_player(Player {
        player_id: 2544,
        first_name: "LeBron".to_string(),
        last_name: "James".to_string(),
    });

    store
        .insert_game(GameRecord {
            game_id: 15,
            season: 2023,
            game_timestamp: Utc.with_ymd_and_hms(2024, 1, 10, 0, 30, 0).unwrap(),
            home_team_id: 3,
            away_team_id: 7,
            home_points: 110,
            away_points: 108,
            embedding: Some(vec![1.0, 0.0, 0.0]),
        })
        .unwrap();
    store
        .insert_game(GameRecord {
            game_id: 16,
            season: 2023,
            game_timestamp: Utc.with_ymd_and_hms(2024, 1, 12, 3, 0, 0).unwrap(),
            home_team_id: 7,
            away_team_id: 3,
            home_points: 95,
            away_points: 101,
            embedding: Some(vec![0.0, 1.0, 0.0]),
        })
        .unwrap();
    store
        .insert_performance(PlayerPerformance {
            game_id: 15,
            person_id: 2544,
            team_id: 7,
            starter: true,
            seconds: 2250,
            points: 31,
            fg2_made: 9,
            fg2_attempted: 15,
            fg3_made: 3,
            fg3_attempted: 7,
            ft_made: 4,
            ft_attempted: 5,
            offensive_reb: 2,
            defensive_reb: 9,
            assists: 12,
            steals: 2,
            blocks: 1,
            turnovers: 4,
            defensive_fouls: 2,
            offensive_fouls: 0,
            embedding: Some(vec![1.0, 0.0, 0.0]),
        })
        .unwrap();
    store
}

/// Builds a service over `store`, loading reference data from it.
pub async fn service(
    config: &AppConfig,
    store: Arc<dyn StatsStore>,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn TextGenerator>,
) -> RagService {
    let refs = ReferenceData::load(store.as_ref()).await.unwrap();
    RagService::from_parts(config, store, embedder, generator, refs)
}
