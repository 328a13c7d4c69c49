//! Prompting the generator and shaping what comes back

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::config::BatchConfig;
use crate::llm::TextGenerator;
use crate::models::Evidence;
use crate::models::Question;
use crate::Result;

/// Which JSON shape a batch question must be answered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    /// `{"points": n}` or `{"winner": "...", "score": "..."}`
    Game,
    /// `{"player_name": "...", "points": n}`
    Player,
    /// `{"player_name": "...", "points": n, "rebounds": n, "assists": n}`
    TripleDouble,
}

impl QuestionCategory {
    /// Ids not listed under `game_question_ids` or `triple_double_question_ids`
    /// are player questions.
    pub fn for_question(id: i64, config: &BatchConfig) -> Self {
        if config.triple_double_question_ids.contains(&id) {
            Self::TripleDouble
        } else if config.game_question_ids.contains(&id) {
            Self::Game
        } else {
            Self::Player
        }
    }

    fn format_instructions(self) -> &'static str {
        match self {
            Self::Game => r#"{"points": number} or {"winner": "Team Name", "score": "XXX-XXX"}"#,
            Self::Player => r#"{"player_name": "First Last", "points": number}"#,
            Self::TripleDouble => {
                r#"{"player_name": "First Last", "points": number, "rebounds": number, "assists": number}"#
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameAnswer {
    Result { winner: String, score: String },
    Points { points: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAnswer {
    pub player_name: String,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleDoubleAnswer {
    pub player_name: String,
    pub points: i64,
    pub rebounds: i64,
    pub assists: i64,
}

/// A batch answer.
///
/// Serializes without a tag, so a record reads `{"winner": ..., "score": ...,
/// "evidence": [...]}` or `{"raw_answer": ..., "evidence": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructuredAnswer {
    TripleDouble(TripleDoubleAnswer),
    Player(PlayerAnswer),
    Game(GameAnswer),
    /// Model output that was not the expected JSON, verbatim.
    Raw { raw_answer: String },
}

impl StructuredAnswer {
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw { .. })
    }

    /// Accept `raw` only if it parses into the shape `category` expects.
    ///
    /// Never fails: anything else becomes [`StructuredAnswer::Raw`] holding
    /// `raw` unchanged.
    pub fn parse(raw: &str, category: QuestionCategory) -> Self {
        let cleaned = strip_code_fences(raw);
        let parsed = serde_json::from_str::<serde_json::Value>(cleaned).and_then(|value| {
            match category {
                QuestionCategory::Game => serde_json::from_value(value).map(Self::Game),
                QuestionCategory::Player => serde_json::from_value(value).map(Self::Player),
                QuestionCategory::TripleDouble => {
                    serde_json::from_value(value).map(Self::TripleDouble)
                }
            }
        });

        parsed.unwrap_or_else(|e| {
            debug!("Generation output rejected as {:?}: {}", category, e);
            Self::Raw {
                raw_answer: raw.to_string(),
            }
        })
    }
}

/// Remove Markdown code fences around a JSON reply.
///
/// Only applies when the reply starts with a fence; a fence inside prose is left alone.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let inner = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    inner.trim_end().strip_suffix("```").unwrap_or(inner).trim()
}

/// A structured answer with the rows it was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    #[serde(flatten)]
    pub answer: StructuredAnswer,
    pub evidence: Vec<Evidence>,
}

/// One entry of the answers file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: i64,
    pub result: AnswerResult,
}

/// Free-text answer for the online path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineAnswer {
    pub answer: String,
    pub evidence: Vec<Evidence>,
}

pub fn batch_prompt(question: &Question, context: &str, category: QuestionCategory) -> String {
    format!(
        r"You are an NBA statistics expert. Answer the question using ONLY the provided context.

IMPORTANT: Your response must be valid JSON in this exact format:
{}

Context:
{context}

Question: {}

Answer (JSON only):",
        category.format_instructions(),
        question.question
    )
}

pub fn online_prompt(question: &str, context: &str) -> String {
    format!(
        "NBA Data:\n{}\n\nQ: {question}\nA: Based on this data,",
        context.trim()
    )
}

/// Reply used when the online path retrieved nothing.
pub fn no_data_message(question: &str) -> String {
    format!("No specific data found for: {question}")
}

/// Wraps a [`TextGenerator`] with the two prompting modes.
#[derive(Clone)]
pub struct AnswerGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl AnswerGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// JSON-mode answer. Calls the generator even when `context` is empty.
    ///
    /// # Errors
    /// Only generator failures; unusable output becomes [`StructuredAnswer::Raw`].
    pub async fn generate_structured(
        &self,
        question: &Question,
        context: &str,
        category: QuestionCategory,
    ) -> Result<StructuredAnswer> {
        let prompt = batch_prompt(question, context, category);
        let raw = self.generator.generate(&prompt).await?;

        let answer = StructuredAnswer::parse(&raw, category);
        if answer.is_raw() {
            warn!(
                "Could not parse JSON for question {}, using raw answer",
                question.id
            );
        }
        Ok(answer)
    }

    /// Free-text answer. An empty context short-circuits to
    /// [`no_data_message`] without calling the generator.
    pub async fn generate_online(&self, question: &str, context: &str) -> Result<String> {
        if context.trim().is_empty() {
            debug!("Empty context, skipping generation");
            return Ok(no_data_message(question));
        }
        self.generator
            .generate(&online_prompt(question, context))
            .await
    }
}
