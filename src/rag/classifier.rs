//! Keyword routing of questions to a target table

use serde::Deserialize;
use serde::Serialize;

/// Which table a question is answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchTarget {
    /// `game_details`
    Game,
    /// `player_box_scores`
    Player,
}

impl std::fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Game => write!(f, "GAME"),
            Self::Player => write!(f, "PLAYER"),
        }
    }
}

/// Case-insensitive substring match against a configurable keyword set.
///
/// Any hit routes to [`SearchTarget::Player`]; everything else, including an
/// empty question, routes to [`SearchTarget::Game`].
#[derive(Debug, Clone)]
pub struct QuestionClassifier {
    keywords: Vec<String>,
}

impl QuestionClassifier {
    /// Empty keywords are dropped since they would match every question.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn classify(&self, question: &str) -> SearchTarget {
        classify(question, &self.keywords)
    }
}

/// `keywords` must already be lower-case.
pub fn classify<S: AsRef<str>>(question: &str, keywords: &[S]) -> SearchTarget {
    let question = question.to_lowercase();
    if keywords.iter().any(|k| question.contains(k.as_ref())) {
        SearchTarget::Player
    } else {
        SearchTarget::Game
    }
}
