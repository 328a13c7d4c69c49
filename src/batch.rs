//! Questions file in, answers file out

use std::path::Path;

use tracing::info;

use crate::models::Question;
use crate::rag::AnswerRecord;
use crate::Result;

/// Read a JSON array of `{id, question}`.
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<Question>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&content)?;
    info!("Loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Write a pretty-printed JSON array of `{id, result}`, creating parent
/// directories as needed.
pub fn write_answers<P: AsRef<Path>>(path: P, answers: &[AnswerRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(answers)?;
    std::fs::write(path, content)?;
    info!("Results saved to: {}", path.display());
    Ok(())
}
