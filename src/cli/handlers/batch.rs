//! Batch question answering

use std::path::PathBuf;

use crate::batch::load_questions;
use crate::batch::write_answers;
use crate::cli::output::*;
use crate::rag::RagService;
use crate::AppConfig;
use crate::Result;

pub async fn handle_batch(
    config: &AppConfig,
    questions: Option<PathBuf>,
    answers: Option<PathBuf>,
) -> Result<()> {
    let questions_path = questions.unwrap_or_else(|| config.batch.questions_path.clone());
    let answers_path = answers.unwrap_or_else(|| config.batch.answers_path.clone());

    let questions = load_questions(&questions_path)?;
    print_info(&format!(
        "Answering {} questions from {}",
        questions.len(),
        questions_path.display()
    ));

    let rag = RagService::open(config).await?;
    let result = rag.run_batch(&questions).await;
    rag.close().await;
    let records = result?;

    let raw = records.iter().filter(|r| r.result.answer.is_raw()).count();
    if raw > 0 {
        print_warning(&format!("{raw} answers could not be parsed as JSON"));
    }

    write_answers(&answers_path, &records)?;
    print_success(&format!(
        "Generated answers for {} questions, saved to {}",
        records.len(),
        answers_path.display()
    ));
    Ok(())
}
