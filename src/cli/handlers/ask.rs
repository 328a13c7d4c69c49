//! One-off online question

use crate::api::ChatOutcome;
use crate::cli::output::*;
use crate::rag::RagService;
use crate::AppConfig;
use crate::Result;

/// Answer like `POST /api/chat` would, errors included.
pub async fn handle_ask(config: &AppConfig, question: &str) -> Result<()> {
    let rag = RagService::open(config).await?;
    print_info(&format!(
        "Routing: {} search",
        rag.online_target(question)
    ));

    let outcome = ChatOutcome::from(rag.answer_online(question).await);
    rag.close().await;

    if outcome.is_degraded() {
        print_warning("The pipeline failed; showing the degraded reply");
    }
    let response = outcome.into_chat_response();
    println!();
    println!("💬 {}", response.answer.trim());
    println!();
    print_evidence(&response.evidence);
    Ok(())
}
