//! Embedding backfill

use crate::cli::output::*;
use crate::database::Database;
use crate::embeddings::backfill_embeddings;
use crate::embeddings::EmbeddingClient;
use crate::AppConfig;
use crate::Result;

pub async fn handle_embed(config: &AppConfig) -> Result<()> {
    let db = Database::from_config(config).await?;
    db.verify_schema_or_error().await?;
    let client = EmbeddingClient::from_config(config)?;

    print_info(&format!(
        "Embedding with {} (dimension {})",
        client.model(),
        config.embedding_dimension()
    ));

    let result = backfill_embeddings(&db, &client, config).await;
    db.close().await;
    let stats = result?;

    print_success(&format!(
        "Embedded {} games and {} player performances",
        stats.games_updated, stats.performances_updated
    ));
    Ok(())
}
