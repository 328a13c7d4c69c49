//! Vector column setup

use crate::cli::output::*;
use crate::database::Database;
use crate::models::BOX_SCORE_TABLE;
use crate::models::GAME_TABLE;
use crate::AppConfig;
use crate::Result;

/// Add `embedding` columns and HNSW indexes, then report coverage.
pub async fn handle_init(config: &AppConfig) -> Result<()> {
    let db = Database::from_config(config).await?;
    db.verify_schema_or_error().await?;

    print_info(&format!(
        "Ensuring vector({}) columns and indexes...",
        config.embedding_dimension()
    ));
    db.ensure_vector_columns(config.embedding_dimension()).await?;

    for table in [GAME_TABLE, BOX_SCORE_TABLE] {
        let embedded = db.embedded_row_count(table).await?;
        print_info(&format!("{table}: {embedded} rows embedded"));
    }

    db.close().await;
    print_success("Vector columns and indexes are ready");
    Ok(())
}
