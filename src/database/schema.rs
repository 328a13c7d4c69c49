use super::Database;
use crate::errors::HoopRagError;
use crate::models::BOX_SCORE_TABLE;
use crate::models::GAME_TABLE;
use crate::Result;

impl Database {
    /// Check that the source tables exist.
    /// Returns the names of any that are missing.
    pub async fn missing_tables(&self) -> Result<Vec<&'static str>> {
        let mut missing = Vec::new();

        for table_name in ["teams", "players", GAME_TABLE, BOX_SCORE_TABLE] {
            let exists = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

            if !exists {
                tracing::debug!("Missing required table: {}", table_name);
                missing.push(table_name);
            }
        }

        Ok(missing)
    }

    /// Verify the source tables or return a helpful error
    pub async fn verify_schema_or_error(&self) -> Result<()> {
        let missing = self.missing_tables().await?;
        if !missing.is_empty() {
            return Err(HoopRagError::Custom(format!(
                "Database is missing tables: {}. Load the NBA dataset before running hooprag.",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Add the embedding columns and their HNSW cosine indexes.
    ///
    /// Idempotent. The base tables are owned by the dataset loader and are
    /// never created here.
    pub async fn ensure_vector_columns(&self, dimension: usize) -> Result<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await?;

        for table in [GAME_TABLE, BOX_SCORE_TABLE] {
            // DDL cannot take bind parameters; table names are constants and
            // the dimension is an integer.
            sqlx::query(&format!(
                "ALTER TABLE IF EXISTS {table} ADD COLUMN IF NOT EXISTS embedding vector({dimension})"
            ))
            .execute(&self.pool)
            .await?;

            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_embedding ON {table} \
                 USING hnsw (embedding vector_cosine_ops)"
            ))
            .execute(&self.pool)
            .await?;

            tracing::info!("Vector column and index ready on {}", table);
        }

        Ok(())
    }

    /// Number of rows in `table` that already carry an embedding.
    pub async fn embedded_row_count(&self, table: &'static str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM {table} WHERE embedding IS NOT NULL"
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
