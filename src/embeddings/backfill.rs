//! Backfill embeddings for games and notable box scores

use std::pin::pin;

use futures::stream;
use futures::Stream;
use futures::StreamExt;
use tracing::info;

use super::check_dimension;
use super::text::game_row_text;
use super::text::player_row_text;
use super::Embedder;
use crate::config::AppConfig;
use crate::database::Database;
use crate::errors::HoopRagError;
use crate::reference::ReferenceData;
use crate::Result;

/// Outcome of one backfill run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BackfillStats {
    pub games_updated: usize,
    pub performances_updated: usize,
}

/// Embed `texts` with up to `concurrency` requests in flight.
///
/// Yields one result per text, in input order.
pub fn embed_texts<'a>(
    embedder: &'a dyn Embedder,
    texts: Vec<String>,
    dimension: usize,
    concurrency: usize,
) -> impl Stream<Item = Result<Vec<f32>>> + 'a {
    stream::iter(texts)
        .map(move |text| async move {
            let embedding = embedder.embed(&text).await?;
            check_dimension(&embedding, dimension)?;
            Ok::<_, HoopRagError>(embedding)
        })
        .buffered(concurrency.max(1))
}

/// Embed every game and the most notable box scores.
///
/// Adds the vector columns and indexes first, so this also works on a freshly
/// loaded dataset. Provider failures abort the run; rows already written stay written.
pub async fn backfill_embeddings(
    db: &Database,
    embedder: &dyn Embedder,
    config: &AppConfig,
) -> Result<BackfillStats> {
    info!("Starting embeddings backfill");

    let dimension = config.embedding_dimension();
    let progress_every = config.backfill.progress_every.max(1);
    db.ensure_vector_columns(dimension).await?;

    let refs = ReferenceData::load(db).await?;
    let mut stats = BackfillStats::default();

    let concurrency = config.backfill.concurrency;

    let games = db.list_games_for_embedding().await?;
    info!("Processing {} game_details rows", games.len());
    let texts = games.iter().map(|g| game_row_text(g, &refs)).collect();
    let mut embeddings = pin!(embed_texts(embedder, texts, dimension, concurrency));
    for (i, game) in games.iter().enumerate() {
        if i % progress_every == 0 {
            info!("  Processed {}/{} games...", i, games.len());
        }
        let Some(embedding) = embeddings.next().await else {
            break;
        };
        db.store_game_embedding(game.game_id, &embedding?).await?;
        stats.games_updated += 1;
    }

    let performances = db
        .list_notable_performances(config.backfill.player_limit)
        .await?;
    info!("Processing {} player_box_scores rows", performances.len());
    let texts = performances
        .iter()
        .map(|p| player_row_text(p, &refs))
        .collect();
    let mut embeddings = pin!(embed_texts(embedder, texts, dimension, concurrency));
    for (i, performance) in performances.iter().enumerate() {
        if i % progress_every == 0 {
            info!(
                "  Processed {}/{} player performances...",
                i,
                performances.len()
            );
        }
        let Some(embedding) = embeddings.next().await else {
            break;
        };
        db.store_performance_embedding(performance.game_id, performance.person_id, &embedding?)
            .await?;
        stats.performances_updated += 1;
    }

    info!(
        "Backfill complete: {} game_details rows, {} player_box_scores rows",
        stats.games_updated, stats.performances_updated
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    /// Embeds a text as `[len, 0]`; shorter texts take longer.
    struct LengthEmbedder {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl LengthEmbedder {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Embedder for LengthEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            let delay = 40_u64.saturating_sub(text.len() as u64 * 10);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![text.len() as f32, 0.0])
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_embed_texts_keeps_input_order() {
        let embedder = LengthEmbedder::new();
        let results: Vec<Result<Vec<f32>>> =
            embed_texts(&embedder, texts(&["a", "bbb", "cc", "dddd"]), 2, 4)
                .collect()
                .await;

        let lengths: Vec<f32> = results.into_iter().map(|r| r.unwrap()[0]).collect();
        assert_eq!(lengths, vec![1.0, 3.0, 2.0, 4.0]);
        assert!(embedder.peak.load(Ordering::SeqCst) > 1);
        assert!(embedder.peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn test_embed_texts_respects_concurrency_limit() {
        let embedder = LengthEmbedder::new();
        let results: Vec<Result<Vec<f32>>> =
            embed_texts(&embedder, texts(&["a", "b", "c", "d", "e"]), 2, 2)
                .collect()
                .await;

        assert_eq!(results.len(), 5);
        assert_eq!(embedder.peak.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_embed_texts_checks_dimension() {
        let embedder = LengthEmbedder::new();
        let mut results = pin!(embed_texts(&embedder, texts(&["a"]), 768, 1));

        let err = results.next().await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            HoopRagError::DimensionMismatch {
                expected: 768,
                actual: 2
            }
        ));
    }
}
