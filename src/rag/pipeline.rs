//! Question answering: Embed -> Route -> Retrieve -> Render -> Generate

use std::sync::Arc;

use futures::stream;
use futures::StreamExt;
use tracing::debug;
use tracing::error;
use tracing::info;

use super::answer::AnswerGenerator;
use super::answer::AnswerRecord;
use super::answer::AnswerResult;
use super::answer::OnlineAnswer;
use super::answer::QuestionCategory;
use super::classifier::QuestionClassifier;
use super::classifier::SearchTarget;
use super::context::ContextBuilder;
use super::retriever::Retriever;
use crate::config::AppConfig;
use crate::database::Database;
use crate::embeddings::check_dimension;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingClient;
use crate::llm::LlmService;
use crate::llm::TextGenerator;
use crate::models::Question;
use crate::reference::ReferenceData;
use crate::store::StatsStore;
use crate::Result;

/// Everything one run needs, constructed once and borrowed by every question.
pub struct RagService {
    config: AppConfig,
    embedder: Arc<dyn Embedder>,
    retriever: Retriever,
    context_builder: ContextBuilder,
    answer_generator: AnswerGenerator,
    batch_classifier: QuestionClassifier,
    online_classifier: QuestionClassifier,
    database: Option<Database>,
}

impl RagService {
    /// Connect to Postgres, build both Ollama clients and load reference data.
    ///
    /// # Errors
    /// - Database connection errors, or missing tables
    /// - HTTP client configuration errors
    pub async fn open(config: &AppConfig) -> Result<Self> {
        let database = Database::from_config(config).await?;
        database.verify_schema_or_error().await?;

        let embedder = Arc::new(EmbeddingClient::from_config(config)?);
        let generator = Arc::new(LlmService::from_config(config)?);
        let refs = ReferenceData::load(&database).await?;

        let store: Arc<dyn StatsStore> = Arc::new(database.clone());
        let mut service = Self::from_parts(config, store, embedder, generator, refs);
        service.database = Some(database);

        info!(
            "RAG service ready (embeddings: {}, llm: {})",
            config.embedding_model(),
            config.llm_model()
        );
        Ok(service)
    }

    /// Assemble a service from existing collaborators.
    #[must_use]
    pub fn from_parts(
        config: &AppConfig,
        store: Arc<dyn StatsStore>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn TextGenerator>,
        refs: ReferenceData,
    ) -> Self {
        Self {
            config: config.clone(),
            embedder,
            retriever: Retriever::new(store, config.embedding_dimension()),
            context_builder: ContextBuilder::new(Arc::new(refs)),
            answer_generator: AnswerGenerator::new(generator),
            batch_classifier: QuestionClassifier::new(&config.classifier.batch_keywords),
            online_classifier: QuestionClassifier::new(&config.classifier.online_keywords),
            database: None,
        }
    }

    /// Release the connection pool, if this service owns one.
    pub async fn close(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub const fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    pub const fn context_builder(&self) -> &ContextBuilder {
        &self.context_builder
    }

    async fn embed_question(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.embedder.embed(text).await?;
        check_dimension(&embedding, self.config.embedding_dimension())?;
        Ok(embedding)
    }

    /// Answer one batch question as a JSON-shaped record.
    ///
    /// Empty retrieval still reaches the generator with an empty context.
    ///
    /// # Errors
    /// - Embedding or generation failures
    /// - Store failures while retrieving or looking up games
    pub async fn answer_question(&self, question: &Question) -> Result<AnswerRecord> {
        let limits = &self.config.retrieval.batch;

        debug!("Step 1: Embedding question {}", question.id);
        let query = self.embed_question(&question.question).await?;

        let target = self.batch_classifier.classify(&question.question);
        info!("Question {} routed to {} search", question.id, target);

        debug!("Step 2: Retrieving rows");
        let rows = self.retriever.retrieve(&query, target, limits).await?;

        debug!("Step 3: Building context from {} rows", rows.len());
        let context = self
            .context_builder
            .build(&rows, self.retriever.store())
            .await?;

        debug!("Step 4: Generating answer");
        let category = QuestionCategory::for_question(question.id, &self.config.batch);
        let answer = self
            .answer_generator
            .generate_structured(question, &context, category)
            .await?;

        Ok(AnswerRecord {
            id: question.id,
            result: AnswerResult {
                answer,
                evidence: rows.evidence(limits.evidence),
            },
        })
    }

    /// Answer every question, keeping input order.
    ///
    /// With `batch.fail_fast` the first failure aborts the run; otherwise the
    /// failing question is logged and left out of the output.
    pub async fn run_batch(&self, questions: &[Question]) -> Result<Vec<AnswerRecord>> {
        let total = questions.len();
        let concurrency = self.config.batch.concurrency.max(1);
        info!(
            "Answering {} questions (concurrency {})",
            total, concurrency
        );

        let mut answers = stream::iter(questions.iter().enumerate())
            .map(|(i, question)| async move {
                info!(
                    "Processing question {}/{} (id {}): {}",
                    i + 1,
                    total,
                    question.id,
                    preview(&question.question)
                );
                (question.id, self.answer_question(question).await)
            })
            .buffered(concurrency);

        let mut records = Vec::with_capacity(total);
        while let Some((id, outcome)) = answers.next().await {
            match outcome {
                Ok(record) => records.push(record),
                Err(e) if self.config.batch.fail_fast => {
                    error!("Question {} failed, aborting run: {}", id, e);
                    return Err(e);
                }
                Err(e) => error!("Question {} failed, skipping: {}", id, e),
            }
        }

        info!("Generated answers for {}/{} questions", records.len(), total);
        Ok(records)
    }

    /// Answer a live question in free text.
    ///
    /// # Errors
    /// Same failures as [`Self::answer_question`]; the caller decides how to
    /// surface them.
    pub async fn answer_online(&self, question: &str) -> Result<OnlineAnswer> {
        let limits = &self.config.retrieval.online;

        let query = self.embed_question(question).await?;
        let target = self.online_classifier.classify(question);
        info!("Question routing: {} search for: {}", target, preview(question));

        let rows = self
            .retriever
            .retrieve_summaries(&query, target, limits)
            .await?;
        debug!("Found {} {} rows", rows.len(), target);

        let context = self.context_builder.build_online(&rows);
        let answer = self
            .answer_generator
            .generate_online(question, &context)
            .await?;

        Ok(OnlineAnswer {
            answer,
            evidence: rows.evidence(limits.evidence),
        })
    }

    /// Routing decision the online path would make, without side effects.
    pub fn online_target(&self, question: &str) -> SearchTarget {
        self.online_classifier.classify(question)
    }
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 50;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(MAX_CHARS).collect::<String>())
    }
}
