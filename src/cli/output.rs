//! Output formatting for CLI commands

use crate::models::Evidence;
use crate::AppConfig;

/// Print configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 hooprag Configuration:");
    println!();

    println!("🗄️  Database:");
    println!("  URL: {}", mask_database_url(config.database_url()));
    println!("  Max connections: {}", config.max_connections());
    println!("  Min connections: {}", config.min_connections());
    println!("  Connection timeout: {}s", config.connection_timeout());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Directory: {}", config.logging.log_dir.display());
    println!();

    println!("🧠 Embeddings:");
    println!("  Endpoint: {}", config.embeddings.endpoint);
    println!("  Model: {}", config.embedding_model());
    println!("  Dimension: {}", config.embedding_dimension());
    println!();

    let options = &config.llm.options;
    println!("🤖 LLM:");
    println!("  Endpoint: {}", config.llm.endpoint);
    println!("  Model: {}", config.llm_model());
    println!(
        "  Options: num_predict={}, temperature={}, top_p={}, num_ctx={}",
        options.num_predict, options.temperature, options.top_p, options.num_ctx
    );
    println!("  Timeout: {}s", config.llm.timeout_secs);
    println!();

    let (batch, online) = (&config.retrieval.batch, &config.retrieval.online);
    println!("🔎 Retrieval (games / players / evidence):");
    println!("  Batch: {} / {} / {}", batch.games, batch.players, batch.evidence);
    println!("  Online: {} / {} / {}", online.games, online.players, online.evidence);
    println!();

    println!("📂 Batch:");
    println!("  Questions: {}", config.batch.questions_path.display());
    println!("  Answers: {}", config.batch.answers_path.display());
    println!("  Concurrency: {}", config.batch.concurrency);
    println!("  Fail fast: {}", config.batch.fail_fast);
    println!();

    println!("🌐 Server:");
    println!("  Address: {}", config.server_addr());
    println!("  CORS origin: {}", config.server.cors_origin);
}

/// Mask database URL for logging (hide password)
fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            format!(
                "{}://{}@{}:{}{}",
                parsed.scheme(),
                parsed.username(),
                host,
                parsed.port().unwrap_or(5432),
                parsed.path()
            )
        } else {
            "***masked***".to_string()
        }
    } else {
        "***invalid***".to_string()
    }
}

pub fn print_evidence(evidence: &[Evidence]) {
    if evidence.is_empty() {
        println!("📎 Evidence: none");
        return;
    }
    println!("📎 Evidence:");
    for item in evidence {
        println!("  {} #{}", item.table, item.id);
    }
}

/// Print colored output functions
pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}
