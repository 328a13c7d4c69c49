//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "hooprag")]
#[command(about = "Question answering over NBA game and box-score data")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add embedding columns and vector indexes to the stats tables
    Init,
    /// Embed every game and the most notable box scores
    Embed,
    /// Answer a questions file and write the answers file
    Batch {
        /// Questions file (default: batch.questions_path)
        #[arg(short, long)]
        questions: Option<PathBuf>,
        /// Answers file (default: batch.answers_path)
        #[arg(short, long)]
        answers: Option<PathBuf>,
    },
    /// Ask one question the way the HTTP API would
    Ask {
        /// The question to answer
        question: String,
    },
    /// Start the HTTP API server
    Serve {
        /// Host to bind (default: server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (default: server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current configuration
    Config,
}
