//! # Juris CLI (`juris`)
//!
//! The `juris` binary serves the legal-assistant HTTP API and exposes
//! the same components directly for one-off use from the terminal.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `juris serve` | Start the JSON HTTP API |
//! | `juris ask "<question>"` | Answer a question against the knowledge base |
//! | `juris lookup --article 5` | Substring lookup by article or topic |
//! | `juris summarize-pdf <file>` | Summarize a local PDF |
//! | `juris summarize-video <url>` | Summarize a video by its transcript |
//!
//! All commands accept a `--config` flag pointing to a TOML
//! configuration file; see `config/juris.example.toml`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use juris::config::load_config;
use juris::format::{context_from_matches, format_natural};
use juris::lemma::FoldingLemmatizer;
use juris::llm::LlmClient;
use juris::lookup::{find_by_article, find_by_topic};
use juris::matcher::relevant_entries;
use juris::models::{Category, Dataset};
use juris::server::{run_server, AppState};
use juris::summarize::{summarize_pdf, summarize_video};
use juris::transcript::TimedTextFetcher;

/// Juris — a legal-assistant backend for consultation retrieval,
/// question answering, and document summarization.
#[derive(Parser)]
#[command(
    name = "juris",
    about = "Juris — legal-assistant backend: retrieval, question answering, summarization",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/juris.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the JSON HTTP API.
    Serve,

    /// Answer a legal question against the knowledge base.
    Ask {
        question: String,
        /// Knowledge category: consulta, analise_situacao or analise_contrato.
        #[arg(long, default_value = "consulta")]
        category: String,
    },

    /// Look up knowledge entries by article identifier or topic.
    Lookup {
        #[arg(long)]
        article: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long, default_value = "consulta")]
        category: String,
    },

    /// Summarize a local PDF file.
    SummarizePdf { file: PathBuf },

    /// Summarize a video by its transcript.
    SummarizeVideo { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("juris=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            let dataset = Arc::new(Dataset::load(&config.knowledge));
            let llm = Arc::new(LlmClient::new(&config.llm)?);
            let transcripts = Arc::new(TimedTextFetcher::new(config.transcript.timeout_secs)?);
            let state = AppState {
                config: Arc::new(config),
                dataset,
                llm,
                lemmatizer: Arc::new(FoldingLemmatizer::new()),
                transcripts,
            };
            run_server(state).await
        }

        Commands::Ask { question, category } => {
            let category: Category = category.parse()?;
            let dataset = Dataset::load(&config.knowledge);
            let entries = dataset.entries(category);
            let lemmatizer = FoldingLemmatizer::new();

            let results = relevant_entries(&lemmatizer, &question, entries);
            println!("{}\n", format_natural(&results));

            let llm = LlmClient::new(&config.llm)?;
            let context = context_from_matches(&results, entries);
            let answer = llm.answer(&question, &context).await?;
            println!("{}", answer);
            Ok(())
        }

        Commands::Lookup {
            article,
            topic,
            category,
        } => {
            let category: Category = category.parse()?;
            let dataset = Dataset::load(&config.knowledge);
            let hits = match (&article, &topic) {
                (Some(article), _) => find_by_article(&dataset, article, category),
                (None, Some(topic)) => find_by_topic(&dataset, topic, category),
                (None, None) => anyhow::bail!("provide --article or --topic"),
            };
            if hits.is_empty() {
                println!("Nenhum resultado encontrado.");
            } else {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            }
            Ok(())
        }

        Commands::SummarizePdf { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read PDF: {}", file.display()))?;
            let llm = LlmClient::new(&config.llm)?;
            let summary = summarize_pdf(&llm, &bytes).await?;
            println!("{}", summary.summary);
            if let Some(screening) = summary.screening {
                println!("\n{}", screening);
            }
            Ok(())
        }

        Commands::SummarizeVideo { url } => {
            let llm = LlmClient::new(&config.llm)?;
            let fetcher = TimedTextFetcher::new(config.transcript.timeout_secs)?;
            let summary =
                summarize_video(&llm, &fetcher, &url, &config.transcript.languages).await?;
            println!("{}", summary.summary);
            Ok(())
        }
    }
}
