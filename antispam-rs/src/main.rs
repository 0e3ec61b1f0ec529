//! antispam: spam filter for chat messages
//!
//! # Usage
//!
//! ```bash
//! # Filter "<user_id> <text>" lines from stdin
//! antispam --config config.toml run < messages.txt
//!
//! # Classify a single message
//! antispam check "buy cheap pills now"
//!
//! # Print training and trust list statistics
//! antispam stats
//! ```

use anyhow::Context;
use antispam_rs::classifier::{Corpus, NaiveBayes, Tokenizer, TrainingSummary};
use antispam_rs::config::{Config, LoggingConfig};
use antispam_rs::filter::{LineSource, LogAction, MessageFilter};
use antispam_rs::trust::TrustStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "antispam")]
#[command(about = "Naive Bayes spam filter with sender trust list", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter messages read from stdin (default)
    Run,
    /// Classify one message and print the scores
    Check {
        /// Message text
        text: String,
    },
    /// Print training and trust list statistics as JSON
    Stats,
}

#[derive(serde::Serialize)]
struct Stats<'a> {
    training: &'a TrainingSummary,
    excluded_words: usize,
    trusted_senders: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if cli.config.exists() {
        Config::from_file(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?
    } else {
        Config::default()
    };

    init_logging(&config.logging)?;
    info!("Starting antispam v{}", env!("CARGO_PKG_VERSION"));
    if !cli.config.exists() {
        info!("No config file found at {}, using defaults", cli.config.display());
    }

    let (classifier, summary) = train_classifier(&config)?;
    let trust = load_trust_store(&config).await;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let filter = MessageFilter::new(Arc::new(classifier), Arc::new(trust), &config.filter);
            let mut source = LineSource::stdin();
            let stats = filter.run(&mut source, Arc::new(LogAction)).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Check { text } => match classifier.score(&text) {
            Some(score) => println!(
                "spam={} log_p_spam={:.4} log_p_ham={:.4}",
                score.is_spam(),
                score.spam,
                score.ham
            ),
            None => println!("spam=false (no evidence)"),
        },
        Commands::Stats => {
            let stats = Stats {
                training: &summary,
                excluded_words: classifier.tokenizer().excluded_count(),
                trusted_senders: trust.trusted_count().await,
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(&logging.level)))
        .context("Invalid logging.level")?;

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        // Config::validate only lets "pretty" through here
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}

/// Filter used when RUST_LOG is unset. The binary logs under its own target
/// `antispam`, the library under `antispam_rs`.
fn default_directives(level: &str) -> String {
    format!("antispam_rs={0},antispam={0}", level)
}

fn train_classifier(config: &Config) -> anyhow::Result<(NaiveBayes, TrainingSummary)> {
    let tokenizer = match Tokenizer::load(&config.data.exclusions) {
        Ok(tokenizer) => tokenizer,
        Err(e) => {
            warn!(
                path = %config.data.exclusions.display(),
                "Exclusion list unavailable, no words excluded: {}", e
            );
            Tokenizer::default()
        }
    };

    let corpus = Corpus::load(&config.data.spam_corpus, &config.data.ham_corpus)
        .context("Failed to load training data")?;

    let mut classifier = NaiveBayes::new(tokenizer);
    let summary = classifier.train(&corpus.messages, &corpus.labels)?;
    info!(
        spam_messages = summary.spam_messages,
        ham_messages = summary.ham_messages,
        unique_words = summary.unique_words,
        "Classifier trained"
    );
    if summary.spam_messages == 0 || summary.ham_messages == 0 {
        warn!("Training corpus is missing a class, predictions will be one-sided");
    }

    Ok((classifier, summary))
}

async fn load_trust_store(config: &Config) -> TrustStore {
    let path = &config.data.trust_list;
    let policy = config.filter.persist_policy;

    match TrustStore::load(path, policy).await {
        Ok(store) => store,
        Err(e) => {
            warn!(path = %path.display(), "Failed to load trust list, starting empty: {}", e);
            TrustStore::new(path, policy)
        }
    }
}
