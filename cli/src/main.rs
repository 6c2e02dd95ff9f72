//! CLI entrypoint for Mabrur AI
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use mabrur_application::{AnswerQuestionUseCase, KnowledgeStore};
use mabrur_infrastructure::{
    ConfigLoader, FileConfig, InMemoryKnowledgeStore, JsonlConversationLogger, OpenAiProvider,
    SqliteKnowledgeStore, TracingInferenceObserver,
};
use mabrur_presentation::http::{self, AppState};
use mabrur_presentation::{Cli, Command, ConsoleFormatter};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Serve { bind } => serve(&config, bind).await,
        Command::Ask { question, json } => ask(&config, &question, json).await,
        Command::Seed => seed(&config),
    }
}

/// Console output filtered by `-v` (or `RUST_LOG`), plus optional daily log files.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "mabrur.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Wire the answer pipeline from configuration.
fn build_answerer(config: &FileConfig) -> Result<AnswerQuestionUseCase> {
    let provider_config = &config.provider;

    let provider = OpenAiProvider::new(
        &provider_config.base_url,
        provider_config.model.clone(),
        provider_config.api_key(),
    )
    .context("Failed to build HTTP client for the inference provider")?
    .with_max_tokens(provider_config.max_tokens)
    .with_temperature(provider_config.temperature);

    if !provider.has_credentials() {
        warn!(
            "{} is not set; every question will receive the fallback answer",
            provider_config.api_key_env
        );
    }

    let store: Arc<dyn KnowledgeStore> = match &config.knowledge.database {
        Some(path) => Arc::new(
            SqliteKnowledgeStore::open(path)
                .with_context(|| format!("Failed to open knowledge database {}", path))?,
        ),
        None => {
            info!("No knowledge database configured, using built-in sample records");
            Arc::new(InMemoryKnowledgeStore::seeded())
        }
    };

    let mut answerer = AnswerQuestionUseCase::new(store, Arc::new(provider))
        .with_retrieval_config(config.retrieval_config())
        .with_retry_policy(config.retry_policy())
        .with_observer(Arc::new(TracingInferenceObserver::new(
            provider_config.model.clone(),
        )));

    if let Some(path) = &config.logging.conversation_log {
        let logger = JsonlConversationLogger::open(path)
            .with_context(|| format!("Failed to open conversation log {}", path))?;
        info!("Conversation log: {}", logger.path().display());
        answerer = answerer.with_conversation_logger(Arc::new(logger));
    }

    Ok(answerer)
}

async fn serve(config: &FileConfig, bind: Option<SocketAddr>) -> Result<()> {
    let addr = match bind {
        Some(addr) => addr,
        None => config
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid server.bind address: {}", config.server.bind))?,
    };

    info!(
        "Starting Mabrur AI v{} with model {}",
        env!("CARGO_PKG_VERSION"),
        config.provider.model
    );
    let state = AppState::new(build_answerer(config)?);

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
    };

    http::run(state, addr, shutdown)
        .await
        .with_context(|| format!("HTTP server on {} failed", addr))
}

async fn ask(config: &FileConfig, question: &str, json: bool) -> Result<()> {
    let answerer = build_answerer(config)?;

    let start = Instant::now();
    let result = answerer.answer(question).await;
    let elapsed = start.elapsed();

    let output = if json {
        ConsoleFormatter::format_json(&result, elapsed)
    } else {
        ConsoleFormatter::format(question, &result, elapsed)
    };
    println!("{}", output);

    Ok(())
}

fn seed(config: &FileConfig) -> Result<()> {
    let Some(path) = &config.knowledge.database else {
        bail!("knowledge.database is not configured; the built-in store needs no seeding");
    };

    let store = SqliteKnowledgeStore::open(path)
        .with_context(|| format!("Failed to open knowledge database {}", path))?;
    let inserted = store.seed_defaults().context("Failed to seed knowledge records")?;

    if inserted == 0 {
        println!("{} already has content; nothing inserted.", path);
    } else {
        println!("Inserted {} sample records into {}.", inserted, path);
    }
    Ok(())
}
