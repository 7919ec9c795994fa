//! CLI entrypoint for gated-rag
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use gated_rag_application::{ChunkReranker, LlmGateway, PipelineCollaborators, RunPipelineUseCase};
use gated_rag_domain::Question;
use gated_rag_infrastructure::{
    ConfigLoader, CrossEncoderReranker, FileConfig, JsonlPipelineLogger, LlmAnswerSynthesizer,
    LlmChunkSummarizer, LlmQuestionClassifier, LlmQuestionDecomposer, LlmSubQuestionFilter,
    LocalChunkStore, OpenAiCompatibleGateway, TruncatingReranker,
};
use gated_rag_presentation::{
    Cli, Command, ConsoleFormatter, HttpServer, OutputFormat, ProgressReporter, ServerSettings,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present, before configuration reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli);

    info!("Starting gated-rag");

    let config = load_config(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    check_config(&config)?;

    let Some(command) = cli.command else {
        bail!("No command given. Try `gated-rag ask \"<question>\"` or `gated-rag serve`.");
    };

    // === Dependency Injection ===
    let use_case = build_use_case(&config)?;

    match command {
        Command::Ask { question, output } => {
            let question = Question::new(question);

            let result = if cli.quiet {
                use_case.execute(question.clone()).await
            } else {
                let progress = ProgressReporter::new();
                use_case
                    .execute_with_progress(question.clone(), &progress)
                    .await
            };

            let text = match output {
                OutputFormat::Answer => ConsoleFormatter::format_answer_only(&result),
                OutputFormat::Full => ConsoleFormatter::format(&question, &result),
                OutputFormat::Json => ConsoleFormatter::format_json(&result),
            };
            println!("{}", text.trim_end());

            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Serve { host, port } => {
            let settings = ServerSettings {
                host: host.unwrap_or_else(|| config.server.host.clone()),
                port: port.unwrap_or(config.server.port),
                allowed_origins: config.server.allowed_origins.clone(),
            };
            HttpServer::new(settings, use_case).start().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Human-readable logs on stderr, plus daily-rotated files with `--log-dir`.
///
/// `RUST_LOG` overrides the level chosen by `-v`/`-q`.
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let level = match (cli.verbose, cli.quiet) {
        (0, true) => "error",
        (0, false) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "gated-rag.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let loaded = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    };
    loaded.map_err(|e| anyhow!("Configuration error: {}", e))
}

/// Print every issue; abort when any is an error.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("{}", issue);
        } else {
            warn!("{}", issue.message);
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("{} configuration error(s), see above", errors);
    }
    Ok(())
}

fn build_use_case(config: &FileConfig) -> Result<RunPipelineUseCase> {
    let gateway: Arc<dyn LlmGateway> =
        Arc::new(OpenAiCompatibleGateway::from_config(&config.llm)?);
    info!("Using model {} at {}", config.llm.model, config.llm.base_url);

    let retrieval = &config.retrieval;
    let store = match &retrieval.corpus_path {
        Some(path) if path.exists() => LocalChunkStore::load(path, retrieval.top_k)
            .with_context(|| format!("Loading corpus {}", path.display()))?,
        _ => LocalChunkStore::empty(retrieval.top_k),
    };

    let reranker: Arc<dyn ChunkReranker> =
        match CrossEncoderReranker::from_config(&config.reranker)? {
            Some(reranker) => Arc::new(reranker),
            None => Arc::new(TruncatingReranker::new(config.reranker.top_n)),
        };

    let collaborators = PipelineCollaborators {
        classifier: Arc::new(LlmQuestionClassifier::new(gateway.clone())),
        decomposer: Arc::new(LlmQuestionDecomposer::new(
            gateway.clone(),
            retrieval.max_sub_questions,
        )),
        filter: Arc::new(LlmSubQuestionFilter::new(gateway.clone())),
        retriever: Arc::new(store),
        reranker,
        summarizer: Arc::new(LlmChunkSummarizer::new(gateway.clone())),
        synthesizer: Arc::new(LlmAnswerSynthesizer::new(gateway)),
    };

    let mut use_case = RunPipelineUseCase::new(collaborators);
    if let Some(path) = &config.logging.pipeline_log {
        match JsonlPipelineLogger::new(path) {
            Some(logger) => {
                info!("Pipeline events logged to {}", logger.path().display());
                use_case = use_case.with_logger(Arc::new(logger));
            }
            None => warn!("Pipeline event log disabled"),
        }
    }

    Ok(use_case)
}
