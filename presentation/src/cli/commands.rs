//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for `ask`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    #[default]
    Answer,
    /// Route, filtered sub-questions, summarized context and answer
    Full,
    /// The pipeline result as JSON, exactly as the HTTP API returns it
    Json,
}

/// CLI arguments for gated-rag
#[derive(Parser, Debug)]
#[command(name = "gated-rag")]
#[command(author, version, about = "Gated RAG - answer questions directly or through retrieval")]
#[command(long_about = r#"
gated-rag answers a question in one of two ways.

A classifier first decides whether the question is mathematical or
theoretical. If it is, the model answers directly. Otherwise the question
goes through the retrieval pipeline:
1. Decompose into sub-questions
2. Filter the relevant sub-questions
3. Retrieve chunks for each
4. Rerank the chunks
5. Summarize them
6. Synthesize the final answer

Configuration files are loaded from (in priority order):
1. GATED_RAG_<SECTION>__<KEY>   Environment variables
2. --config <path>              Explicit config file
3. ./gated-rag.toml             Project-level config
4. ~/.config/gated-rag/config.toml   Global config

Example:
  gated-rag ask "Explain Planck's Quantum Hypothesis."
  gated-rag ask -o full "What's a good restaurant nearby?"
  gated-rag serve --port 8000
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer one question and exit
    Ask {
        /// The question to answer
        question: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "answer")]
        output: OutputFormat,
    },

    /// Serve the HTTP API
    Serve {
        /// Address to bind (overrides [server].host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides [server].port)
        #[arg(long)]
        port: Option<u16>,
    },
}
