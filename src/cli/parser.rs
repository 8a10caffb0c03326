//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::DEFAULT_SAMPLE_PAGES;

/// clause-roster: retrieval-augmented contract analysis.
///
/// Scores a contract against domain profiles, plans which specialist
/// analyses to run, and runs them over retrieved clauses.
#[derive(Parser, Debug)]
#[command(name = "clause-roster")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Domain profile table (JSON). Defaults to the built-in table.
    #[arg(long, env = "CLAUSE_PROFILES", global = true)]
    pub profiles: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a contract and print the analysis roster.
    ///
    /// Offline: no API key is needed.
    #[command(after_help = r#"Examples:
  clause-roster plan contract.txt                 # Plan from the first 3 pages
  clause-roster plan contract.txt --pages 10      # Plan from a larger sample
  clause-roster --format json plan contract.txt | jq '.roster[].role'
"#)]
    Plan {
        /// Contract text file (pages separated by form feeds).
        file: PathBuf,

        /// Leading pages used as the planning sample.
        #[arg(long, default_value_t = DEFAULT_SAMPLE_PAGES)]
        pages: usize,
    },

    /// Plan and run every specialist analysis on a contract.
    #[command(after_help = r#"Examples:
  clause-roster analyze contract.txt
  clause-roster analyze contract.txt --isolate-failures
  clause-roster --format json analyze contract.txt > report.json
"#)]
    Analyze {
        /// Contract text file.
        file: PathBuf,

        #[command(flatten)]
        agent: AgentArgs,
    },

    /// Ask the finance, legal and operations specialists a question.
    ///
    /// Without a question, starts an interactive session; type `exit`,
    /// `quit` or `q` to leave.
    #[command(after_help = r#"Examples:
  clause-roster ask contract.txt "What are the payment terms?"
  clause-roster ask contract.txt                  # Interactive session
"#)]
    Ask {
        /// Contract text file.
        file: PathBuf,

        /// Question to answer.
        question: Option<String>,

        #[command(flatten)]
        agent: AgentArgs,
    },

    /// Serve the HTTP API.
    #[command(after_help = r#"Examples:
  clause-roster serve                             # Listen on 127.0.0.1:8000
  clause-roster serve --host 0.0.0.0 --port 8080
  curl -s localhost:8000/analyze_contract -H 'content-type: application/json' \
       -d '{"document": "..."}'
"#)]
    Serve {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to.
        #[arg(long, default_value = "8000")]
        port: u16,

        #[command(flatten)]
        agent: AgentArgs,
    },

    /// List the domain profiles in use.
    Profiles,

    /// Write the default prompt templates for customization.
    ///
    /// Existing files are left untouched.
    #[command(after_help = r#"Examples:
  clause-roster init-prompts                      # ~/.config/clause-roster/prompts
  clause-roster init-prompts ./prompts
"#)]
    InitPrompts {
        /// Target directory.
        dir: Option<PathBuf>,
    },

    /// Print (or write) the demo master service agreement.
    Sample {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Overrides for the analysis agents.
#[derive(Args, Debug, Clone, Default)]
pub struct AgentArgs {
    /// Generation model.
    #[arg(long)]
    pub model: Option<String>,

    /// Passages retrieved per task (analyze) or per question (ask).
    #[arg(short = 'k', long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub top_k: Option<usize>,

    /// Generation timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Record a degraded finding for a failed task instead of aborting.
    #[arg(long)]
    pub isolate_failures: bool,

    /// Directory containing prompt template files.
    #[arg(long)]
    pub prompt_dir: Option<PathBuf>,
}
