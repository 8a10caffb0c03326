//! CLI command implementations.
//!
//! Each command returns its rendered output; `main` prints it. The
//! interactive `ask` session is the exception and writes as it goes.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use crate::agent::{AgentConfig, ContractAnalyzer, PromptSet, QueryPipeline, create_provider};
use crate::cli::output::{
    OutputFormat, format_plan, format_profiles, format_query_report, format_report,
};
use crate::cli::parser::{AgentArgs, Cli, Commands};
use crate::core::sample::SAMPLE_CONTRACT;
use crate::core::{Document, ProfileTable, RosterPlanner};

/// Words that end an interactive session.
const EXIT_WORDS: &[&str] = &["exit", "quit", "q"];

/// Which top-k knob an `AgentArgs::top_k` override targets.
#[derive(Debug, Clone, Copy)]
enum TopK {
    Roster,
    Query,
}

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if the document, profiles or configuration are invalid,
/// or if an analysis fails.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Plan { file, pages } => cmd_plan(cli, file, *pages, format),
        Commands::Analyze { file, agent } => cmd_analyze(cli, file, agent, format),
        Commands::Ask {
            file,
            question,
            agent,
        } => cmd_ask(cli, file, question.as_deref(), agent, format),
        Commands::Serve { host, port, agent } => cmd_serve(cli, host, *port, agent),
        Commands::Profiles => {
            let profiles = load_profiles(cli)?;
            Ok(format_profiles(&profiles, format))
        }
        Commands::InitPrompts { dir } => cmd_init_prompts(dir.as_deref(), format),
        Commands::Sample { output } => cmd_sample(output.as_deref(), format),
    }
}

/// Loads the `--profiles` table, or the built-in one.
fn load_profiles(cli: &Cli) -> Result<Arc<ProfileTable>> {
    let table = match &cli.profiles {
        Some(path) => ProfileTable::from_file(path)?,
        None => ProfileTable::default(),
    };
    Ok(Arc::new(table))
}

/// Builds agent configuration from env + CLI overrides.
fn build_config(agent: &AgentArgs, top_k: TopK) -> Result<AgentConfig> {
    let mut builder = AgentConfig::builder();
    if let Some(ref model) = agent.model {
        builder = builder.model(model);
    }
    if let Some(k) = agent.top_k {
        builder = match top_k {
            TopK::Roster => builder.roster_top_k(k),
            TopK::Query => builder.query_top_k(k),
        };
    }
    if let Some(secs) = agent.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if agent.isolate_failures {
        builder = builder.isolate_failures(true);
    }
    if let Some(ref dir) = agent.prompt_dir {
        builder = builder.prompt_dir(dir);
    }

    builder
        .from_env()
        .build()
        .context("agent configuration error")
}

fn build_analyzer(cli: &Cli, agent: &AgentArgs, top_k: TopK) -> Result<ContractAnalyzer> {
    let profiles = load_profiles(cli)?;
    let config = build_config(agent, top_k)?;
    let provider = create_provider(&config).context("provider creation failed")?;
    Ok(ContractAnalyzer::new(
        RosterPlanner::new(profiles),
        Arc::from(provider),
        config,
    ))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to create async runtime")
}

fn cmd_plan(cli: &Cli, file: &Path, pages: usize, format: OutputFormat) -> Result<String> {
    let document = Document::load(file)?;
    let planner = RosterPlanner::new(load_profiles(cli)?);

    let scores = planner.score(&document.sample(pages));
    let roster = planner.plan_from_scores(&scores);
    Ok(format_plan(document.name(), &scores, &roster, format))
}

fn cmd_analyze(cli: &Cli, file: &Path, agent: &AgentArgs, format: OutputFormat) -> Result<String> {
    let document = Document::load(file)?;
    let analyzer = build_analyzer(cli, agent, TopK::Roster)?;

    let (_plan, report) = runtime()?.block_on(analyzer.run(&document))?;
    Ok(format_report(&report, format))
}

fn cmd_ask(
    cli: &Cli,
    file: &Path,
    question: Option<&str>,
    agent: &AgentArgs,
    format: OutputFormat,
) -> Result<String> {
    let document = Document::load(file)?;
    let analyzer = build_analyzer(cli, agent, TopK::Query)?;
    let pipeline = analyzer.pipeline(&document);
    let rt = runtime()?;

    if let Some(question) = question {
        let report = rt.block_on(pipeline.ask(question))?;
        return Ok(format_query_report(&report, format));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&rt, &pipeline, stdin.lock(), stdout.lock(), format)?;
    Ok(String::new())
}

/// Interactive question loop. Blank lines are skipped; a failed question is
/// reported and the session continues.
fn run_session<R: BufRead, W: Write>(
    rt: &tokio::runtime::Runtime,
    pipeline: &QueryPipeline,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> Result<()> {
    writeln!(output, "Ask about the contract ('exit' to quit).")?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let question = line.trim();
        if EXIT_WORDS.contains(&question.to_lowercase().as_str()) {
            break;
        }
        if !question.is_empty() {
            match rt.block_on(pipeline.ask(question)) {
                Ok(report) => write!(output, "{}", format_query_report(&report, format))?,
                Err(err) => {
                    warn!(error = %err, "question failed");
                    writeln!(output, "Error: {err}")?;
                }
            }
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

fn cmd_serve(cli: &Cli, host: &str, port: u16, agent: &AgentArgs) -> Result<String> {
    let analyzer = build_analyzer(cli, agent, TopK::Roster)?;
    runtime()?.block_on(crate::server::serve(analyzer, host, port))?;
    Ok(String::new())
}

fn cmd_init_prompts(dir: Option<&Path>, format: OutputFormat) -> Result<String> {
    let target_dir = dir
        .map(PathBuf::from)
        .or_else(PromptSet::default_dir)
        .context("could not determine home directory for default prompt path")?;

    let written = PromptSet::write_defaults(&target_dir)
        .with_context(|| format!("failed to write prompt templates to {}", target_dir.display()))?;

    match format {
        OutputFormat::Text => {
            if written.is_empty() {
                return Ok(format!(
                    "All prompt templates already exist in: {}\n",
                    target_dir.display()
                ));
            }
            let mut output = format!(
                "Wrote {} prompt template(s) to: {}\n",
                written.len(),
                target_dir.display()
            );
            for path in &written {
                output.push_str("  ");
                output.push_str(path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown"));
                output.push('\n');
            }
            output.push_str("\nEdit these files to customize agent system prompts.\n");
            Ok(output)
        }
        OutputFormat::Json => Ok(format.to_json(&serde_json::json!({
            "directory": target_dir.to_string_lossy(),
            "written": written.iter().map(|p| p.to_string_lossy().into_owned()).collect::<Vec<_>>(),
            "count": written.len()
        }))),
    }
}

fn cmd_sample(output: Option<&Path>, format: OutputFormat) -> Result<String> {
    let Some(path) = output else {
        return Ok(SAMPLE_CONTRACT.to_string());
    };

    std::fs::write(path, SAMPLE_CONTRACT)
        .with_context(|| format!("failed to write {}", path.display()))?;
    match format {
        OutputFormat::Text => Ok(format!("Wrote sample contract to: {}\n", path.display())),
        OutputFormat::Json => Ok(format.to_json(&serde_json::json!({
            "path": path.to_string_lossy(),
            "bytes": SAMPLE_CONTRACT.len(),
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::mock::MockProvider;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["clause-roster"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap_or_else(|_| unreachable!())
    }

    fn sample_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("msa.txt");
        std::fs::write(&path, SAMPLE_CONTRACT).unwrap_or_else(|_| unreachable!());
        path
    }

    #[test]
    fn test_plan_command() {
        let dir = TempDir::new().unwrap_or_else(|_| unreachable!());
        let path = sample_file(&dir);
        let path_str = path.to_string_lossy();
        let out = execute(&cli(&["--format", "json", "plan", &path_str]))
            .unwrap_or_else(|_| unreachable!());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap_or_default();
        assert_eq!(value["roster"].as_array().map_or(0, Vec::len), 4);
    }

    #[test]
    fn test_profiles_command() {
        let out = execute(&cli(&["--format", "json", "profiles"])).unwrap_or_else(|_| unreachable!());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap_or_default();
        assert_eq!(value.as_array().map_or(0, Vec::len), 4);
        assert_eq!(value[1]["name"], "Legal_Agent");
        assert_eq!(value[1]["mandatory"], true);
    }

    #[test]
    fn test_plan_missing_file() {
        let result = execute(&cli(&["plan", "/nonexistent/msa.txt"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_to_file() {
        let dir = TempDir::new().unwrap_or_else(|_| unreachable!());
        let path = dir.path().join("out.txt");
        let path_str = path.to_string_lossy();
        let out = execute(&cli(&["sample", "--output", &path_str]))
            .unwrap_or_else(|_| unreachable!());
        assert!(out.contains("Wrote sample contract"));
        let written = std::fs::read_to_string(&path).unwrap_or_default();
        assert_eq!(written, SAMPLE_CONTRACT);
    }

    #[test]
    fn test_init_prompts() {
        let dir = TempDir::new().unwrap_or_else(|_| unreachable!());
        let dir_str = dir.path().to_string_lossy();
        let out = execute(&cli(&["init-prompts", &dir_str])).unwrap_or_else(|_| unreachable!());
        assert!(out.contains("Wrote 4 prompt template(s)"));
        let again = execute(&cli(&["init-prompts", &dir_str])).unwrap_or_else(|_| unreachable!());
        assert!(again.contains("already exist"));
    }

    #[test]
    fn test_session_loop() {
        let config = AgentConfig::builder()
            .api_key("test")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let document =
            Document::from_text("msa", SAMPLE_CONTRACT).unwrap_or_else(|_| unreachable!());
        let analyzer = ContractAnalyzer::new(
            RosterPlanner::new(Arc::new(ProfileTable::default())),
            Arc::new(MockProvider::new("answer")),
            config,
        )
        .with_prompts(PromptSet::defaults());
        let pipeline = analyzer.pipeline(&document);
        let rt = runtime().unwrap_or_else(|_| unreachable!());

        let input = io::Cursor::new("What are the payment terms?\n\n   \nquit\nignored\n");
        let mut output = Vec::new();
        run_session(&rt, &pipeline, input, &mut output, OutputFormat::Text)
            .unwrap_or_else(|_| unreachable!());

        let text = String::from_utf8(output).unwrap_or_default();
        assert!(text.contains("[Finance]\nanswer #0"));
        assert!(text.contains("[Operations]\nanswer #2"));
        assert!(!text.contains("#3"));
    }
}
