//! Output formatting for CLI results.
//!
//! Every formatter renders either human-readable text or pretty JSON.

use std::fmt::Write;

use serde::Serialize;

use crate::agent::{AnalysisReport, QueryReport};
use crate::core::{ProfileTable, ScoreMap, TaskProfile};

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses a format name; anything unrecognised is text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Serializes a value as pretty JSON with a trailing newline.
    #[must_use]
    pub fn to_json<T: Serialize + ?Sized>(self, value: &T) -> String {
        let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
        json.push('\n');
        json
    }
}

/// Formats scores and the planned roster.
#[must_use]
pub fn format_plan(
    document: &str,
    scores: &ScoreMap,
    roster: &[TaskProfile],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = format!("Document: {document}\nScores:   {scores}\n\n");
            let _ = writeln!(out, "{:<10} {:<20} {:>5}  {:<8}  Objective", "ID", "Role", "Score", "Priority");
            for task in roster {
                let _ = writeln!(
                    out,
                    "{:<10} {:<20} {:>5}  {:<8}  {}",
                    task.id, task.role, task.relevance_score, task.priority, task.objective
                );
            }
            let _ = writeln!(out, "\n{} agent(s) deployed.", roster.len());
            out
        }
        OutputFormat::Json => format.to_json(&serde_json::json!({
            "document": document,
            "scores": scores,
            "roster": roster,
        })),
    }
}

/// Formats a coordinator report.
#[must_use]
pub fn format_report(report: &AnalysisReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (role, finding) in report.findings.iter() {
                let _ = writeln!(out, "== {role} ==\n{}\n", finding.trim());
            }
            let usage = report.total_usage();
            let _ = writeln!(
                out,
                "{} finding(s), {} degraded, {} tokens",
                report.len(),
                report.degraded_count(),
                usage.total_tokens
            );
            out
        }
        OutputFormat::Json => format.to_json(report),
    }
}

/// Formats a question report. Text output hides `Not specified` answers.
#[must_use]
pub fn format_query_report(report: &QueryReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            let mut shown = 0_usize;
            for (role, answer) in report.informative() {
                let _ = writeln!(out, "[{role}]\n{}\n", answer.trim());
                shown += 1;
            }
            if shown == 0 {
                out.push_str("No specialist found relevant information.\n");
            }
            out
        }
        OutputFormat::Json => format.to_json(report),
    }
}

/// Formats the profile table.
#[must_use]
pub fn format_profiles(profiles: &ProfileTable, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for category in profiles.iter() {
                let p = &category.profile;
                let _ = writeln!(
                    out,
                    "{}{}\n  objective: {}\n  base priority: {}\n  keywords: {}\n",
                    category.name,
                    if p.mandatory { " (mandatory)" } else { "" },
                    p.objective,
                    p.base_priority,
                    p.keywords.join(", ")
                );
            }
            out
        }
        OutputFormat::Json => format.to_json(profiles),
    }
}
