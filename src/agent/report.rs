//! Analysis report types.
//!
//! [`AnalysisReport`] is the coordinator's accumulator: findings keyed by
//! role in first-insertion order, plus an audit record per executed task.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::message::TokenUsage;
use crate::core::Priority;

/// Role → finding map that keeps first-insertion order.
///
/// Writing an existing role replaces its finding in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings(Vec<(String, String)>);

impl Findings {
    /// Stores a finding, returning the one it replaced.
    pub fn insert(&mut self, role: impl Into<String>, finding: impl Into<String>) -> Option<String> {
        let role = role.into();
        let finding = finding.into();
        if let Some(slot) = self.0.iter_mut().find(|(r, _)| *r == role) {
            return Some(std::mem::replace(&mut slot.1, finding));
        }
        self.0.push((role, finding));
        None
    }

    /// Finding for a role.
    #[must_use]
    pub fn get(&self, role: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, f)| f.as_str())
    }

    /// `(role, finding)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(r, f)| (r.as_str(), f.as_str()))
    }

    /// Roles in insertion order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(r, _)| r.as_str())
    }

    /// Number of roles with a finding.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no finding is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Findings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (role, finding) in &self.0 {
            map.serialize_entry(role, finding)?;
        }
        map.end()
    }
}

/// Audit entry for one executed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    /// Task identifier from the plan.
    pub task_id: String,
    /// Role the task analysed.
    pub role: String,
    /// Planned priority.
    pub priority: Priority,
    /// Planned relevance score.
    pub relevance_score: u32,
    /// Passages retrieved for the task.
    pub passages: usize,
    /// Whether the generation collaborator was called.
    pub generated: bool,
    /// Whether the finding is a failure placeholder.
    pub degraded: bool,
    /// Wall-clock time spent on the task, in milliseconds.
    pub elapsed_ms: u64,
    /// Tokens spent on the task.
    pub usage: TokenUsage,
}

/// Accumulated result of a coordinator run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Findings by role.
    pub findings: Findings,
    /// Execution audit trail, in run order.
    pub tasks: Vec<TaskRecord>,
}

impl AnalysisReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the report with a finding stored under `role` and the task
    /// recorded. Later writes for the same role win.
    #[must_use]
    pub fn with_task(mut self, record: TaskRecord, finding: impl Into<String>) -> Self {
        self.findings.insert(record.role.clone(), finding);
        self.tasks.push(record);
        self
    }

    /// Finding for a role.
    #[must_use]
    pub fn get(&self, role: &str) -> Option<&str> {
        self.findings.get(role)
    }

    /// Number of roles with a finding.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Returns `true` if no finding is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of degraded findings.
    #[must_use]
    pub fn degraded_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.degraded).count()
    }

    /// Tokens spent across all tasks.
    #[must_use]
    pub fn total_usage(&self) -> TokenUsage {
        self.tasks
            .iter()
            .fold(TokenUsage::default(), |acc, t| acc.saturating_add(t.usage))
    }

    /// Role → finding map, sorted by role.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.findings.0.into_iter().collect()
    }
}

/// Response body for a full contract analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResponse {
    /// Always `"Success"` for a completed run.
    pub status: String,
    /// Planned roles in execution order.
    pub strategy_used: Vec<String>,
    /// Findings by role.
    pub executive_summary: Findings,
}

impl AnalysisResponse {
    /// Status reported for a completed run.
    pub const SUCCESS: &'static str = "Success";

    /// Builds the response from the plan's roles and the final report.
    #[must_use]
    pub fn new(strategy_used: Vec<String>, report: AnalysisReport) -> Self {
        Self {
            status: Self::SUCCESS.to_string(),
            strategy_used,
            executive_summary: report.findings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(role: &str, degraded: bool) -> TaskRecord {
        TaskRecord {
            task_id: "abcd1234".to_string(),
            role: role.to_string(),
            priority: Priority::Standard,
            relevance_score: 1,
            passages: 2,
            generated: !degraded,
            degraded,
            elapsed_ms: 3,
            usage: TokenUsage {
                prompt_tokens: 4,
                completion_tokens: 1,
                total_tokens: 5,
            },
        }
    }

    #[test]
    fn test_later_write_wins_in_place() {
        let report = AnalysisReport::new()
            .with_task(record("Legal_Agent", false), "first")
            .with_task(record("Finance_Agent", false), "money")
            .with_task(record("Legal_Agent", false), "second");

        assert_eq!(report.len(), 2);
        assert_eq!(report.get("Legal_Agent"), Some("second"));
        let roles: Vec<&str> = report.findings.roles().collect();
        assert_eq!(roles, ["Legal_Agent", "Finance_Agent"]);
        assert_eq!(report.tasks.len(), 3);
        assert_eq!(report.total_usage().total_tokens, 15);
    }

    #[test]
    fn test_findings_serialize_in_insertion_order() {
        let mut findings = Findings::default();
        findings.insert("Zeta", "z");
        findings.insert("Alpha", "a");
        let json = serde_json::to_string(&findings).unwrap_or_default();
        assert_eq!(json, r#"{"Zeta":"z","Alpha":"a"}"#);
    }

    #[test]
    fn test_response_shape() {
        let report = AnalysisReport::new()
            .with_task(record("Legal_Agent", false), "ok")
            .with_task(record("Compliance_Agent", true), "Analysis unavailable: x");
        assert_eq!(report.degraded_count(), 1);

        let response = AnalysisResponse::new(
            vec!["Legal_Agent".to_string(), "Compliance_Agent".to_string()],
            report,
        );
        let value = serde_json::to_value(&response).unwrap_or_default();
        assert_eq!(value["status"], "Success");
        assert_eq!(value["strategy_used"][1], "Compliance_Agent");
        assert_eq!(value["executive_summary"]["Legal_Agent"], "ok");
    }

    #[test]
    fn test_into_map() {
        let map = AnalysisReport::new()
            .with_task(record("Ops_Agent", false), "sla")
            .into_map();
        assert_eq!(map.get("Ops_Agent").map(String::as_str), Some("sla"));
    }
}
