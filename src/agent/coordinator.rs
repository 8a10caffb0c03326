//! Sequential plan execution.
//!
//! The coordinator walks the plan in order, hands each task to the
//! [`TaskExecutor`], and folds the outcome into an [`AnalysisReport`].
//! Each step takes the report by value and returns the next one; no state
//! survives between runs.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{info, warn};

use super::executor::{TaskExecutor, TaskOutcome};
use super::message::TokenUsage;
use super::report::{AnalysisReport, TaskRecord};
use crate::core::TaskProfile;
use crate::error::{Error, Result};

/// Prefix of the finding recorded for a failed task under
/// [`FailurePolicy::Isolate`].
pub const DEGRADED_PREFIX: &str = "Analysis unavailable: ";

/// What to do when a task's retrieval or generation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure and return it; no partial report.
    #[default]
    Abort,
    /// Record a degraded finding for the task and continue.
    Isolate,
}

impl FailurePolicy {
    /// Maps the `isolate_failures` config flag to a policy.
    #[must_use]
    pub const fn from_isolate(isolate: bool) -> Self {
        if isolate { Self::Isolate } else { Self::Abort }
    }
}

/// Runs a plan task by task.
#[derive(Debug, Clone)]
pub struct Coordinator {
    executor: TaskExecutor,
    policy: FailurePolicy,
}

impl Coordinator {
    /// Creates a coordinator; the failure policy comes from the executor's
    /// configuration.
    #[must_use]
    pub fn new(executor: TaskExecutor) -> Self {
        let policy = FailurePolicy::from_isolate(executor.config().isolate_failures);
        Self { executor, policy }
    }

    /// Overrides the failure policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active failure policy.
    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Executes every task in plan order and returns the final report.
    ///
    /// An empty plan yields an empty report without touching either
    /// collaborator.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`], the first failing task is returned as
    /// [`Error::Task`] and the remaining tasks are not run.
    pub async fn run_plan(&self, plan: &[TaskProfile]) -> Result<AnalysisReport> {
        let start = Instant::now();
        let mut report = AnalysisReport::new();
        for task in plan {
            report = self.step(report, task).await?;
        }

        info!(
            tasks = plan.len(),
            findings = report.len(),
            degraded = report.degraded_count(),
            elapsed_ms = elapsed_ms(start),
            "plan complete"
        );
        Ok(report)
    }

    /// Executes one task and returns the report with its finding added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Task`] when the task fails under
    /// [`FailurePolicy::Abort`].
    pub async fn step(&self, report: AnalysisReport, task: &TaskProfile) -> Result<AnalysisReport> {
        info!(
            task_id = %task.id,
            role = %task.role,
            priority = %task.priority,
            score = task.relevance_score,
            "activating agent"
        );
        let start = Instant::now();

        match self.executor.execute(task).await {
            Ok(outcome) => Ok(report.with_task(record(task, &outcome, false, start), outcome.finding)),
            Err(err) => match self.policy {
                FailurePolicy::Abort => Err(Error::Task {
                    task_id: task.id.clone(),
                    role: task.role.clone(),
                    source: Box::new(err),
                }),
                FailurePolicy::Isolate => {
                    warn!(
                        task_id = %task.id,
                        role = %task.role,
                        error = %err,
                        "task failed, recording degraded finding"
                    );
                    let outcome = TaskOutcome {
                        finding: format!("{DEGRADED_PREFIX}{err}"),
                        passages: 0,
                        generated: false,
                        usage: TokenUsage::default(),
                    };
                    Ok(report.with_task(record(task, &outcome, true, start), outcome.finding))
                }
            },
        }
    }

    /// Runs a plan and returns the role → finding map.
    ///
    /// # Errors
    ///
    /// Same as [`Coordinator::run_plan`].
    pub async fn analyze_plan(&self, plan: &[TaskProfile]) -> Result<BTreeMap<String, String>> {
        Ok(self.run_plan(plan).await?.into_map())
    }
}

fn record(task: &TaskProfile, outcome: &TaskOutcome, degraded: bool, start: Instant) -> TaskRecord {
    TaskRecord {
        task_id: task.id.clone(),
        role: task.role.clone(),
        priority: task.priority,
        relevance_score: task.relevance_score,
        passages: outcome.passages,
        generated: outcome.generated,
        degraded,
        elapsed_ms: elapsed_ms(start),
        usage: outcome.usage,
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
