//! Roster planning: turns relevance scores into an ordered task list.
//!
//! Policy, applied per category:
//!
//! - **include** when `score >= threshold` or the category is mandatory;
//! - **priority** is [`Priority::High`] when `score > high_above`, otherwise
//!   [`Priority::Standard`];
//! - **order** is score descending. The sort is stable, so equal scores keep
//!   the profile-table order.
//!
//! Priority is metadata for readers of the plan; it does not influence
//! execution order beyond the score sort.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::profile::ProfileTable;
use super::relevance::{ScoreMap, score};

/// Default minimum score for a non-mandatory category to be planned.
pub const DEFAULT_THRESHOLD: u32 = 1;
/// Default score a category must exceed to be marked [`Priority::High`].
pub const DEFAULT_HIGH_ABOVE: u32 = 5;

/// Priority label attached to a planned task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Score strictly above the high cut-off.
    High,
    /// Everything else.
    Standard,
}

impl Priority {
    /// Returns the label as written in plans (`"HIGH"` / `"STANDARD"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Standard => "STANDARD",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One planned unit of analysis work.
///
/// The objective is copied from the profile at plan time, so later profile
/// changes never reach an existing plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProfile {
    /// Short random identifier, unique within a plan.
    pub id: String,
    /// Category name.
    pub role: String,
    /// Analysis objective, used as the retrieval query.
    pub objective: String,
    /// Priority label.
    pub priority: Priority,
    /// Score that produced this task.
    pub relevance_score: u32,
}

/// Inclusion and priority cut-offs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterPolicy {
    /// Minimum score for a non-mandatory category.
    pub threshold: u32,
    /// Scores strictly above this are [`Priority::High`].
    pub high_above: u32,
}

impl Default for RosterPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            high_above: DEFAULT_HIGH_ABOVE,
        }
    }
}

impl RosterPolicy {
    /// Priority for a given score.
    #[must_use]
    pub const fn priority_for(&self, score: u32) -> Priority {
        if score > self.high_above {
            Priority::High
        } else {
            Priority::Standard
        }
    }
}

/// Plans which specialist analyses to run for a document.
#[derive(Debug, Clone)]
pub struct RosterPlanner {
    profiles: Arc<ProfileTable>,
    policy: RosterPolicy,
}

impl RosterPlanner {
    /// Creates a planner over a shared profile table with the default policy.
    #[must_use]
    pub fn new(profiles: Arc<ProfileTable>) -> Self {
        Self {
            profiles,
            policy: RosterPolicy::default(),
        }
    }

    /// Replaces the inclusion/priority policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: RosterPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The profile table this planner scores against.
    #[must_use]
    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    /// Scores a text sample without planning.
    #[must_use]
    pub fn score(&self, text_sample: &str) -> ScoreMap {
        score(text_sample, &self.profiles)
    }

    /// Builds the ordered task roster for a text sample.
    ///
    /// Never empty while the table has a mandatory category.
    #[must_use]
    pub fn generate_roster(&self, text_sample: &str) -> Vec<TaskProfile> {
        let scores = self.score(text_sample);
        info!(scores = %scores, "scored document sample");

        let roster = self.plan_from_scores(&scores);
        info!(agents = roster.len(), "roster planned");
        roster
    }

    /// Builds the roster from precomputed scores.
    ///
    /// Categories missing from `scores` are treated as scoring zero.
    #[must_use]
    pub fn plan_from_scores(&self, scores: &ScoreMap) -> Vec<TaskProfile> {
        let mut ids = HashSet::new();
        let mut roster: Vec<TaskProfile> = self
            .profiles
            .iter()
            .filter_map(|category| {
                let relevance_score = scores.get(&category.name).unwrap_or(0);
                let include =
                    relevance_score >= self.policy.threshold || category.profile.mandatory;
                include.then(|| TaskProfile {
                    id: unique_id(&mut ids, short_id),
                    role: category.name.clone(),
                    objective: category.profile.objective.clone(),
                    priority: self.policy.priority_for(relevance_score),
                    relevance_score,
                })
            })
            .collect();

        // Stable: ties stay in table order.
        roster.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        roster
    }
}

/// Draws ids until one is not yet in `taken`, then claims it.
fn unique_id(taken: &mut HashSet<String>, mut draw: impl FnMut() -> String) -> String {
    loop {
        let id = draw();
        if taken.insert(id.clone()) {
            return id;
        }
    }
}

/// Eight hex characters from a random v4 UUID.
fn short_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{Category, DomainProfile};

    fn planner() -> RosterPlanner {
        RosterPlanner::new(Arc::new(ProfileTable::default()))
    }

    fn roles(roster: &[TaskProfile]) -> Vec<&str> {
        roster.iter().map(|t| t.role.as_str()).collect()
    }

    #[test]
    fn test_financial_sample_ranks_finance_first() {
        let text = "The total Fee is 5000 dollars. Payment is due upon receipt of Invoice. \
                    Late penalty is 5%. Tax is not included. Jurisdiction shall be New York.";
        let roster = planner().generate_roster(text);

        assert_eq!(roles(&roster), ["Finance_Agent", "Legal_Agent", "Compliance_Agent"]);
        assert!(roster[0].relevance_score >= 4);
        assert_eq!(roster[0].priority, Priority::High);
        assert_eq!(roster[1].priority, Priority::Standard);
    }

    #[test]
    fn test_empty_text_yields_mandatory_only() {
        let roster = planner().generate_roster("");
        assert_eq!(roles(&roster), ["Legal_Agent", "Compliance_Agent"]);
        assert!(roster.iter().all(|t| t.priority == Priority::Standard));
        assert!(roster.iter().all(|t| t.relevance_score == 0));
    }

    #[test]
    fn test_ties_keep_table_order() {
        // One hit each for finance, legal, ops and compliance.
        let roster = planner().generate_roster("fee court uptime audit");
        assert_eq!(
            roles(&roster),
            ["Finance_Agent", "Legal_Agent", "Ops_Agent", "Compliance_Agent"]
        );
    }

    #[test]
    fn test_priority_boundary() {
        let policy = RosterPolicy::default();
        assert_eq!(policy.priority_for(5), Priority::Standard);
        assert_eq!(policy.priority_for(6), Priority::High);
    }

    #[test]
    fn test_objective_copied_from_profile() {
        let roster = planner().generate_roster("");
        let legal = ProfileTable::default();
        let expected = legal
            .get("Legal_Agent")
            .map(|p| p.objective.clone())
            .unwrap_or_default();
        assert_eq!(roster[0].objective, expected);
    }

    #[test]
    fn test_ids_are_short_and_unique() {
        let roster = planner().generate_roster("fee court uptime audit");
        for task in &roster {
            assert_eq!(task.id.len(), 8);
            assert!(task.id.chars().all(|c| c.is_ascii_hexdigit()));
        }
        let mut ids: Vec<&str> = roster.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn test_unique_id_redraws_on_collision() {
        let mut draws = ["aaaa0000", "aaaa0000", "aaaa0000", "bbbb1111"].into_iter();
        let mut taken = HashSet::new();
        let mut next = || draws.next().unwrap_or_default().to_string();

        assert_eq!(unique_id(&mut taken, &mut next), "aaaa0000");
        assert_eq!(unique_id(&mut taken, &mut next), "bbbb1111");
        assert_eq!(taken.len(), 2);
    }

    #[test]
    fn test_custom_policy_threshold() {
        let planner = planner().with_policy(RosterPolicy {
            threshold: 2,
            high_above: 0,
        });
        let roster = planner.generate_roster("fee fee uptime");
        // Ops scores 1 < 2 and is not mandatory.
        assert_eq!(roles(&roster), ["Finance_Agent", "Legal_Agent", "Compliance_Agent"]);
        assert_eq!(roster[0].priority, Priority::High);
    }

    #[test]
    fn test_table_without_mandatory_can_be_empty() {
        let table = ProfileTable::new(vec![Category {
            name: "Tax_Agent".to_string(),
            profile: DomainProfile {
                keywords: vec!["vat".to_string()],
                objective: "Check VAT.".to_string(),
                base_priority: 1,
                mandatory: false,
            },
        }])
        .unwrap_or_else(|_| unreachable!());
        let planner = RosterPlanner::new(Arc::new(table));
        assert!(planner.generate_roster("nothing relevant").is_empty());
        assert_eq!(planner.generate_roster("VAT applies").len(), 1);
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(
            serde_json::to_string(&Priority::High).unwrap_or_default(),
            "\"HIGH\""
        );
        assert_eq!(
            serde_json::to_string(&Priority::Standard).unwrap_or_default(),
            "\"STANDARD\""
        );
    }
}
