//! Domain profiles: the keyword knowledge base behind roster planning.
//!
//! A [`ProfileTable`] is an ordered list of analysis categories, each with
//! trigger keywords, an objective used as the retrieval query, a base
//! priority, and a mandatory flag. Tables are validated once on
//! construction and never mutated afterwards; share them behind an `Arc`.
//!
//! Table order matters: the planner breaks score ties by it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reference data for one analysis category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainProfile {
    /// Trigger keywords, lowercase.
    pub keywords: Vec<String>,
    /// Natural-language objective, also used as the retrieval query.
    pub objective: String,
    /// Base priority carried from the knowledge base. Informational.
    #[serde(default = "default_base_priority")]
    pub base_priority: u8,
    /// Always plan this category regardless of score.
    #[serde(default)]
    pub mandatory: bool,
}

const fn default_base_priority() -> u8 {
    1
}

/// A named [`DomainProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category name, used as the report key (e.g. `"Finance_Agent"`).
    pub name: String,
    /// Profile data.
    #[serde(flatten)]
    pub profile: DomainProfile,
}

/// Ordered, validated set of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileTable {
    categories: Vec<Category>,
}

impl ProfileTable {
    /// Builds a table, normalising keywords to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProfiles`] if the table is empty, a name
    /// is blank or duplicated, or a category has no keywords or a blank one.
    pub fn new(categories: Vec<Category>) -> Result<Self, ConfigError> {
        if categories.is_empty() {
            return Err(invalid("at least one category is required"));
        }

        let mut normalised = Vec::with_capacity(categories.len());
        for mut category in categories {
            let name = category.name.trim().to_string();
            if name.is_empty() {
                return Err(invalid("category name cannot be empty"));
            }
            if normalised.iter().any(|c: &Category| c.name == name) {
                return Err(invalid(&format!("duplicate category: {name}")));
            }

            if category.profile.keywords.is_empty() {
                return Err(invalid(&format!("{name} has no keywords")));
            }
            // An empty keyword would match between every character.
            if category.profile.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(invalid(&format!("{name} has an empty keyword")));
            }
            for keyword in &mut category.profile.keywords {
                *keyword = keyword.to_lowercase();
            }
            category.name = name;

            normalised.push(category);
        }

        Ok(Self {
            categories: normalised,
        })
    }

    /// Parses a table from a JSON array of categories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProfiles`] on malformed JSON or a table
    /// that fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let categories: Vec<Category> =
            serde_json::from_str(json).map_err(|e| invalid(&e.to_string()))?;
        Self::new(categories)
    }

    /// Loads a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ProfileFile`] if the file cannot be read or
    /// parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json).map_err(|e| ConfigError::ProfileFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Categories in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Looks up a category by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DomainProfile> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.profile)
    }

    /// Names of the mandatory categories, in table order.
    pub fn mandatory(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .filter(|c| c.profile.mandatory)
            .map(|c| c.name.as_str())
    }

    /// Number of categories.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always `false`: validation rejects empty tables.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for ProfileTable {
    /// The built-in contract knowledge base: finance, legal, operations and
    /// compliance, with legal and compliance mandatory.
    fn default() -> Self {
        let category = |name: &str, keywords: &[&str], objective: &str, base: u8, mandatory| {
            Category {
                name: name.to_string(),
                profile: DomainProfile {
                    keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                    objective: objective.to_string(),
                    base_priority: base,
                    mandatory,
                },
            }
        };

        Self {
            categories: vec![
                category(
                    "Finance_Agent",
                    &[
                        "payment", "invoice", "fee", "currency", "tax", "penalty", "pricing",
                        "cost", "dollar", "amount",
                    ],
                    "Analyze financial exposure, recurring costs, and payment structures.",
                    1,
                    false,
                ),
                category(
                    "Legal_Agent",
                    &[
                        "indemnification",
                        "liability",
                        "jurisdiction",
                        "arbitration",
                        "termination",
                        "law",
                        "court",
                        "breach",
                    ],
                    "Identify liability risks, legal loopholes, and governing law clauses.",
                    2,
                    true,
                ),
                category(
                    "Ops_Agent",
                    &[
                        "sla",
                        "uptime",
                        "availability",
                        "maintenance",
                        "support",
                        "delivery",
                        "shipping",
                        "response time",
                    ],
                    "Validate operational guarantees, service levels (SLA), and support metrics.",
                    1,
                    false,
                ),
                category(
                    "Compliance_Agent",
                    &[
                        "gdpr",
                        "privacy",
                        "data",
                        "audit",
                        "security",
                        "regulation",
                        "iso",
                        "compliance",
                        "standard",
                    ],
                    "Ensure adherence to data privacy laws (GDPR/CCPA) and security standards.",
                    3,
                    true,
                ),
            ],
        }
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidProfiles {
        message: message.to_string(),
    }
}
