//! The reviewguard rule catalog.
//!
//! The catalog is a static, versioned table of review rules. It is loaded
//! once per run and treated as read-only configuration: the only failure
//! mode is malformed catalog data, which is a fatal configuration error
//! distinct from review findings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use reviewguard_types::{MetricSpec, RuleConfig, RuleScope};

mod builtin;

pub use builtin::builtin_rules;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate rule id '{0}' in catalog")]
    DuplicateRuleId(String),

    #[error("rule '{0}' has no patterns")]
    MissingPatterns(String),

    #[error("rule '{0}' has scope file_metric but no metric spec")]
    MissingMetric(String),

    #[error("rule '{0}' has a metric spec but scope {1}")]
    UnexpectedMetric(String, &'static str),

    #[error("failed to read catalog file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse catalog file '{path}': {source}")]
    Parse {
        path: String,
        source: Box<toml::de::Error>,
    },
}

/// On-disk catalog file shape: a `[[rule]]` array.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "rule")]
    rules: Vec<RuleConfig>,
}

/// An immutable, validated rule table keyed by rule id.
#[derive(Debug, Clone)]
pub struct Catalog {
    rules: Vec<RuleConfig>,
}

impl Catalog {
    /// The built-in deduplicated rule table.
    pub fn builtin() -> Self {
        let catalog = Self {
            rules: builtin_rules(),
        };
        debug_assert!(catalog.validate().is_ok(), "built-in catalog must be valid");
        catalog
    }

    /// Construct a catalog from explicit rules, validating them.
    pub fn from_rules(rules: Vec<RuleConfig>) -> Result<Self, CatalogError> {
        let catalog = Self { rules };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Merge override rules over a base set. Merge is by rule id; an
    /// override sharing an id with a base rule replaces it.
    pub fn merge_over(
        base: Vec<RuleConfig>,
        overrides: Vec<RuleConfig>,
    ) -> Result<Self, CatalogError> {
        let mut by_id: BTreeMap<String, RuleConfig> = base
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();
        for r in overrides {
            by_id.insert(r.id.clone(), r);
        }
        Self::from_rules(by_id.into_values().collect())
    }

    /// Load rules from a TOML file and merge them over the given base.
    pub fn load_over(base: Vec<RuleConfig>, path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: CatalogFile = toml::from_str(&text).map_err(|e| CatalogError::Parse {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Self::merge_over(base, file.rules)
    }

    pub fn rules(&self) -> &[RuleConfig] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&RuleConfig> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Structural validation. Regex/glob compilation errors are deliberately
    /// not checked here: a pattern that fails to compile at evaluation time
    /// degrades that one rule instead of failing the run.
    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::BTreeSet::<&str>::new();
        for r in &self.rules {
            if !seen.insert(r.id.as_str()) {
                return Err(CatalogError::DuplicateRuleId(r.id.clone()));
            }
            match r.scope {
                RuleScope::FileMetric => {
                    if r.metric.is_none() {
                        return Err(CatalogError::MissingMetric(r.id.clone()));
                    }
                }
                scope => {
                    if r.patterns.is_empty() {
                        return Err(CatalogError::MissingPatterns(r.id.clone()));
                    }
                    if r.metric.is_some() {
                        return Err(CatalogError::UnexpectedMetric(r.id.clone(), scope.as_str()));
                    }
                }
            }
            if let Some(MetricSpec::AddedLines {
                warn_above,
                critical_above,
            }) = &r.metric
            {
                debug_assert!(warn_above <= critical_above, "rule '{}'", r.id);
            }
        }
        Ok(())
    }
}
