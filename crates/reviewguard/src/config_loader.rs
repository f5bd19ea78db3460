use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use reviewguard_catalog::{builtin_rules, Catalog};
use reviewguard_types::{ReviewPolicy, RuleConfig};

/// On-disk configuration: a `[policy]` table plus `[[rule]]` entries
/// merged over the built-in catalog by rule id.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub policy: ReviewPolicy,

    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleConfig>,
}

/// Resolve the effective catalog and policy.
///
/// With no config file present, the built-in catalog and default policy
/// apply. File rules override built-in rules that share an id;
/// `no_default_rules` drops the built-ins entirely.
pub fn load_config(
    explicit: Option<PathBuf>,
    no_default_rules: bool,
) -> Result<(Catalog, ReviewPolicy)> {
    let path = explicit.or_else(|| {
        let p = PathBuf::from("reviewguard.toml");
        p.exists().then_some(p)
    });

    let base = if no_default_rules {
        Vec::new()
    } else {
        builtin_rules()
    };

    let Some(path) = path else {
        let catalog = Catalog::from_rules(base).context("built-in catalog")?;
        return Ok((catalog, ReviewPolicy::default()));
    };

    let file = read_config_file(&path)?;
    let catalog = Catalog::merge_over(base, file.rules)
        .with_context(|| format!("invalid catalog in {}", path.display()))?;

    Ok((catalog, file.policy))
}

pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}
