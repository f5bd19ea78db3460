use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

use reviewguard_types::{Category, MetricSpec, RuleConfig, RuleScope, Severity};

#[derive(Debug, thiserror::Error)]
pub enum RuleCompileError {
    #[error("invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    #[error("invalid glob '{glob}': {source}")]
    InvalidGlob {
        glob: String,
        source: globset::Error,
    },
}

/// A catalog rule with its regexes and globs compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub id: String,
    pub category: Category,
    pub severity: Severity,
    pub scope: RuleScope,
    pub message: String,
    pub patterns: Vec<Regex>,
    pub allow_patterns: Vec<Regex>,
    pub include: Option<GlobSet>,
    pub exclude: Option<GlobSet>,
    pub metric: Option<MetricSpec>,
    pub help: Option<String>,
}

impl CompiledRule {
    pub fn applies_to(&self, path: &Path) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(path) {
                return false;
            }
        }

        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }

        true
    }

    /// True when any deny pattern matches and no allow pattern does.
    /// One line triggers a rule at most once, no matter how many of its
    /// patterns match.
    pub fn matches_line(&self, content: &str) -> bool {
        if !self.patterns.iter().any(|p| p.is_match(content)) {
            return false;
        }
        !self.allow_patterns.iter().any(|p| p.is_match(content))
    }
}

/// A rule excluded from this run because its matcher failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedRule {
    pub rule_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct CompiledCatalog {
    pub rules: Vec<CompiledRule>,
    pub degraded: Vec<DegradedRule>,
}

/// Compile every catalog entry. A rule that fails to compile is logged
/// and reported as degraded; it never aborts the run or affects the
/// verdict. The healthy rules are returned in catalog order.
pub fn compile_catalog(configs: &[RuleConfig]) -> CompiledCatalog {
    let mut rules = Vec::with_capacity(configs.len());
    let mut degraded = Vec::new();

    for cfg in configs {
        match compile_rule(cfg) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                tracing::warn!(rule_id = %cfg.id, error = %e, "rule degraded: matcher failed to compile");
                degraded.push(DegradedRule {
                    rule_id: cfg.id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    CompiledCatalog { rules, degraded }
}

fn compile_rule(cfg: &RuleConfig) -> Result<CompiledRule, RuleCompileError> {
    let patterns = compile_regexes(&cfg.patterns)?;
    let allow_patterns = compile_regexes(&cfg.allow_patterns)?;
    let include = compile_globs(&cfg.paths)?;
    let exclude = compile_globs(&cfg.exclude_paths)?;

    Ok(CompiledRule {
        id: cfg.id.clone(),
        category: cfg.category,
        severity: cfg.severity,
        scope: cfg.scope,
        message: cfg.message.clone(),
        patterns,
        allow_patterns,
        include,
        exclude,
        metric: cfg.metric.clone(),
        help: cfg.help.clone(),
    })
}

fn compile_regexes(patterns: &[String]) -> Result<Vec<Regex>, RuleCompileError> {
    let mut out = Vec::with_capacity(patterns.len());
    for p in patterns {
        let r = Regex::new(p).map_err(|e| RuleCompileError::InvalidRegex {
            pattern: p.clone(),
            source: e,
        })?;
        out.push(r);
    }
    Ok(out)
}

fn compile_globs(globs: &[String]) -> Result<Option<GlobSet>, RuleCompileError> {
    if globs.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for g in globs {
        let glob = Glob::new(g).map_err(|e| RuleCompileError::InvalidGlob {
            glob: g.clone(),
            source: e,
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map(Some)
        .map_err(|e| RuleCompileError::InvalidGlob {
            glob: globs.join(", "),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(id: &str, patterns: &[&str]) -> RuleConfig {
        RuleConfig {
            id: id.to_string(),
            category: Category::Lint,
            severity: Severity::Warning,
            scope: RuleScope::DiffLine,
            message: "m".to_string(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            allow_patterns: vec![],
            paths: vec![],
            exclude_paths: vec![],
            metric: None,
            help: None,
        }
    }

    #[test]
    fn compiles_and_matches_with_path_filters() {
        let mut c = cfg("lint.no_console", &[r"console\.log"]);
        c.paths = vec!["**/*.ts".to_string()];
        c.exclude_paths = vec!["**/*.test.ts".to_string()];

        let compiled = compile_catalog(&[c]);
        assert!(compiled.degraded.is_empty());
        let r = &compiled.rules[0];

        assert!(r.applies_to(Path::new("src/app.ts")));
        assert!(!r.applies_to(Path::new("src/app.test.ts")));
        assert!(!r.applies_to(Path::new("src/app.css")));
        assert!(r.matches_line("console.log('hi')"));
        assert!(!r.matches_line("logger.info('hi')"));
    }

    #[test]
    fn allow_pattern_suppresses_deny_match() {
        let mut c = cfg("a11y.img_alt", &[r"<img\s"]);
        c.allow_patterns = vec!["alt=".to_string()];

        let compiled = compile_catalog(&[c]);
        let r = &compiled.rules[0];
        assert!(r.matches_line(r#"<img src="x.png">"#));
        assert!(!r.matches_line(r#"<img src="x.png" alt="x">"#));
    }

    #[test]
    fn bad_regex_degrades_rule_without_failing_others() {
        let compiled = compile_catalog(&[
            cfg("bad.regex", &["(unclosed"]),
            cfg("good.rule", &["ok"]),
        ]);

        assert_eq!(compiled.rules.len(), 1);
        assert_eq!(compiled.rules[0].id, "good.rule");
        assert_eq!(compiled.degraded.len(), 1);
        assert_eq!(compiled.degraded[0].rule_id, "bad.regex");
        assert!(compiled.degraded[0].reason.contains("invalid regex"));
    }

    #[test]
    fn bad_glob_degrades_rule() {
        let mut c = cfg("bad.glob", &["x"]);
        c.paths = vec!["[".to_string()];
        let compiled = compile_catalog(&[c]);
        assert!(compiled.rules.is_empty());
        assert_eq!(compiled.degraded[0].rule_id, "bad.glob");
    }

    #[test]
    fn empty_path_filters_apply_everywhere() {
        let compiled = compile_catalog(&[cfg("r", &["x"])]);
        assert!(compiled.rules[0].applies_to(Path::new("anything/at/all.bin")));
    }
}
