use std::collections::BTreeMap;

use globset::{Glob, GlobSet, GlobSetBuilder};

use reviewguard_types::{
    Category, ChecklistResult, Finding, FindingCounts, ReviewPolicy, Severity,
};

use crate::rules::DegradedRule;

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("policy has invalid exclude glob '{glob}': {source}")]
    InvalidExcludeGlob {
        glob: String,
        source: globset::Error,
    },
}

/// Deduplicated, ordered, categorized findings plus the checklist they
/// imply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub findings_by_category: BTreeMap<Category, Vec<Finding>>,
    pub checklist: BTreeMap<Category, ChecklistResult>,
    pub counts: FindingCounts,
}

impl Aggregation {
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings_by_category.values().flatten()
    }
}

/// Fold raw findings into the report shape.
///
/// - Findings in policy-excluded paths are dropped.
/// - Duplicates by `(rule_id, path, line)` collapse to one, keeping the
///   highest severity.
/// - Each category's findings are ordered by path, line, then rule id.
/// - A category fails its checklist entry when it has any finding above
///   Info. Degraded rules fail the `Unknown` entry but are otherwise
///   inert.
///
/// Policy globs are operator configuration, so a bad one is a fatal
/// error rather than a degraded rule.
pub fn aggregate(
    findings: Vec<Finding>,
    policy: &ReviewPolicy,
    degraded: &[DegradedRule],
) -> Result<Aggregation, PolicyError> {
    let excluded = compile_exclusions(&policy.exclude_paths)?;

    let mut by_key: BTreeMap<(String, Option<String>, Option<u32>), Finding> = BTreeMap::new();
    for f in findings {
        if let (Some(path), Some(globs)) = (&f.path, &excluded) {
            if globs.is_match(path.as_str()) {
                continue;
            }
        }
        by_key
            .entry(f.dedup_key())
            .and_modify(|existing| {
                if f.severity > existing.severity {
                    *existing = f.clone();
                }
            })
            .or_insert(f);
    }

    let mut kept: Vec<Finding> = by_key.into_values().collect();
    kept.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let mut counts = FindingCounts::default();
    let mut findings_by_category: BTreeMap<Category, Vec<Finding>> = BTreeMap::new();
    for f in kept {
        match f.severity {
            Severity::Info => counts.info += 1,
            Severity::Warning => counts.warning += 1,
            Severity::Critical => counts.critical += 1,
        }
        findings_by_category.entry(f.category).or_default().push(f);
    }

    let mut checklist: BTreeMap<Category, ChecklistResult> = Category::CATALOG
        .iter()
        .map(|c| (*c, ChecklistResult::Pass))
        .collect();
    for (category, group) in &findings_by_category {
        if group.iter().any(|f| f.severity > Severity::Info) {
            checklist.insert(*category, ChecklistResult::Fail);
        }
    }
    if !degraded.is_empty() {
        checklist.insert(Category::Unknown, ChecklistResult::Fail);
    }

    Ok(Aggregation {
        findings_by_category,
        checklist,
        counts,
    })
}

fn compile_exclusions(globs: &[String]) -> Result<Option<GlobSet>, PolicyError> {
    if globs.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for g in globs {
        let glob = Glob::new(g).map_err(|e| PolicyError::InvalidExcludeGlob {
            glob: g.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| PolicyError::InvalidExcludeGlob {
            glob: globs.join(", "),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(rule_id: &str, category: Category, severity: Severity, path: &str, line: u32) -> Finding {
        Finding {
            rule_id: rule_id.to_string(),
            category,
            severity,
            path: Some(path.to_string()),
            line: Some(line),
            snippet: "s".to_string(),
            message: "m".to_string(),
        }
    }

    #[test]
    fn duplicates_collapse_keeping_highest_severity() {
        let agg = aggregate(
            vec![
                finding("r", Category::Lint, Severity::Info, "a.ts", 1),
                finding("r", Category::Lint, Severity::Warning, "a.ts", 1),
                finding("r", Category::Lint, Severity::Info, "a.ts", 1),
            ],
            &ReviewPolicy {
                exclude_paths: vec![],
                ..Default::default()
            },
            &[],
        )
        .unwrap();

        assert_eq!(agg.counts.total(), 1);
        assert_eq!(agg.counts.warning, 1);
    }

    #[test]
    fn findings_are_ordered_by_path_line_rule() {
        let agg = aggregate(
            vec![
                finding("z", Category::Lint, Severity::Info, "b.ts", 5),
                finding("a", Category::Lint, Severity::Info, "b.ts", 5),
                finding("a", Category::Lint, Severity::Info, "a.ts", 9),
            ],
            &ReviewPolicy {
                exclude_paths: vec![],
                ..Default::default()
            },
            &[],
        )
        .unwrap();

        let ordered: Vec<(Option<&str>, Option<u32>, &str)> =
            agg.findings().map(|f| f.sort_key()).collect();
        assert_eq!(
            ordered,
            vec![
                (Some("a.ts"), Some(9), "a"),
                (Some("b.ts"), Some(5), "a"),
                (Some("b.ts"), Some(5), "z"),
            ]
        );
    }

    #[test]
    fn excluded_paths_suppress_findings() {
        let agg = aggregate(
            vec![
                finding("r", Category::Security, Severity::Critical, "config/app.ts.example", 3),
                finding("r", Category::Security, Severity::Critical, "src/app.ts", 3),
            ],
            &ReviewPolicy::default(),
            &[],
        )
        .unwrap();

        assert_eq!(agg.counts.critical, 1);
        let kept: Vec<&str> = agg
            .findings()
            .filter_map(|f| f.path.as_deref())
            .collect();
        assert_eq!(kept, vec!["src/app.ts"]);
    }

    #[test]
    fn description_findings_survive_path_exclusions() {
        let f = Finding {
            path: None,
            line: None,
            ..finding("r", Category::Security, Severity::Critical, "", 0)
        };
        let agg = aggregate(vec![f], &ReviewPolicy::default(), &[]).unwrap();
        assert_eq!(agg.counts.critical, 1);
    }

    #[test]
    fn checklist_covers_all_categories_and_fails_on_warnings() {
        let agg = aggregate(
            vec![
                finding("w", Category::Security, Severity::Warning, "a.ts", 1),
                finding("i", Category::Testing, Severity::Info, "a.ts", 2),
            ],
            &ReviewPolicy {
                exclude_paths: vec![],
                ..Default::default()
            },
            &[],
        )
        .unwrap();

        assert_eq!(agg.checklist.len(), Category::CATALOG.len());
        assert_eq!(agg.checklist[&Category::Security], ChecklistResult::Fail);
        // Info findings alone do not fail a category.
        assert_eq!(agg.checklist[&Category::Testing], ChecklistResult::Pass);
        assert_eq!(agg.checklist[&Category::Lint], ChecklistResult::Pass);
    }

    #[test]
    fn degraded_rules_fail_the_unknown_entry_only() {
        let degraded = [DegradedRule {
            rule_id: "bad.rule".to_string(),
            reason: "invalid regex".to_string(),
        }];
        let agg = aggregate(vec![], &ReviewPolicy::default(), &degraded).unwrap();
        assert_eq!(agg.checklist[&Category::Unknown], ChecklistResult::Fail);
        assert_eq!(agg.counts.total(), 0);
    }

    #[test]
    fn invalid_policy_glob_is_fatal() {
        let policy = ReviewPolicy {
            exclude_paths: vec!["[".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            aggregate(vec![], &policy, &[]),
            Err(PolicyError::InvalidExcludeGlob { .. })
        ));
    }
}
