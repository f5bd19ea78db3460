use std::collections::BTreeSet;
use std::path::Path;

use rayon::prelude::*;

use reviewguard_types::{ChangeSet, FileDiff, FileStatus, Finding, MetricSpec, RuleScope, Severity};

use crate::rules::CompiledRule;

/// Evaluate a change-set against the compiled rules.
///
/// Files are scanned in parallel; the result order is the change-set's
/// file order (description findings first), so the output is identical
/// across runs regardless of scheduling. Deduplication and policy
/// exclusions happen later, in aggregation.
pub fn evaluate_change_set(changes: &ChangeSet, rules: &[CompiledRule]) -> Vec<Finding> {
    let line_rules: Vec<&CompiledRule> = rules
        .iter()
        .filter(|r| r.scope == RuleScope::DiffLine)
        .collect();
    let metric_rules: Vec<&CompiledRule> = rules
        .iter()
        .filter(|r| r.scope == RuleScope::FileMetric)
        .collect();
    let description_rules: Vec<&CompiledRule> = rules
        .iter()
        .filter(|r| r.scope == RuleScope::DescriptionText)
        .collect();

    let test_subjects = collect_test_subjects(changes);

    let mut findings = scan_description(changes.description(), &description_rules);

    let per_file: Vec<Vec<Finding>> = changes
        .files()
        .par_iter()
        .map(|file| scan_file(file, &line_rules, &metric_rules, &test_subjects))
        .collect();
    findings.extend(per_file.into_iter().flatten());

    findings
}

fn scan_file(
    file: &FileDiff,
    line_rules: &[&CompiledRule],
    metric_rules: &[&CompiledRule],
    test_subjects: &BTreeSet<String>,
) -> Vec<Finding> {
    if !file.is_scannable() {
        return Vec::new();
    }

    let path = Path::new(&file.path);
    let mut findings = Vec::new();

    for rule in line_rules {
        if !rule.applies_to(path) {
            continue;
        }
        for added in file.added_lines() {
            if rule.matches_line(&added.content) {
                findings.push(Finding {
                    rule_id: rule.id.clone(),
                    category: rule.category,
                    severity: rule.severity,
                    path: Some(file.path.clone()),
                    line: Some(added.line),
                    snippet: trim_snippet(&added.content),
                    message: rule.message.clone(),
                });
            }
        }
    }

    for rule in metric_rules {
        if !rule.applies_to(path) {
            continue;
        }
        if let Some(finding) = apply_metric(file, rule, test_subjects) {
            findings.push(finding);
        }
    }

    findings
}

fn apply_metric(
    file: &FileDiff,
    rule: &CompiledRule,
    test_subjects: &BTreeSet<String>,
) -> Option<Finding> {
    let metric = rule.metric.as_ref()?;
    match metric {
        MetricSpec::AddedLines {
            warn_above,
            critical_above,
        } => {
            let count = file.added_line_count();
            let severity = if count > *critical_above {
                Severity::Critical
            } else if count > *warn_above {
                Severity::Warning
            } else {
                return None;
            };
            Some(Finding {
                rule_id: rule.id.clone(),
                category: rule.category,
                severity,
                path: Some(file.path.clone()),
                line: None,
                snippet: format!("{count} added lines"),
                message: rule.message.clone(),
            })
        }
        MetricSpec::NewFileWithoutTest => {
            if file.status != FileStatus::Added || is_test_path(&file.path) {
                return None;
            }
            if test_subjects.contains(source_stem(&file.path)) {
                return None;
            }
            Some(Finding {
                rule_id: rule.id.clone(),
                category: rule.category,
                severity: rule.severity,
                path: Some(file.path.clone()),
                line: None,
                snippet: format!("new file: {}", file.path),
                message: rule.message.clone(),
            })
        }
    }
}

fn scan_description(description: &str, rules: &[&CompiledRule]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for rule in rules {
        for line in description.lines() {
            if rule.matches_line(line) {
                findings.push(Finding {
                    rule_id: rule.id.clone(),
                    category: rule.category,
                    severity: rule.severity,
                    path: None,
                    line: None,
                    snippet: trim_snippet(line),
                    message: rule.message.clone(),
                });
                // One finding per rule against the description.
                break;
            }
        }
    }
    findings
}

/// Base names covered by test files anywhere in the change-set.
/// `Button.test.tsx`, `Button.spec.ts`, and `__tests__/Button.tsx` all
/// cover the subject `Button`.
fn collect_test_subjects(changes: &ChangeSet) -> BTreeSet<String> {
    changes
        .files()
        .iter()
        .filter(|f| f.status != FileStatus::Deleted)
        .filter_map(|f| test_subject(&f.path))
        .collect()
}

fn is_test_path(path: &str) -> bool {
    test_subject(path).is_some()
}

fn test_subject(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    if let Some(i) = name.find(".test.").or_else(|| name.find(".spec.")) {
        return Some(name[..i].to_string());
    }
    if path.split('/').any(|seg| seg == "__tests__") {
        return Some(source_stem(path).to_string());
    }
    None
}

/// File base name up to the first dot: `Button.test.tsx` and
/// `Button.tsx` share the stem `Button`.
fn source_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.split('.').next().unwrap_or(name)
}

fn trim_snippet(s: &str) -> String {
    let trimmed = s.trim();
    const MAX_CHARS: usize = 240;

    // Char-wise to avoid slicing inside a UTF-8 sequence.
    let mut out = String::new();
    for (i, ch) in trimmed.chars().enumerate() {
        if i >= MAX_CHARS {
            out.push('…');
            break;
        }
        out.push(ch);
    }
    out
}
