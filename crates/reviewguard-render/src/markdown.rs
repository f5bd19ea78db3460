use regex::Regex;

use reviewguard_types::{
    ChecklistResult, Finding, ReviewReport, Severity, DESCRIPTION_LOCATION,
};

/// Render the full markdown review report.
///
/// Section order is fixed; map-backed sections iterate in key order, so
/// the output is a deterministic function of the report.
pub fn render_markdown(report: &ReviewReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# {} review — {}\n\n",
        report.tool.name,
        report.verdict.title()
    ));
    for reason in &report.rationale {
        out.push_str(&format!("- {}\n", escape_md(reason)));
    }
    out.push('\n');

    out.push_str("## Summary\n\n");
    out.push_str("| Files | Added lines | Critical | Warning | Info |\n");
    out.push_str("|---|---|---|---|---|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} | {} |\n\n",
        report.summary.files,
        report.summary.added_lines,
        report.summary.counts.critical,
        report.summary.counts.warning,
        report.summary.counts.info
    ));

    if !report.files_changed.is_empty() {
        out.push_str("## Files changed\n\n");
        out.push_str("| Path | Status | Added lines |\n");
        out.push_str("|---|---|---|\n");
        for f in &report.files_changed {
            out.push_str(&format!(
                "| `{}` | {} | {} |\n",
                escape_md(&f.path),
                f.status,
                f.added_lines
            ));
        }
        out.push('\n');
    }

    out.push_str("## Checklist\n\n");
    for (category, result) in &report.checklist {
        let mark = match result {
            ChecklistResult::Pass => "x",
            ChecklistResult::Fail => " ",
        };
        out.push_str(&format!("- [{mark}] {}\n", category.title()));
    }
    out.push('\n');

    if report.summary.counts.total() > 0 {
        out.push_str("## Findings\n\n");
        for (category, findings) in &report.findings_by_category {
            if findings.is_empty() {
                continue;
            }
            out.push_str(&format!("### {}\n\n", category.title()));
            out.push_str("| Severity | Rule | Location | Message | Snippet |\n");
            out.push_str("|---|---|---|---|---|\n");
            for f in findings {
                out.push_str(&render_finding_row(f));
            }
            out.push('\n');
        }
    }

    if !report.checks.is_empty() {
        out.push_str("## CI checks\n\n");
        out.push_str("| Check | State |\n");
        out.push_str("|---|---|\n");
        for c in &report.checks {
            out.push_str(&format!("| `{}` | {} |\n", escape_md(&c.name), c.state.as_str()));
        }
        out.push('\n');
    }

    if !report.degraded_rules.is_empty() {
        out.push_str("## Degraded rules\n\n");
        out.push_str("The following rules were skipped this run because their matchers failed to compile:\n\n");
        for id in &report.degraded_rules {
            out.push_str(&format!("- `{}`\n", escape_md(id)));
        }
        out.push('\n');
    }

    out.push_str("## Inline comments\n\n");
    let mut any = false;
    for f in report.findings_by_category.values().flatten() {
        out.push_str(&render_inline_comment(f));
        any = true;
    }
    if !any {
        out.push_str("No findings.\n");
    }

    out
}

fn render_finding_row(f: &Finding) -> String {
    format!(
        "| {} | `{}` | `{}` | {} | `{}` |\n",
        f.severity.as_str(),
        escape_md(&f.rule_id),
        escape_md(&location(f)),
        escape_md(&f.message),
        escape_md(&f.snippet)
    )
}

fn render_inline_comment(f: &Finding) -> String {
    format!(
        "- `{}` [{}] `{}`: {}\n",
        code_span(&location(f)),
        f.severity.as_str(),
        code_span(&f.rule_id),
        escape_md(&f.message)
    )
}

/// `path:line` for located findings, `path` alone for file-level ones,
/// and the description pseudo-location otherwise.
fn location(f: &Finding) -> String {
    match (&f.path, f.line) {
        (Some(path), Some(line)) => format!("{path}:{line}"),
        (Some(path), None) => path.clone(),
        (None, _) => DESCRIPTION_LOCATION.to_string(),
    }
}

fn escape_md(s: &str) -> String {
    s.replace('|', "\\|").replace('`', "\\`")
}

fn unescape_md(s: &str) -> String {
    s.replace("\\`", "`").replace("\\|", "|")
}

/// Backslash escapes do not work inside a code span, so backticks in
/// the span body are replaced outright to keep the line parseable.
fn code_span(s: &str) -> String {
    s.replace('`', "'")
}

/// A parsed inline-comment line, used by callers that post findings as
/// individual review comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineComment {
    pub path: String,
    pub line: Option<u32>,
    pub severity: Severity,
    pub rule_id: String,
    pub message: String,
}

/// Parse the `## Inline comments` section back out of rendered markdown.
pub fn parse_inline_comments(markdown: &str) -> Vec<InlineComment> {
    let re = Regex::new(
        r"(?m)^- `(?P<loc>[^`]+?)(?::(?P<line>\d+))?` \[(?P<sev>info|warning|critical)\] `(?P<rule>[^`]+)`: (?P<msg>.*)$",
    )
    .expect("inline comment pattern is valid");

    let Some(section) = markdown.split("## Inline comments").nth(1) else {
        return Vec::new();
    };

    re.captures_iter(section)
        .map(|c| InlineComment {
            path: c["loc"].to_string(),
            line: c.name("line").and_then(|m| m.as_str().parse().ok()),
            severity: match &c["sev"] {
                "critical" => Severity::Critical,
                "warning" => Severity::Warning,
                _ => Severity::Info,
            },
            rule_id: c["rule"].to_string(),
            message: unescape_md(&c["msg"]),
        })
        .collect()
}
