use reviewguard_types::{Finding, ReviewReport, Severity};

/// Render findings as GitHub Actions workflow commands, one per line.
///
/// Critical findings map to `::error`, warnings to `::warning`, info to
/// `::notice`. Findings without a file location (description findings)
/// render without the `file=` property.
pub fn render_annotations(report: &ReviewReport) -> String {
    let mut out = String::new();
    for f in report.findings_by_category.values().flatten() {
        out.push_str(&render_annotation(f));
        out.push('\n');
    }
    out
}

fn render_annotation(f: &Finding) -> String {
    let level = match f.severity {
        Severity::Critical => "error",
        Severity::Warning => "warning",
        Severity::Info => "notice",
    };
    let message = escape_data(&format!("{}: {}", f.rule_id, f.message));

    match (&f.path, f.line) {
        (Some(path), Some(line)) => {
            format!("::{level} file={},line={line}::{message}", escape_property(path))
        }
        (Some(path), None) => format!("::{level} file={}::{message}", escape_property(path)),
        (None, _) => format!("::{level}::{message}"),
    }
}

// Workflow-command escaping rules from the GitHub Actions runner.
fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
