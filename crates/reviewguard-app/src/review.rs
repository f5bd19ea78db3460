use reviewguard_catalog::Catalog;
use reviewguard_diff::{scan_unified_diff, DiffError};
use reviewguard_domain::{aggregate, compile_catalog, decide, evaluate_change_set, PolicyError};
use reviewguard_render::{render_annotations, render_markdown};
use reviewguard_types::{
    ChangeSet, CheckStatus, FileSummary, ReportSummary, ReviewPolicy, ReviewReport, ToolMeta,
    Verdict, REPORT_SCHEMA_V1,
};

use crate::gateway::{GatewayError, PrId, VcsGateway};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("pull request '{0}' not found")]
    PrNotFound(String),

    #[error("failed to fetch pull request data: {0}")]
    Gateway(#[source] GatewayError),

    #[error("malformed diff: {0}")]
    MalformedDiff(#[from] DiffError),

    #[error("invalid review policy: {0}")]
    Policy(#[from] PolicyError),
}

/// The result of one review run, ready to hand to any consumer: the
/// structured report, its rendered forms, and the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub report: ReviewReport,
    pub markdown: String,
    pub annotations: String,
    pub exit_code: i32,
}

/// Fetch a pull request through the gateway and review it.
pub fn review_pr(
    gateway: &dyn VcsGateway,
    pr: &PrId,
    catalog: &Catalog,
    policy: &ReviewPolicy,
) -> Result<ReviewOutcome, RunError> {
    let snapshot = gateway.fetch_snapshot(pr).map_err(map_gateway)?;
    let checks = gateway.fetch_check_statuses(pr).map_err(map_gateway)?;

    let files = scan_unified_diff(&snapshot.diff)?;
    let changes = ChangeSet::new(files, snapshot.description);

    run_review(&changes, checks, catalog, policy)
}

fn map_gateway(e: GatewayError) -> RunError {
    match e {
        GatewayError::NotFound(id) => RunError::PrNotFound(id),
        other => RunError::Gateway(other),
    }
}

/// Review an already-parsed change-set. This is the pure core: the same
/// inputs always yield the same outcome, byte for byte.
pub fn run_review(
    changes: &ChangeSet,
    checks: Vec<CheckStatus>,
    catalog: &Catalog,
    policy: &ReviewPolicy,
) -> Result<ReviewOutcome, RunError> {
    let compiled = compile_catalog(catalog.rules());
    tracing::debug!(
        rules = compiled.rules.len(),
        degraded = compiled.degraded.len(),
        files = changes.files().len(),
        "starting review evaluation"
    );

    let findings = evaluate_change_set(changes, &compiled.rules);
    let aggregation = aggregate(findings, policy, &compiled.degraded)?;
    let decision = decide(aggregation.counts, &checks, policy);

    tracing::info!(
        verdict = decision.verdict.as_str(),
        critical = aggregation.counts.critical,
        warning = aggregation.counts.warning,
        info = aggregation.counts.info,
        "review complete"
    );

    let files_changed: Vec<FileSummary> = changes
        .files()
        .iter()
        .map(|f| FileSummary {
            path: f.path.clone(),
            status: f.status.as_str().to_string(),
            added_lines: f.added_line_count(),
        })
        .collect();

    let report = ReviewReport {
        schema: REPORT_SCHEMA_V1.to_string(),
        tool: ToolMeta {
            name: "reviewguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        summary: ReportSummary {
            files: changes.files().len() as u32,
            added_lines: changes.total_added_lines(),
            counts: aggregation.counts,
        },
        files_changed,
        findings_by_category: aggregation.findings_by_category,
        checklist: aggregation.checklist,
        degraded_rules: compiled
            .degraded
            .iter()
            .map(|d| d.rule_id.clone())
            .collect(),
        checks,
        verdict: decision.verdict,
        rationale: decision.rationale,
    };

    let markdown = render_markdown(&report);
    let annotations = render_annotations(&report);
    let exit_code = exit_code_for(report.verdict);

    Ok(ReviewOutcome {
        report,
        markdown,
        annotations,
        exit_code,
    })
}

fn exit_code_for(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Approve => 0,
        Verdict::Reject => 2,
        Verdict::RequestChanges => 3,
    }
}
