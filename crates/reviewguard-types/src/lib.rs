//! Data types for reviewguard.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.
//! All evaluation logic lives in `reviewguard-domain`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema Identifiers ─────────────────────────────────────────
pub const REPORT_SCHEMA_V1: &str = "reviewguard.report.v1";

/// Location label used for findings raised against the PR description
/// rather than a file in the change-set.
pub const DESCRIPTION_LOCATION: &str = "pr-description";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// Review checklist category. `Unknown` is reserved for rules whose
/// matcher failed to compile at run time; it never appears in the
/// static catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Lint,
    Types,
    Structure,
    Hooks,
    Performance,
    State,
    DataFetching,
    Styling,
    Routing,
    Security,
    Accessibility,
    Testing,
    Build,
    Unknown,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Lint => "lint",
            Category::Types => "types",
            Category::Structure => "structure",
            Category::Hooks => "hooks",
            Category::Performance => "performance",
            Category::State => "state",
            Category::DataFetching => "data_fetching",
            Category::Styling => "styling",
            Category::Routing => "routing",
            Category::Security => "security",
            Category::Accessibility => "accessibility",
            Category::Testing => "testing",
            Category::Build => "build",
            Category::Unknown => "unknown",
        }
    }

    /// Human-readable section title for rendered reports.
    pub fn title(self) -> &'static str {
        match self {
            Category::Lint => "Lint",
            Category::Types => "Types",
            Category::Structure => "Structure",
            Category::Hooks => "Hooks",
            Category::Performance => "Performance",
            Category::State => "State Management",
            Category::DataFetching => "Data Fetching",
            Category::Styling => "Styling",
            Category::Routing => "Routing",
            Category::Security => "Security",
            Category::Accessibility => "Accessibility",
            Category::Testing => "Testing",
            Category::Build => "Build",
            Category::Unknown => "Unknown",
        }
    }

    /// The catalog categories, in checklist order. Excludes `Unknown`.
    pub const CATALOG: [Category; 13] = [
        Category::Lint,
        Category::Types,
        Category::Structure,
        Category::Hooks,
        Category::Performance,
        Category::State,
        Category::DataFetching,
        Category::Styling,
        Category::Routing,
        Category::Security,
        Category::Accessibility,
        Category::Testing,
        Category::Build,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RuleScope {
    DiffLine,
    FileMetric,
    DescriptionText,
}

impl RuleScope {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleScope::DiffLine => "diff_line",
            RuleScope::FileMetric => "file_metric",
            RuleScope::DescriptionText => "description_text",
        }
    }
}

/// Threshold specification for `RuleScope::FileMetric` rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricSpec {
    /// Added-line count of a file compared against fixed thresholds.
    /// Crossing `warn_above` yields a Warning finding; crossing
    /// `critical_above` escalates the same finding to Critical.
    AddedLines { warn_above: u32, critical_above: u32 },
    /// A newly added source file with no companion test file anywhere
    /// in the change-set.
    NewFileWithoutTest,
}

/// A single catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    pub id: String,
    pub category: Category,
    pub severity: Severity,
    pub scope: RuleScope,
    pub message: String,

    /// One or more deny regex patterns (diff-line and description scopes).
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Allow-list: a line also matching any of these produces no finding,
    /// even when a deny pattern matched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_patterns: Vec<String>,

    /// Include path globs. Empty means "all non-binary files".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,

    /// Exclude path globs attached to this rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_paths: Vec<String>,

    /// Optional help text explaining how to fix violations.
    /// Declared before `metric` so TOML serialization emits all plain
    /// values before the metric sub-table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Present iff `scope == FileMetric`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricSpec>,
}

// ── Change-set model ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed { from: String },
    Binary,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed { .. } => "renamed",
            FileStatus::Binary => "binary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AddedLine {
    /// 1-based line number in the new file.
    pub line: u32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Hunk {
    /// New-file start line from the hunk header.
    pub new_start: u32,
    pub added: Vec<AddedLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileDiff {
    /// Repo-relative path with forward slashes (new path for renames).
    pub path: String,
    pub status: FileStatus,
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    pub fn added_lines(&self) -> impl Iterator<Item = &AddedLine> {
        self.hunks.iter().flat_map(|h| h.added.iter())
    }

    pub fn added_line_count(&self) -> u32 {
        self.hunks.iter().map(|h| h.added.len() as u32).sum()
    }

    /// Binary and deleted files carry no scannable lines.
    pub fn is_scannable(&self) -> bool {
        !matches!(self.status, FileStatus::Binary | FileStatus::Deleted)
    }
}

/// The immutable input to a review run: file diffs plus the PR description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChangeSet {
    files: Vec<FileDiff>,
    description: String,
}

impl ChangeSet {
    /// Construct a change-set, enforcing path uniqueness and deterministic
    /// file order. Later duplicates for the same path are dropped.
    pub fn new(files: Vec<FileDiff>, description: String) -> Self {
        let mut by_path = BTreeMap::<String, FileDiff>::new();
        for f in files {
            by_path.entry(f.path.clone()).or_insert(f);
        }
        Self {
            files: by_path.into_values().collect(),
            description,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), String::new())
    }

    pub fn files(&self) -> &[FileDiff] {
        &self.files
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn total_added_lines(&self) -> u32 {
        self.files.iter().map(|f| f.added_line_count()).sum()
    }
}

// ── Findings and checks ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub rule_id: String,
    pub category: Category,
    pub severity: Severity,
    /// None for description-scoped findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// None for file-metric findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub snippet: String,
    pub message: String,
}

impl Finding {
    /// Deterministic sort key: path ascending, then line, then rule id.
    /// Description findings (no path) order before file findings.
    pub fn sort_key(&self) -> (Option<&str>, Option<u32>, &str) {
        (self.path.as_deref(), self.line, self.rule_id.as_str())
    }

    /// Dedup identity per the aggregation invariant.
    pub fn dedup_key(&self) -> (String, Option<String>, Option<u32>) {
        (self.rule_id.clone(), self.path.clone(), self.line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Pass,
    Fail,
    Pending,
}

impl CheckState {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckState::Pass => "pass",
            CheckState::Fail => "fail",
            CheckState::Pending => "pending",
        }
    }
}

/// An externally supplied CI check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckStatus {
    pub name: String,
    pub state: CheckState,
}

// ── Verdict and report ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approve,
    RequestChanges,
    Reject,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Approve => "approve",
            Verdict::RequestChanges => "request_changes",
            Verdict::Reject => "reject",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Verdict::Approve => "APPROVE",
            Verdict::RequestChanges => "REQUEST CHANGES",
            Verdict::Reject => "REJECT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistResult {
    Pass,
    Fail,
}

impl ChecklistResult {
    pub fn as_str(self) -> &'static str {
        match self {
            ChecklistResult::Pass => "pass",
            ChecklistResult::Fail => "fail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct FindingCounts {
    pub info: u32,
    pub warning: u32,
    pub critical: u32,
}

impl FindingCounts {
    pub fn total(self) -> u32 {
        self.info + self.warning + self.critical
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileSummary {
    pub path: String,
    pub status: String,
    pub added_lines: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ReportSummary {
    pub files: u32,
    pub added_lines: u32,
    pub counts: FindingCounts,
}

/// The complete review report: a pure function of
/// `(ChangeSet, catalog, check statuses, policy)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewReport {
    pub schema: String,
    pub tool: ToolMeta,
    pub summary: ReportSummary,
    pub files_changed: Vec<FileSummary>,
    pub findings_by_category: BTreeMap<Category, Vec<Finding>>,
    pub checklist: BTreeMap<Category, ChecklistResult>,
    /// Rule ids whose matcher failed to compile this run (category Unknown).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_rules: Vec<String>,
    pub checks: Vec<CheckStatus>,
    pub verdict: Verdict,
    pub rationale: Vec<String>,
}

// ── Policy ─────────────────────────────────────────────────────

/// The externally configurable decision parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReviewPolicy {
    /// Maximum number of warning findings still compatible with Approve.
    /// The default of 0 means any warning yields RequestChanges.
    pub max_warnings: u32,

    /// Check names that must not be in the Fail state. Empty means every
    /// supplied check is required.
    pub required_checks: Vec<String>,

    /// Global path exclusions applied during aggregation (generated files,
    /// vendored code, fixtures, documented examples).
    pub exclude_paths: Vec<String>,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            max_warnings: 0,
            required_checks: Vec::new(),
            exclude_paths: vec![
                "**/*.example".to_string(),
                "**/*.example.*".to_string(),
                "**/*.generated.*".to_string(),
                "**/generated/**".to_string(),
                "**/vendor/**".to_string(),
                "**/node_modules/**".to_string(),
                "**/__fixtures__/**".to_string(),
                "**/fixtures/**".to_string(),
                "**/*.snap".to_string(),
                "**/dist/**".to_string(),
                "**/*.lock".to_string(),
                "**/package-lock.json".to_string(),
            ],
        }
    }
}
