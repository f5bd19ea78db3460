use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use reviewguard_app::{review_pr, GatewayError, PrId, PrSnapshot, VcsGateway};
use reviewguard_types::{CheckStatus, MetricSpec, RuleConfig, RuleScope};

mod config_loader;

use config_loader::{load_config, read_config_file};

#[derive(Parser)]
#[command(name = "reviewguard")]
#[command(about = "Automated pull-request review: findings, checklist, verdict", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review a change-set: evaluate the rule catalog and produce a verdict.
    Check(CheckArgs),

    /// Print the effective rule catalog (built-in + optional config merge).
    Rules(RulesArgs),

    /// Show detailed information about a specific rule.
    Explain(ExplainArgs),

    /// Validate the configuration file (policy globs, rule regexes, shapes).
    Validate(ValidateArgs),

    /// Print the JSON schema of the review report.
    Schema,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Unified diff input file, or '-' for stdin.
    #[arg(long, value_name = "PATH")]
    diff_file: PathBuf,

    /// File containing the PR description. Empty description if omitted.
    #[arg(long, value_name = "PATH")]
    description_file: Option<PathBuf>,

    /// JSON file with CI check results: [{"name":"ci/test","state":"pass"}].
    #[arg(long, value_name = "PATH")]
    checks_file: Option<PathBuf>,

    /// Path to a config file. If omitted, uses ./reviewguard.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable built-in rules; only use the config file.
    #[arg(long)]
    no_default_rules: bool,

    /// Where to write the JSON report. Stdout gets the markdown either way.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Write the markdown report to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    md: Option<PathBuf>,

    /// Emit GitHub Actions annotations to stdout.
    #[arg(long)]
    github_annotations: bool,
}

#[derive(Parser, Debug)]
struct RulesArgs {
    /// Path to a config file. If omitted, uses ./reviewguard.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable built-in rules; only use the config file.
    #[arg(long)]
    no_default_rules: bool,

    #[arg(long, value_enum, default_value_t = RulesFormat::Toml)]
    format: RulesFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RulesFormat {
    Toml,
    Json,
}

#[derive(Parser, Debug)]
struct ExplainArgs {
    /// The rule ID to explain (e.g., "security.hardcoded_secret").
    rule_id: String,

    /// Path to a config file. If omitted, uses ./reviewguard.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable built-in rules; only use the config file.
    #[arg(long)]
    no_default_rules: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Path to a config file. If omitted, uses ./reviewguard.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for validation results.
    #[arg(long, value_enum, default_value_t = ValidateFormat::Text)]
    format: ValidateFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ValidateFormat {
    Text,
    Json,
}

fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("reviewguard: {err:#}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Check(args) => cmd_check(args),
        Commands::Rules(args) => {
            cmd_rules(args)?;
            Ok(0)
        }
        Commands::Explain(args) => {
            cmd_explain(args)?;
            Ok(0)
        }
        Commands::Validate(args) => cmd_validate(args),
        Commands::Schema => {
            cmd_schema()?;
            Ok(0)
        }
    }
}

fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("logging initialized at level: {level}");
}

/// Gateway over local files, for CI jobs and offline runs.
struct LocalGateway {
    diff_file: PathBuf,
    description_file: Option<PathBuf>,
    checks_file: Option<PathBuf>,
}

impl LocalGateway {
    fn read_diff(&self) -> Result<String, GatewayError> {
        if self.diff_file == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        if !self.diff_file.exists() {
            return Err(GatewayError::NotFound(
                self.diff_file.display().to_string(),
            ));
        }
        Ok(std::fs::read_to_string(&self.diff_file)?)
    }
}

impl VcsGateway for LocalGateway {
    fn fetch_snapshot(&self, _pr: &PrId) -> Result<PrSnapshot, GatewayError> {
        let diff = self.read_diff()?;
        let description = match &self.description_file {
            Some(path) => std::fs::read_to_string(path)?,
            None => String::new(),
        };
        Ok(PrSnapshot { diff, description })
    }

    fn fetch_check_statuses(&self, _pr: &PrId) -> Result<Vec<CheckStatus>, GatewayError> {
        let Some(path) = &self.checks_file else {
            return Ok(Vec::new());
        };
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| GatewayError::Protocol(format!("invalid checks file: {e}")))
    }
}

fn cmd_check(args: CheckArgs) -> Result<i32> {
    let (catalog, policy) = load_config(args.config.clone(), args.no_default_rules)?;

    let gateway = LocalGateway {
        diff_file: args.diff_file.clone(),
        description_file: args.description_file.clone(),
        checks_file: args.checks_file.clone(),
    };
    let pr = PrId("local".to_string());

    let outcome = review_pr(&gateway, &pr, &catalog, &policy)?;

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&outcome.report).context("render report json")?;
        write_text(out, &json)?;
    }

    match &args.md {
        Some(path) => write_text(path, &outcome.markdown)?,
        None => print!("{}", outcome.markdown),
    }

    if args.github_annotations {
        print!("{}", outcome.annotations);
    }

    Ok(outcome.exit_code)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

fn cmd_rules(args: RulesArgs) -> Result<()> {
    let (catalog, _) = load_config(args.config, args.no_default_rules)?;

    #[derive(serde::Serialize)]
    struct RulesDoc<'a> {
        rule: &'a [RuleConfig],
    }
    let doc = RulesDoc {
        rule: catalog.rules(),
    };

    match args.format {
        RulesFormat::Toml => {
            let s = toml::to_string_pretty(&doc).context("render toml")?;
            print!("{s}");
        }
        RulesFormat::Json => {
            let s = serde_json::to_string_pretty(&doc).context("render json")?;
            println!("{s}");
        }
    }

    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> Result<()> {
    let (catalog, _) = load_config(args.config, args.no_default_rules)?;

    match catalog.get(&args.rule_id) {
        Some(rule) => {
            print!("{}", format_rule_explanation(rule));
            Ok(())
        }
        None => {
            let suggestions = find_similar_rules(&args.rule_id, catalog.rules());
            let mut msg = format!("rule '{}' not found.", args.rule_id);
            if !suggestions.is_empty() {
                msg.push_str("\n\nDid you mean one of these?\n");
                for s in &suggestions {
                    msg.push_str(&format!("  - {s}\n"));
                }
            }
            msg.push_str("\nUse 'reviewguard rules' to list all available rules.");
            bail!("{msg}");
        }
    }
}

fn format_rule_explanation(rule: &RuleConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("Rule: {}\n", rule.id));
    out.push_str(&format!("Category: {}\n", rule.category.title()));
    out.push_str(&format!("Severity: {}\n", rule.severity.as_str()));
    out.push_str(&format!("Scope: {}\n", rule.scope.as_str()));
    out.push_str(&format!("Message: {}\n", rule.message));

    if !rule.patterns.is_empty() {
        out.push_str("\nPatterns:\n");
        for p in &rule.patterns {
            out.push_str(&format!("  - {p}\n"));
        }
    }
    if !rule.allow_patterns.is_empty() {
        out.push_str("\nSuppressed when the line also matches:\n");
        for p in &rule.allow_patterns {
            out.push_str(&format!("  - {p}\n"));
        }
    }

    if let Some(metric) = &rule.metric {
        out.push_str("\nMetric:\n");
        match metric {
            MetricSpec::AddedLines {
                warn_above,
                critical_above,
            } => {
                out.push_str(&format!(
                    "  - Added lines: warning above {warn_above}, critical above {critical_above}\n"
                ));
            }
            MetricSpec::NewFileWithoutTest => {
                out.push_str("  - New source file with no companion test in the change-set\n");
            }
        }
    }

    if !rule.paths.is_empty() || !rule.exclude_paths.is_empty() {
        out.push_str("\nApplies to:\n");
        if !rule.paths.is_empty() {
            out.push_str(&format!("  - Paths: {}\n", rule.paths.join(", ")));
        }
        if !rule.exclude_paths.is_empty() {
            out.push_str(&format!("  - Excludes: {}\n", rule.exclude_paths.join(", ")));
        }
    }

    if let Some(help) = &rule.help {
        out.push_str("\nRemediation:\n");
        for line in help.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }

    out
}

fn find_similar_rules(rule_id: &str, rules: &[RuleConfig]) -> Vec<String> {
    let needle = rule_id.to_lowercase();
    let mut candidates: Vec<(usize, String)> = rules
        .iter()
        .filter_map(|r| {
            let id = r.id.to_lowercase();
            if id.starts_with(&needle) || needle.starts_with(&id) {
                Some((0, r.id.clone()))
            } else if id.contains(&needle) || needle.contains(&id) {
                Some((1, r.id.clone()))
            } else {
                None
            }
        })
        .collect();

    candidates.sort();
    candidates.truncate(5);
    candidates.into_iter().map(|(_, id)| id).collect()
}

fn cmd_validate(args: ValidateArgs) -> Result<i32> {
    let config_path = args.config.clone().or_else(|| {
        let p = PathBuf::from("reviewguard.toml");
        p.exists().then_some(p)
    });

    let Some(path) = config_path else {
        bail!("no configuration file found; specify --config or create reviewguard.toml");
    };

    let cfg = read_config_file(&path)?;
    let mut errors: Vec<String> = Vec::new();

    let mut seen = std::collections::BTreeSet::new();
    for rule in &cfg.rules {
        if !seen.insert(rule.id.as_str()) {
            errors.push(format!("rule '{}': duplicate rule ID", rule.id));
        }
    }

    for rule in &cfg.rules {
        match rule.scope {
            RuleScope::FileMetric => {
                if rule.metric.is_none() {
                    errors.push(format!("rule '{}': file_metric scope needs a metric", rule.id));
                }
            }
            _ => {
                if rule.patterns.is_empty() {
                    errors.push(format!("rule '{}': no patterns defined", rule.id));
                }
                if rule.metric.is_some() {
                    errors.push(format!(
                        "rule '{}': metric is only valid with file_metric scope",
                        rule.id
                    ));
                }
            }
        }

        for pattern in rule.patterns.iter().chain(rule.allow_patterns.iter()) {
            if let Err(e) = regex::Regex::new(pattern) {
                errors.push(format!("rule '{}': invalid regex '{pattern}': {e}", rule.id));
            }
        }
        for glob in rule.paths.iter().chain(rule.exclude_paths.iter()) {
            if let Err(e) = globset::Glob::new(glob) {
                errors.push(format!("rule '{}': invalid glob '{glob}': {e}", rule.id));
            }
        }
    }

    for glob in &cfg.policy.exclude_paths {
        if let Err(e) = globset::Glob::new(glob) {
            errors.push(format!("policy: invalid exclude glob '{glob}': {e}"));
        }
    }

    match args.format {
        ValidateFormat::Json => {
            let result = serde_json::json!({
                "valid": errors.is_empty(),
                "path": path.display().to_string(),
                "rules_count": cfg.rules.len(),
                "errors": errors,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        ValidateFormat::Text => {
            if errors.is_empty() {
                println!("Configuration is valid!");
                println!("  {} rule(s) defined", cfg.rules.len());
            } else {
                println!("Configuration has {} error(s):", errors.len());
                for (i, err) in errors.iter().enumerate() {
                    println!("  {}. {err}", i + 1);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn cmd_schema() -> Result<()> {
    let schema = schemars::schema_for!(reviewguard_types::ReviewReport);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
