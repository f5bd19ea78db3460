use reviewguard_types::{CheckState, CheckStatus, FindingCounts, ReviewPolicy, Verdict};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    /// Human-readable reasons, in evaluation order.
    pub rationale: Vec<String>,
}

/// Produce the verdict from finding counts and CI check states.
///
/// Rejection reasons are absolute: a failing required check or any
/// critical finding rejects no matter what else is true. Warnings above
/// the policy budget request changes. Pending checks never block; they
/// are surfaced in the rationale so the caller can re-run later.
pub fn decide(counts: FindingCounts, checks: &[CheckStatus], policy: &ReviewPolicy) -> Decision {
    let is_required = |name: &str| {
        policy.required_checks.is_empty() || policy.required_checks.iter().any(|c| c == name)
    };

    let failed: Vec<&str> = checks
        .iter()
        .filter(|c| c.state == CheckState::Fail && is_required(&c.name))
        .map(|c| c.name.as_str())
        .collect();
    let pending: Vec<&str> = checks
        .iter()
        .filter(|c| c.state == CheckState::Pending && is_required(&c.name))
        .map(|c| c.name.as_str())
        .collect();

    let mut rationale = Vec::new();

    for name in &failed {
        rationale.push(format!("required check '{name}' failed"));
    }
    if counts.critical > 0 {
        rationale.push(format!(
            "{} critical finding(s) must be resolved",
            counts.critical
        ));
    }

    if !failed.is_empty() || counts.critical > 0 {
        if !pending.is_empty() {
            rationale.push(format!("{} check(s) still pending", pending.len()));
        }
        return Decision {
            verdict: Verdict::Reject,
            rationale,
        };
    }

    if counts.warning > policy.max_warnings {
        rationale.push(format!(
            "{} warning finding(s) exceed the budget of {}",
            counts.warning, policy.max_warnings
        ));
        if !pending.is_empty() {
            rationale.push(format!("{} check(s) still pending", pending.len()));
        }
        return Decision {
            verdict: Verdict::RequestChanges,
            rationale,
        };
    }

    if counts.info > 0 {
        rationale.push(format!(
            "{} informational finding(s) noted, none blocking",
            counts.info
        ));
    }
    if !pending.is_empty() {
        rationale.push(format!("{} check(s) still pending", pending.len()));
    }
    rationale.push("no blocking findings and all required checks passed".to_string());

    Decision {
        verdict: Verdict::Approve,
        rationale,
    }
}
