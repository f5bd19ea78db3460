use proptest::prelude::*;

use reviewguard_catalog::builtin_rules;
use reviewguard_domain::{aggregate, compile_catalog, decide, evaluate_change_set};
use reviewguard_types::{
    AddedLine, ChangeSet, CheckState, CheckStatus, FileDiff, FileStatus, Hunk, ReviewPolicy,
    Severity, Verdict,
};

fn change_set(files: Vec<(String, Vec<String>)>) -> ChangeSet {
    let diffs = files
        .into_iter()
        .map(|(path, lines)| FileDiff {
            path,
            status: FileStatus::Modified,
            hunks: vec![Hunk {
                new_start: 1,
                added: lines
                    .into_iter()
                    .enumerate()
                    .map(|(i, content)| AddedLine {
                        line: i as u32 + 1,
                        content,
                    })
                    .collect(),
            }],
        })
        .collect();
    ChangeSet::new(diffs, String::new())
}

fn arb_path() -> impl Strategy<Value = String> {
    "(src|lib|app)/[a-z]{1,8}\\.(ts|tsx|js)"
}

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_ .;=()]{0,80}",
        Just("console.log('debug');".to_string()),
        Just("debugger".to_string()),
        Just("const x: any = 1;".to_string()),
        Just(r#"const apiKey = "sk_live_abcdef123456";"#.to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The full pipeline is deterministic despite parallel file scans.
    #[test]
    fn pipeline_is_deterministic(
        files in prop::collection::vec(
            (arb_path(), prop::collection::vec(arb_line(), 0..20)),
            0..6,
        ),
    ) {
        let compiled = compile_catalog(&builtin_rules());
        prop_assert!(compiled.degraded.is_empty());
        let policy = ReviewPolicy::default();

        let changes = change_set(files);
        let a = evaluate_change_set(&changes, &compiled.rules);
        let b = evaluate_change_set(&changes, &compiled.rules);
        prop_assert_eq!(&a, &b);

        let agg_a = aggregate(a, &policy, &compiled.degraded).unwrap();
        let agg_b = aggregate(b, &policy, &compiled.degraded).unwrap();
        prop_assert_eq!(&agg_a, &agg_b);
    }

    /// Aggregated findings are unique by (rule, path, line) and ordered.
    #[test]
    fn aggregation_dedups_and_orders(
        files in prop::collection::vec(
            (arb_path(), prop::collection::vec(arb_line(), 0..20)),
            0..6,
        ),
    ) {
        let compiled = compile_catalog(&builtin_rules());
        let changes = change_set(files);
        let findings = evaluate_change_set(&changes, &compiled.rules);
        let agg = aggregate(findings, &ReviewPolicy::default(), &compiled.degraded).unwrap();

        let mut seen = std::collections::BTreeSet::new();
        for f in agg.findings() {
            prop_assert!(seen.insert(f.dedup_key()), "duplicate finding {:?}", f.dedup_key());
        }

        for group in agg.findings_by_category.values() {
            for pair in group.windows(2) {
                prop_assert!(pair[0].sort_key() <= pair[1].sort_key());
            }
        }
    }

    /// Adding a failing required check never moves the verdict toward
    /// Approve.
    #[test]
    fn failing_check_is_monotone(
        info in 0u32..5,
        warning in 0u32..5,
        critical in 0u32..3,
    ) {
        let counts = reviewguard_types::FindingCounts { info, warning, critical };
        let policy = ReviewPolicy::default();

        let without = decide(counts, &[], &policy);
        let with = decide(
            counts,
            &[CheckStatus { name: "ci/test".to_string(), state: CheckState::Fail }],
            &policy,
        );

        prop_assert_eq!(with.verdict, Verdict::Reject);
        if without.verdict == Verdict::Reject {
            prop_assert_eq!(with.verdict, without.verdict);
        }
    }
}

/// End-to-end over the built-in catalog: a leaked live key is a single
/// critical finding and an automatic rejection.
#[test]
fn leaked_key_rejects_with_one_critical_finding() {
    let compiled = compile_catalog(&builtin_rules());
    let changes = change_set(vec![(
        "src/api/client.ts".to_string(),
        vec![r#"const API_KEY = "sk_live_abc123";"#.to_string()],
    )]);

    let findings = evaluate_change_set(&changes, &compiled.rules);
    let agg = aggregate(findings, &ReviewPolicy::default(), &compiled.degraded).unwrap();
    assert_eq!(agg.counts.critical, 1, "one deduplicated critical finding");

    let decision = decide(
        agg.counts,
        &[CheckStatus {
            name: "ci/test".to_string(),
            state: CheckState::Pass,
        }],
        &ReviewPolicy::default(),
    );
    assert_eq!(decision.verdict, Verdict::Reject);
}

/// The same leaked key in an excluded example file is not a finding.
#[test]
fn leaked_key_in_example_file_is_excluded() {
    let compiled = compile_catalog(&builtin_rules());
    let changes = change_set(vec![(
        "config/client.ts.example".to_string(),
        vec![r#"const API_KEY = "sk_live_abc123";"#.to_string()],
    )]);

    let findings = evaluate_change_set(&changes, &compiled.rules);
    let agg = aggregate(findings, &ReviewPolicy::default(), &compiled.degraded).unwrap();
    assert_eq!(agg.counts.total(), 0);
}

#[test]
fn builtin_catalog_compiles_without_degradation() {
    let compiled = compile_catalog(&builtin_rules());
    assert!(compiled.degraded.is_empty(), "{:?}", compiled.degraded);
    assert!(compiled.rules.len() >= 135);
}

#[test]
fn oversized_component_without_test_requests_changes() {
    let compiled = compile_catalog(&builtin_rules());
    let lines: Vec<String> = (0..250).map(|i| format!("const v{i} = {i};")).collect();
    let diffs = vec![FileDiff {
        path: "src/components/Dashboard.tsx".to_string(),
        status: FileStatus::Added,
        hunks: vec![Hunk {
            new_start: 1,
            added: lines
                .into_iter()
                .enumerate()
                .map(|(i, content)| AddedLine {
                    line: i as u32 + 1,
                    content,
                })
                .collect(),
        }],
    }];
    let changes = ChangeSet::new(diffs, String::new());

    let findings = evaluate_change_set(&changes, &compiled.rules);
    let agg = aggregate(findings, &ReviewPolicy::default(), &compiled.degraded).unwrap();

    let size = agg
        .findings()
        .find(|f| f.rule_id == "structure.component_size")
        .expect("size finding");
    assert_eq!(size.severity, Severity::Warning);
    assert!(agg.findings().any(|f| f.rule_id == "testing.missing_tests"));

    let decision = decide(agg.counts, &[], &ReviewPolicy::default());
    assert_eq!(decision.verdict, Verdict::RequestChanges);
}
