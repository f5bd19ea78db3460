//! Review evaluation pipeline.
//!
//! The pipeline is a pure function of its inputs and runs in four stages:
//!
//! 1. [`rules::compile_catalog`] turns catalog entries into compiled
//!    matchers, degrading (not failing) on per-rule compile errors.
//! 2. [`evaluate::evaluate_change_set`] scans added lines, file metrics,
//!    and the PR description against the compiled rules.
//! 3. [`aggregate::aggregate`] applies policy exclusions, deduplicates,
//!    orders, and folds findings into the per-category checklist.
//! 4. [`decide::decide`] combines finding counts with CI check states to
//!    produce the verdict and its rationale.
//!
//! Determinism is a hard requirement: identical inputs must produce an
//! identical report, byte for byte, regardless of thread scheduling.

pub mod aggregate;
pub mod decide;
pub mod evaluate;
pub mod rules;

pub use aggregate::{aggregate, Aggregation, PolicyError};
pub use decide::{decide, Decision};
pub use evaluate::evaluate_change_set;
pub use rules::{compile_catalog, CompiledCatalog, CompiledRule, DegradedRule};
