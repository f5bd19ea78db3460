//! Unified diff scanning for reviewguard.
//!
//! Turns raw git-style diff text into the structured file/hunk model the
//! matcher consumes. Parsing is side-effect free; a malformed hunk header
//! aborts the whole scan rather than producing a partial change-set.

mod unified;

pub use unified::{DiffError, scan_unified_diff};
