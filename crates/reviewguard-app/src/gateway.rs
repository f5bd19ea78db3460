use std::fmt;

use reviewguard_types::CheckStatus;

/// Opaque pull-request identifier, formatted however the backing
/// gateway expects ("1234", "org/repo#1234", a URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrId(pub String);

impl fmt::Display for PrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The raw inputs a review run needs from the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrSnapshot {
    /// Unified diff text for the full change-set.
    pub diff: String,
    /// The PR description, empty when absent.
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("pull request '{0}' not found")]
    NotFound(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Protocol(String),
}

/// Access to pull-request data. Implementations exist for local files
/// (the CLI) and for tests; a hosted-API implementation plugs in here
/// without touching the pipeline.
pub trait VcsGateway {
    fn fetch_snapshot(&self, pr: &PrId) -> Result<PrSnapshot, GatewayError>;
    fn fetch_check_statuses(&self, pr: &PrId) -> Result<Vec<CheckStatus>, GatewayError>;
}
