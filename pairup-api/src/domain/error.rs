use thiserror::Error;

/// Errors produced by profile and photo mutations.
///
/// Business-rule violations are returned as values, never panicked. Only
/// `Database` carries a store infrastructure fault; it is passed through to
/// the outer boundary untranslated.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("user or photo not found")]
    NotFound,
    #[error("photo address cannot be empty")]
    InvalidAddress,
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    #[error("asset storage failure: {0}")]
    Storage(String),
    #[error("asset materialization failed")]
    MaterializationFailed,
    #[error("update not applied")]
    UpdateNotApplied,
    #[error("store error: {0}")]
    Database(String),
    #[error("operation cancelled")]
    Cancelled,
}

impl ProfileError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}
