use uuid::Uuid;

/// Application-level failure taxonomy.
///
/// `Validation` and `NotFound` are expected, caller-recoverable conditions and
/// carry enough detail to name the offending field or id. `Conflict` covers
/// uniqueness violations. `Internal` wraps storage or other unexpected
/// failures and is the only variant whose detail never reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        AppError::NotFound { entity, id }
    }
}
