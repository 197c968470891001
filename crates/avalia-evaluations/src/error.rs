use thiserror::Error;
use uuid::Uuid;

use avalia_storage::StorageError;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("protocol not found: {0}")]
    ProtocolNotFound(Uuid),

    #[error("evaluation not found: {0}")]
    EvaluationNotFound(Uuid),

    #[error("linked protocol instance not found: {0}")]
    InstanceNotFound(Uuid),

    #[error("task item {protocol_item_id} is not part of instance {instance_id}")]
    UnknownTaskItem {
        instance_id: Uuid,
        protocol_item_id: Uuid,
    },

    #[error("scoring rule {scoring_rule_id} is not part of instance {instance_id}")]
    UnknownScoringRule {
        instance_id: Uuid,
        scoring_rule_id: Uuid,
    },

    #[error("evaluation {0} is finalized")]
    EvaluationFinalized(Uuid),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid protocol: {0}")]
    InvalidProtocol(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Map a storage-level missing document onto the typed not-found variant for
/// the entity being read; everything else stays a storage error.
pub(crate) fn not_found_as(err: StorageError, mapped: EvaluationError) -> EvaluationError {
    match err {
        StorageError::NotFound { .. } => mapped,
        other => EvaluationError::Storage(other),
    }
}
