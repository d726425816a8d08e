use crate::workflow::{WorkflowEvent, WorkflowState};

/// Core errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid workflow transition from {from} on {event:?}")]
    InvalidTransition {
        from: WorkflowState,
        event: WorkflowEvent,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid proof id: {0}")]
    InvalidProofId(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
