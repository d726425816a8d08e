use std::fmt;

use crate::error::CoreError;
use crate::types::{AttributeRecord, AttributeSelection};
use crate::upload::UploadedFile;

/// The states of the subject-facing proof generation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum WorkflowState {
    /// Waiting for the subject to select a document image.
    Uploading,
    /// Decode + parse in flight.
    Extracting,
    /// Extracted facts shown; subject picks what to disclose.
    SelectingAttributes,
    /// Selection locked for review; issuance can be requested.
    Reviewing,
    /// A proof record was issued.
    Issued,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uploading => write!(f, "Uploading"),
            Self::Extracting => write!(f, "Extracting"),
            Self::SelectingAttributes => write!(f, "SelectingAttributes"),
            Self::Reviewing => write!(f, "Reviewing"),
            Self::Issued => write!(f, "Issued"),
        }
    }
}

/// Events that drive workflow transitions. Every retry is subject-initiated;
/// nothing here fires automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// Upload passed local validation.
    UploadAccepted,
    /// Decode + parse produced an attribute record.
    ExtractionSucceeded,
    /// Decode or parse failed; back to the upload step.
    ExtractionFailed,
    /// At least one attribute flag confirmed.
    SelectionConfirmed,
    /// The issuer returned a proof record.
    IssuanceSucceeded,
    /// Issuance failed in a way the fallback did not absorb.
    IssuanceFailed,
    /// Subject starts over after issuance.
    Reset,
}

/// Pure transition table for the workflow.
///
/// Valid transitions:
/// - Uploading → Extracting (UploadAccepted)
/// - Extracting → SelectingAttributes (ExtractionSucceeded)
/// - Extracting → Uploading (ExtractionFailed)
/// - SelectingAttributes → Reviewing (SelectionConfirmed)
/// - Reviewing → Issued (IssuanceSucceeded)
/// - Reviewing → Reviewing (IssuanceFailed)
/// - Issued → Uploading (Reset)
pub struct WorkflowMachine;

impl WorkflowMachine {
    /// Attempt a transition. Returns the new state, or an error for
    /// invalid (state, event) pairs.
    pub fn transition(
        current: WorkflowState,
        event: WorkflowEvent,
    ) -> Result<WorkflowState, CoreError> {
        let new_state = match (current, event) {
            (WorkflowState::Uploading, WorkflowEvent::UploadAccepted) => WorkflowState::Extracting,

            (WorkflowState::Extracting, WorkflowEvent::ExtractionSucceeded) => {
                WorkflowState::SelectingAttributes
            }
            (WorkflowState::Extracting, WorkflowEvent::ExtractionFailed) => {
                WorkflowState::Uploading
            }

            (WorkflowState::SelectingAttributes, WorkflowEvent::SelectionConfirmed) => {
                WorkflowState::Reviewing
            }

            (WorkflowState::Reviewing, WorkflowEvent::IssuanceSucceeded) => WorkflowState::Issued,
            (WorkflowState::Reviewing, WorkflowEvent::IssuanceFailed) => WorkflowState::Reviewing,

            (WorkflowState::Issued, WorkflowEvent::Reset) => WorkflowState::Uploading,

            _ => {
                return Err(CoreError::InvalidTransition {
                    from: current,
                    event,
                });
            }
        };

        tracing::debug!(from = %current, to = %new_state, event = ?event, "workflow transition");

        Ok(new_state)
    }
}

/// Session context threaded through parser → issuer → store calls.
///
/// Owns the per-session mutable state the flow needs: the current workflow
/// state, the extracted attribute record, and the disclosure selection.
/// There is at most one active session per subject, so no locking.
#[derive(Debug)]
pub struct WorkflowSession {
    identity: String,
    state: WorkflowState,
    record: Option<AttributeRecord>,
    selection: AttributeSelection,
    last_error: Option<String>,
}

impl WorkflowSession {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            state: WorkflowState::Uploading,
            record: None,
            selection: AttributeSelection::default(),
            last_error: None,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// The attribute record extracted this session, if any.
    pub fn record(&self) -> Option<&AttributeRecord> {
        self.record.as_ref()
    }

    pub fn selection(&self) -> AttributeSelection {
        self.selection
    }

    /// The last subject-facing error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Validate an upload and move to `Extracting`.
    pub fn accept_upload(&mut self, upload: &UploadedFile) -> Result<(), CoreError> {
        upload.validate()?;
        self.state = WorkflowMachine::transition(self.state, WorkflowEvent::UploadAccepted)?;
        self.last_error = None;
        Ok(())
    }

    /// Record a successful decode + parse and move to attribute selection.
    pub fn extraction_succeeded(&mut self, record: AttributeRecord) -> Result<(), CoreError> {
        self.state = WorkflowMachine::transition(self.state, WorkflowEvent::ExtractionSucceeded)?;
        self.record = Some(record);
        self.last_error = None;
        Ok(())
    }

    /// Record a decode/format failure and return to the upload step.
    pub fn extraction_failed(&mut self, message: impl Into<String>) -> Result<(), CoreError> {
        self.state = WorkflowMachine::transition(self.state, WorkflowEvent::ExtractionFailed)?;
        self.record = None;
        self.last_error = Some(message.into());
        Ok(())
    }

    /// Replace the disclosure selection. Takes effect at confirmation time.
    pub fn set_selection(&mut self, selection: AttributeSelection) {
        self.selection = selection;
    }

    /// Confirm the selection and move to review.
    ///
    /// Returns `Ok(false)` — blocked, not an error — when no attribute flag
    /// is set; the session stays in `SelectingAttributes`.
    pub fn confirm_selection(&mut self) -> Result<bool, CoreError> {
        if self.state != WorkflowState::SelectingAttributes {
            return Err(CoreError::InvalidTransition {
                from: self.state,
                event: WorkflowEvent::SelectionConfirmed,
            });
        }
        if !self.selection.any() {
            return Ok(false);
        }
        self.state = WorkflowMachine::transition(self.state, WorkflowEvent::SelectionConfirmed)?;
        Ok(true)
    }

    /// Record a successful issuance. The attribute record is session-scoped
    /// and is discarded here.
    pub fn issuance_succeeded(&mut self) -> Result<(), CoreError> {
        self.state = WorkflowMachine::transition(self.state, WorkflowEvent::IssuanceSucceeded)?;
        self.record = None;
        self.last_error = None;
        Ok(())
    }

    /// Record a non-absorbed issuance failure; stays in `Reviewing`.
    pub fn issuance_failed(&mut self, message: impl Into<String>) -> Result<(), CoreError> {
        self.state = WorkflowMachine::transition(self.state, WorkflowEvent::IssuanceFailed)?;
        self.last_error = Some(message.into());
        Ok(())
    }

    /// Subject-initiated reset after issuance; clears record and selection.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        self.state = WorkflowMachine::transition(self.state, WorkflowEvent::Reset)?;
        self.record = None;
        self.selection = AttributeSelection::default();
        self.last_error = None;
        Ok(())
    }
}
