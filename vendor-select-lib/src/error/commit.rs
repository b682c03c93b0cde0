//! Commit and workflow error types

use crate::workflow::WorkflowState;

/// Errors raised when committing a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    /// Commit was requested with nothing selected.
    ///
    /// Recoverable: the workflow stays open and the user can keep selecting.
    #[error("No vendors selected")]
    EmptySelection,
}

/// Errors returned by [`SelectionWorkflow`](crate::workflow::SelectionWorkflow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// The commit gate rejected the selection.
    #[error(transparent)]
    Commit(#[from] CommitError),

    /// The workflow already reached a terminal state.
    #[error("Selection workflow is already {0}")]
    Closed(WorkflowState),
}

impl WorkflowError {
    /// Returns `true` if the workflow is still open after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Commit(_))
    }
}
