//! Selection workflow
//!
//! Ties one [`Selection`] to the visible set currently shown and walks it
//! through the open → committing → committed/cancelled lifecycle.

mod commit;
mod summary;

pub use commit::*;
pub use summary::*;

use log::debug;
use log::warn;

use crate::error::WorkflowError;
use crate::listing::Listing;
use crate::model::Entity;
use crate::selection::AggregateStatus;
use crate::selection::Selection;

/// Lifecycle state of a selection workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkflowState {
    /// Accepting toggles and view changes.
    #[default]
    Open,
    /// Commit validation in progress.
    Committing,
    /// Selection was handed to the caller. Terminal.
    Committed,
    /// Selection was discarded. Terminal.
    Cancelled,
}

impl WorkflowState {
    /// Returns `true` for `Committed` and `Cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled)
    }

    /// Returns `true` if moving from `self` to `next` is allowed.
    pub fn can_transition_to(self, next: WorkflowState) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::Committing)
                | (Self::Open, Self::Cancelled)
                | (Self::Committing, Self::Committed)
                | (Self::Committing, Self::Open)
        )
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Committing => write!(f, "committing"),
            Self::Committed => write!(f, "committed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One run of the "pick some entities" workflow.
///
/// Owns the selection exclusively for its lifetime. The visible set is a
/// read-only snapshot replaced via [`show`](Self::show) whenever the caller
/// re-queries the listing provider; the selection survives every such
/// replacement.
///
/// # Example
///
/// ```
/// use vendor_select_lib::listing::Listing;
/// use vendor_select_lib::model::Vendor;
/// use vendor_select_lib::workflow::SelectionWorkflow;
///
/// let mut workflow = SelectionWorkflow::new();
/// workflow.show(Listing::all(vec![Vendor::new(1, "x"), Vendor::new(2, "y")]));
/// workflow.toggle(2);
///
/// let vendors = workflow.commit().unwrap();
/// assert_eq!(vendors[0].name, "y");
/// ```
#[derive(Debug, Clone)]
pub struct SelectionWorkflow<E: Entity> {
    state: WorkflowState,
    selection: Selection<E::Id>,
    visible: Vec<E>,
    total: usize,
}

impl<E: Entity> Default for SelectionWorkflow<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> SelectionWorkflow<E> {
    /// Opens a workflow with an empty selection and nothing visible.
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Open,
            selection: Selection::new(),
            visible: Vec::new(),
            total: 0,
        }
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Returns the selection.
    pub fn selection(&self) -> &Selection<E::Id> {
        &self.selection
    }

    /// Returns the visible rows.
    pub fn visible(&self) -> &[E] {
        &self.visible
    }

    /// Returns the total number of rows matching the current filters.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Replaces the visible set with a fresh listing. Selection is untouched.
    pub fn show(&mut self, listing: Listing<E>) {
        if self.ignored("show") {
            return;
        }
        self.total = listing.total();
        self.visible = listing.into_items();
        debug!(
            "Showing {} of {} rows, {} selected",
            self.visible.len(),
            self.total,
            self.selection.count()
        );
    }

    /// Flips membership of `id`. Returns the new membership.
    pub fn toggle(&mut self, id: E::Id) -> bool {
        if self.ignored("toggle") {
            return self.selection.is_selected(&id);
        }
        self.selection.toggle(id)
    }

    /// Selects or unselects every visible row. Returns how many changed.
    pub fn set_all_visible(&mut self, select: bool) -> usize {
        if self.ignored("set_all_visible") {
            return 0;
        }
        self.selection.set_all_visible(&self.visible, select)
    }

    /// Aggregate status of the selection over the visible rows.
    pub fn status(&self) -> AggregateStatus {
        self.selection.status(&self.visible)
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &E::Id) -> bool {
        self.selection.is_selected(id)
    }

    /// Total number of selected IDs across every view.
    pub fn count(&self) -> usize {
        self.selection.count()
    }

    /// Number of selected IDs not in the visible rows.
    pub fn hidden_count(&self) -> usize {
        self.selection.hidden_count(&self.visible)
    }

    /// Snapshot of the counters shown next to the "select all" box.
    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            selected: self.count(),
            hidden: self.hidden_count(),
            visible: self.visible.len(),
            total: self.total,
            status: self.status(),
        }
    }

    /// Validates the selection and resolves it against the visible rows.
    ///
    /// On success the workflow is committed and the selection discarded. An
    /// empty selection returns the workflow to `Open` so the user can keep
    /// working.
    pub fn commit(&mut self) -> Result<Vec<E>, WorkflowError>
    where
        E: Clone,
    {
        if self.state.is_terminal() {
            return Err(WorkflowError::Closed(self.state));
        }

        self.transition(WorkflowState::Committing);
        match commit(&self.visible, &self.selection) {
            Ok(resolved) => {
                if resolved.len() < self.selection.count() {
                    debug!(
                        "Committing {} of {} selected rows; the rest are not visible",
                        resolved.len(),
                        self.selection.count()
                    );
                }
                self.transition(WorkflowState::Committed);
                self.discard();
                Ok(resolved)
            }
            Err(err) => {
                self.transition(WorkflowState::Open);
                Err(err.into())
            }
        }
    }

    /// Discards the selection and closes the workflow.
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        if self.state.is_terminal() {
            return Err(WorkflowError::Closed(self.state));
        }
        self.transition(WorkflowState::Cancelled);
        self.discard();
        Ok(())
    }

    fn transition(&mut self, next: WorkflowState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        debug!("Selection workflow {} -> {}", self.state, next);
        self.state = next;
    }

    fn discard(&mut self) {
        self.selection.clear();
        self.visible.clear();
        self.total = 0;
    }

    /// Logs and reports mutations attempted after the workflow closed.
    fn ignored(&self, operation: &str) -> bool {
        if self.state.is_terminal() {
            warn!("Ignoring {} on {} selection workflow", operation, self.state);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommitError;
    use crate::model::Vendor;

    fn listing(ids: &[i64]) -> Listing<Vendor> {
        Listing::all(
            ids.iter()
                .map(|&id| Vendor::new(id, format!("vendor {}", id)))
                .collect(),
        )
    }

    #[test]
    fn test_transitions() {
        use WorkflowState::*;

        assert!(Open.can_transition_to(Committing));
        assert!(Open.can_transition_to(Cancelled));
        assert!(Committing.can_transition_to(Committed));
        assert!(Committing.can_transition_to(Open));
        assert!(!Open.can_transition_to(Committed));
        assert!(!Committed.can_transition_to(Open));
        assert!(!Cancelled.can_transition_to(Open));
        assert!(Committed.is_terminal() && Cancelled.is_terminal());
    }

    #[test]
    fn test_empty_commit_keeps_workflow_open() {
        let mut workflow = SelectionWorkflow::new();
        workflow.show(listing(&[1, 2]));

        let err = workflow.commit().unwrap_err();
        assert_eq!(err, WorkflowError::Commit(CommitError::EmptySelection));
        assert!(err.is_recoverable());
        assert_eq!(workflow.state(), WorkflowState::Open);
        assert_eq!(workflow.visible().len(), 2);

        workflow.toggle(1);
        let committed = workflow.commit().unwrap();
        assert_eq!(committed.len(), 1);
        assert_eq!(workflow.state(), WorkflowState::Committed);
    }

    #[test]
    fn test_commit_discards_selection() {
        let mut workflow = SelectionWorkflow::new();
        workflow.show(listing(&[1, 2]));
        workflow.set_all_visible(true);

        assert_eq!(workflow.commit().unwrap().len(), 2);
        assert_eq!(workflow.count(), 0);
        assert!(workflow.visible().is_empty());
        assert_eq!(
            workflow.commit().unwrap_err(),
            WorkflowError::Closed(WorkflowState::Committed)
        );
    }

    #[test]
    fn test_cancel_is_terminal() {
        let mut workflow = SelectionWorkflow::new();
        workflow.show(listing(&[1]));
        workflow.toggle(1);

        workflow.cancel().unwrap();
        assert_eq!(workflow.state(), WorkflowState::Cancelled);
        assert_eq!(workflow.count(), 0);

        assert!(!workflow.toggle(1));
        assert_eq!(workflow.set_all_visible(true), 0);
        assert_eq!(
            workflow.cancel().unwrap_err(),
            WorkflowError::Closed(WorkflowState::Cancelled)
        );
        assert!(!workflow.commit().unwrap_err().is_recoverable());
    }

    #[test]
    fn test_selection_persists_across_views() {
        let mut workflow = SelectionWorkflow::new();
        workflow.show(listing(&[1, 2]));
        workflow.toggle(1);

        workflow.show(listing(&[3, 4]));
        assert!(workflow.is_selected(&1));
        assert_eq!(workflow.count(), 1);
        assert_eq!(workflow.status(), AggregateStatus::None);
        assert_eq!(workflow.hidden_count(), 1);

        workflow.set_all_visible(true);
        assert_eq!(workflow.count(), 3);
        assert_eq!(workflow.status(), AggregateStatus::All);

        workflow.show(listing(&[1, 2]));
        assert_eq!(workflow.status(), AggregateStatus::Some);
    }

    #[test]
    fn test_commit_resolves_only_visible_rows() {
        let mut workflow = SelectionWorkflow::new();
        workflow.show(listing(&[1, 2]));
        workflow.toggle(1);
        workflow.show(listing(&[2, 3]));
        workflow.toggle(3);

        let committed = workflow.commit().unwrap();
        assert_eq!(committed.iter().map(|v| v.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_empty_view_renders_select_all_checked() {
        let mut workflow: SelectionWorkflow<Vendor> = SelectionWorkflow::new();
        workflow.show(Listing::default());

        assert!(workflow.status().is_checked());
    }
}
