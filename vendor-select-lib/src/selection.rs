//! Selection state management.
//!
//! Tracks which entities are selected by their identifiers, independent of
//! which filter, sort or page is currently displayed. Aggregate status is
//! always derived from the selection and the visible rows passed in, never
//! stored.

use std::collections::HashSet;
use std::hash::Hash;

use crate::model::Entity;

/// Tri-state summary of the selection relative to the visible rows.
///
/// Maps directly onto a "select all" checkbox: `All` is checked, `Some` is
/// indeterminate, `None` is unchecked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AggregateStatus {
    /// No visible row is selected.
    #[default]
    None,
    /// At least one but not every visible row is selected.
    Some,
    /// Every visible row is selected, or nothing is visible.
    All,
}

impl AggregateStatus {
    /// Whether a "select all" checkbox renders as checked.
    pub fn is_checked(self) -> bool {
        self == AggregateStatus::All
    }

    /// Whether a "select all" checkbox renders as indeterminate.
    pub fn is_indeterminate(self) -> bool {
        self == AggregateStatus::Some
    }
}

/// ID-based selection state.
///
/// Selection is a set keyed by stable identifier. Selecting a row on one page
/// and then filtering it out of view keeps it selected.
#[derive(Debug, Clone)]
pub struct Selection<K: Clone + Eq + Hash> {
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }

    /// Toggle selection of an ID.
    ///
    /// Any ID is accepted, visible or not. Returns the new membership.
    pub fn toggle(&mut self, id: K) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Select or unselect every visible row.
    ///
    /// Only IDs present in `visible` are touched; selections made against
    /// other views stay as they are. Returns how many IDs changed membership.
    pub fn set_all_visible<E>(&mut self, visible: &[E], select: bool) -> usize
    where
        E: Entity<Id = K>,
    {
        let mut changed = 0;
        for entity in visible {
            let id = entity.id();
            let flipped = if select {
                self.selected.insert(id)
            } else {
                self.selected.remove(&id)
            };
            if flipped {
                changed += 1;
            }
        }
        changed
    }

    /// Compute the aggregate status over the visible rows.
    ///
    /// An empty visible set is `All`.
    pub fn status<E>(&self, visible: &[E]) -> AggregateStatus
    where
        E: Entity<Id = K>,
    {
        let selected = visible
            .iter()
            .filter(|entity| self.selected.contains(&entity.id()))
            .count();

        if selected == visible.len() {
            AggregateStatus::All
        } else if selected > 0 {
            AggregateStatus::Some
        } else {
            AggregateStatus::None
        }
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &K) -> bool {
        self.selected.contains(id)
    }

    /// Total number of selected IDs across every view.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected IDs that are not in the visible rows.
    pub fn hidden_count<E>(&self, visible: &[E]) -> usize
    where
        E: Entity<Id = K>,
    {
        let visible_selected = visible
            .iter()
            .map(|entity| entity.id())
            .filter(|id| self.selected.contains(id))
            .collect::<HashSet<_>>()
            .len();
        self.selected.len() - visible_selected
    }

    /// Clear all selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

impl<K: Clone + Eq + Hash + Ord> Selection<K> {
    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn ids(&self) -> Vec<K> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }
}

impl<K: Clone + Eq + Hash> FromIterator<K> for Selection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
