//! Selection counters for display

use crate::selection::AggregateStatus;

/// Counters describing a selection against the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Selected IDs across every view.
    pub selected: usize,
    /// Selected IDs not in the visible rows.
    pub hidden: usize,
    /// Rows currently visible.
    pub visible: usize,
    /// Rows matching the current filters.
    pub total: usize,
    /// State of the "select all" box.
    pub status: AggregateStatus,
}

impl std::fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} selected", self.selected)?;
        if self.hidden > 0 {
            write!(f, " ({} hidden by filters)", self.hidden)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut summary = SelectionSummary {
            selected: 3,
            hidden: 0,
            visible: 10,
            total: 12,
            status: AggregateStatus::Some,
        };
        assert_eq!(summary.to_string(), "3 selected");

        summary.hidden = 1;
        assert_eq!(summary.to_string(), "3 selected (1 hidden by filters)");
    }
}
