//! Commit gate

use crate::error::CommitError;
use crate::model::Entity;
use crate::selection::Selection;

/// Resolves a selection against the visible rows.
///
/// Returns the visible records whose IDs are selected, in visible order.
/// Selected IDs that are not visible are left out without error; fails only
/// when nothing at all is selected.
///
/// # Example
///
/// ```
/// use vendor_select_lib::model::Vendor;
/// use vendor_select_lib::selection::Selection;
/// use vendor_select_lib::workflow::commit;
///
/// let visible = vec![Vendor::new(1, "x"), Vendor::new(2, "y")];
/// let selection: Selection<i64> = [2, 99].into_iter().collect();
///
/// let resolved = commit(&visible, &selection).unwrap();
/// assert_eq!(resolved, vec![visible[1].clone()]);
/// ```
pub fn commit<E>(visible: &[E], selection: &Selection<E::Id>) -> Result<Vec<E>, CommitError>
where
    E: Entity + Clone,
{
    if selection.is_empty() {
        return Err(CommitError::EmptySelection);
    }

    Ok(visible
        .iter()
        .filter(|entity| selection.is_selected(&entity.id()))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vendor;

    #[test]
    fn test_empty_selection_fails_regardless_of_rows() {
        let selection = Selection::new();

        let empty: Vec<Vendor> = Vec::new();
        assert_eq!(commit(&empty, &selection), Err(CommitError::EmptySelection));

        let visible = vec![Vendor::new(1, "x")];
        assert_eq!(commit(&visible, &selection), Err(CommitError::EmptySelection));
    }

    #[test]
    fn test_resolves_in_visible_order() {
        let a = Vendor::new(1, "x");
        let b = Vendor::new(2, "y");
        let c = Vendor::new(3, "z");
        let visible = vec![a.clone(), b.clone(), c.clone()];
        let selection: Selection<i64> = [3, 1].into_iter().collect();

        assert_eq!(commit(&visible, &selection).unwrap(), vec![a, c]);

        let selection: Selection<i64> = [2].into_iter().collect();
        assert_eq!(commit(&visible, &selection).unwrap(), vec![b]);
    }

    #[test]
    fn test_hidden_ids_are_excluded() {
        let a = Vendor::new(1, "x");
        let visible = vec![a.clone()];
        let selection: Selection<i64> = [1, 99].into_iter().collect();

        assert_eq!(commit(&visible, &selection).unwrap(), vec![a]);
    }

    #[test]
    fn test_only_hidden_ids_resolves_to_nothing() {
        let visible = vec![Vendor::new(1, "x")];
        let selection: Selection<i64> = [99].into_iter().collect();

        assert_eq!(commit(&visible, &selection).unwrap(), Vec::<Vendor>::new());
    }
}
