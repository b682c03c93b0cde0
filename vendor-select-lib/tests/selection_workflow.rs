//! Integration tests driving a selection workflow through a listing provider.
//!
//! Each test re-queries the provider the way a front end does when the user
//! changes filters, sorting or pages, and checks that the selection and the
//! aggregate status behave across those view changes.

use vendor_select_lib::AggregateStatus;
use vendor_select_lib::SelectionWorkflow;
use vendor_select_lib::WorkflowState;
use vendor_select_lib::error::CommitError;
use vendor_select_lib::error::WorkflowError;
use vendor_select_lib::listing::Filter;
use vendor_select_lib::listing::InMemoryListing;
use vendor_select_lib::listing::ListingProvider;
use vendor_select_lib::listing::OrderBy;
use vendor_select_lib::listing::Pagination;
use vendor_select_lib::listing::TableState;
use vendor_select_lib::model::Vendor;

fn catalogue() -> InMemoryListing<Vendor> {
    InMemoryListing::new(vec![
        Vendor::new(1, "Prusament"),
        Vendor::new(2, "Polymaker"),
        Vendor::new(3, "eSun"),
        Vendor::new(4, "Polyalchemy"),
        Vendor::new(5, "Sunlu"),
        Vendor::new(6, "Fillamentum"),
    ])
}

fn names(vendors: &[Vendor]) -> Vec<&str> {
    vendors.iter().map(|v| v.name.as_str()).collect()
}

#[tokio::test]
async fn test_select_across_pages_then_commit_visible() {
    let provider = catalogue();
    let mut state = TableState::new()
        .with_sorters(OrderBy::asc("id"))
        .with_pagination(Pagination::server(1, 2));
    let mut workflow = SelectionWorkflow::new();

    workflow.show(provider.list(&state).await.unwrap());
    assert_eq!(workflow.total(), 6);
    workflow.toggle(1);
    assert_eq!(workflow.status(), AggregateStatus::Some);

    state.pagination.current = 2;
    workflow.show(provider.list(&state).await.unwrap());
    assert_eq!(workflow.status(), AggregateStatus::None);
    workflow.set_all_visible(true);
    assert_eq!(workflow.status(), AggregateStatus::All);
    assert_eq!(workflow.count(), 3);
    assert_eq!(workflow.summary().to_string(), "3 selected (1 hidden by filters)");

    let committed = workflow.commit().unwrap();
    assert_eq!(names(&committed), vec!["eSun", "Polyalchemy"]);
    assert_eq!(workflow.state(), WorkflowState::Committed);
}

#[tokio::test]
async fn test_filter_scoped_select_all() {
    let provider = catalogue();
    let mut workflow = SelectionWorkflow::new();

    let mut state = TableState::new();
    state.push_filter(Filter::contains("name", "poly"));
    workflow.show(provider.list(&state).await.unwrap());
    workflow.set_all_visible(true);

    state.clear_filters();
    workflow.show(provider.list(&state).await.unwrap());
    assert_eq!(workflow.status(), AggregateStatus::Some);
    workflow.toggle(5);

    state.push_filter(Filter::contains("name", "poly"));
    workflow.show(provider.list(&state).await.unwrap());
    workflow.set_all_visible(false);
    assert_eq!(workflow.status(), AggregateStatus::None);

    assert_eq!(workflow.selection().ids(), vec![5]);
}

#[tokio::test]
async fn test_filter_with_no_matches() {
    let provider = catalogue();
    let mut workflow = SelectionWorkflow::new();

    let state = TableState::new().with_filter(Filter::eq("name", "Nobody"));
    workflow.show(provider.list(&state).await.unwrap());

    assert_eq!(workflow.status(), AggregateStatus::All);
    assert_eq!(workflow.set_all_visible(true), 0);
    assert_eq!(
        workflow.commit().unwrap_err(),
        WorkflowError::Commit(CommitError::EmptySelection)
    );
    assert_eq!(workflow.state(), WorkflowState::Open);
}

#[tokio::test]
async fn test_sort_change_keeps_selection_by_id() {
    let provider = catalogue();
    let mut workflow = SelectionWorkflow::new();

    workflow.show(provider.list(&TableState::new()).await.unwrap());
    workflow.toggle(3);
    workflow.toggle(6);

    let state = TableState::new().with_sorters(OrderBy::desc("name"));
    workflow.show(provider.list(&state).await.unwrap());

    let committed = workflow.commit().unwrap();
    assert_eq!(names(&committed), vec!["Fillamentum", "eSun"]);
}

#[tokio::test]
async fn test_cancel_discards_everything() {
    let provider = catalogue();
    let mut workflow = SelectionWorkflow::new();

    workflow.show(provider.list(&TableState::new()).await.unwrap());
    workflow.set_all_visible(true);
    workflow.cancel().unwrap();

    assert_eq!(workflow.state(), WorkflowState::Cancelled);
    assert_eq!(workflow.count(), 0);
    assert!(matches!(workflow.commit(), Err(WorkflowError::Closed(_))));
}
