//! Vendor selection library
//!
//! Keeps track of which entities a user picked from a filterable, sortable,
//! paginated listing, and validates the final pick before handing it back to
//! the calling workflow.

pub mod error;
pub mod listing;
pub mod model;
pub mod selection;
pub mod workflow;

pub use selection::AggregateStatus;
pub use selection::Selection;
pub use workflow::SelectionWorkflow;
pub use workflow::WorkflowState;
