//! Error types

mod commit;
mod listing;

pub use commit::*;
pub use listing::*;
