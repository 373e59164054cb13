//! Completion rules for line painting.
//!
//! Pure functions comparing a drawing against a level's target pattern.
//! They never mutate the ledger and may be called as often as needed.

pub mod diff;
pub mod win;

pub use diff::{extra_edges, missing_edges};
pub use win::is_complete;
