//! User listing: debounced search, block toggle and profile edits.

mod actions;
pub mod entity;

pub use actions::*;
