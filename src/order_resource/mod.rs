//! Order listing: date-scoped fetch, status filter and date/total sorting.

mod sort;
pub mod entity;

pub use sort::*;
pub use entity::day_bounds;
