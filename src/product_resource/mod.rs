//! Product listing: unscoped fetch, brand filter, add and bulk edit by brand.

mod dtos;
pub mod entity;

pub use dtos::*;
