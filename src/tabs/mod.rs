//! Dashboard tabs: domain-named operations on top of a list view model.

#[macro_use]
mod macros;

pub mod orders_tab;
pub mod products_tab;
pub mod users_tab;

pub use orders_tab::OrdersTab;
pub use products_tab::ProductsTab;
pub use users_tab::UsersTab;
