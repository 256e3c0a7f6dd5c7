pub mod record_id;
pub mod user;
pub mod product;
pub mod order;

pub use record_id::*;
pub use user::*;
pub use product::*;
pub use order::*;
