//! HTTP handlers for users and items.

pub mod items;
pub mod users;
pub use items::*;
pub use users::*;
