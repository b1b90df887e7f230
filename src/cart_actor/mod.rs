//! Per-user carts, keyed by the owning user's id.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
