//! Product listings, including the stock lookup used for advisory cart checks.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
