//! Program sign-ups. The store keeps (program, farmer) unique.

pub mod entity;
pub mod error;

pub use error::*;
