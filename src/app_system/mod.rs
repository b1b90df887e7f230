//! System orchestration, configuration, session state, startup, and shutdown logic.

pub mod config;
pub mod error;
pub mod portal_system;
pub mod session;
pub mod tracing;

pub use config::*;
pub use error::*;
pub use portal_system::*;
pub use session::*;
pub use self::tracing::*;
