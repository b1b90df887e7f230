use thiserror::Error;

use crate::announcement_actor::AnnouncementError;
use crate::app_system::SessionError;
use crate::cart_actor::CartError;
use crate::product_actor::ProductError;
use crate::program_actor::ProgramError;
use crate::query_actor::QueryError;
use crate::registration_actor::RegistrationError;

/// Top-level error for the portal binary.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Announcement(#[from] AnnouncementError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("Shutdown error: {0}")]
    Shutdown(String),
}

pub type Result<T, E = PortalError> = std::result::Result<T, E>;
