use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::domain::{Role, SessionUser};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error("{0} is already logged in")]
    AlreadyLoggedIn(String),
    #[error("Invalid access code for {0}")]
    InvalidAccessCode(Role),
    #[error("This action needs the {required} role, current user is a {actual}")]
    WrongRole { required: Role, actual: Role },
}

/// Who is signed in, shared by everything that needs it.
///
/// Login sets the user and logout clears it; views follow changes through `subscribe`.
/// Officer and supplier accounts must present the configured access code.
#[derive(Clone)]
pub struct AuthState {
    current: Arc<watch::Sender<Option<SessionUser>>>,
    officer_code: String,
    supplier_code: String,
}

impl AuthState {
    pub fn new(officer_code: impl Into<String>, supplier_code: impl Into<String>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current: Arc::new(current),
            officer_code: officer_code.into(),
            supplier_code: supplier_code.into(),
        }
    }

    #[instrument(skip(self, access_code))]
    pub fn login(
        &self,
        user_id: &str,
        display_name: &str,
        role: Role,
        access_code: Option<&str>,
    ) -> Result<SessionUser, SessionError> {
        let expected = match role {
            Role::Farmer => None,
            Role::ExtensionOfficer => Some(self.officer_code.as_str()),
            Role::Supplier => Some(self.supplier_code.as_str()),
        };
        if let Some(expected) = expected {
            if access_code != Some(expected) {
                warn!("Rejected access code");
                return Err(SessionError::InvalidAccessCode(role));
            }
        }

        let user = SessionUser {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
            role,
        };
        // Check and set under the channel's lock so racing logins cannot both win.
        let mut signed_in = None;
        self.current.send_if_modified(|current| match current {
            Some(existing) => {
                signed_in = Some(existing.user_id.clone());
                false
            }
            None => {
                *current = Some(user.clone());
                true
            }
        });
        if let Some(existing) = signed_in {
            return Err(SessionError::AlreadyLoggedIn(existing));
        }
        info!("Logged in");
        Ok(user)
    }

    /// Clears the session, returning whoever was logged in.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Option<SessionUser> {
        let previous = self.current.send_replace(None);
        if let Some(user) = &previous {
            info!(user_id = %user.user_id, "Logged out");
        }
        previous
    }

    pub fn current(&self) -> Option<SessionUser> {
        self.current.borrow().clone()
    }

    pub fn require_role(&self, role: Role) -> Result<SessionUser, SessionError> {
        let user = self.current().ok_or(SessionError::NotLoggedIn)?;
        if user.role != role {
            return Err(SessionError::WrongRole {
                required: role,
                actual: user.role,
            });
        }
        Ok(user)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AuthState {
        AuthState::new("officer-code", "supplier-code")
    }

    #[test]
    fn test_farmer_logs_in_without_code() {
        let auth = auth();
        let user = auth.login("farmer_1", "Amina", Role::Farmer, None).unwrap();
        assert_eq!(user.role, Role::Farmer);
        assert_eq!(auth.current(), Some(user));
    }

    #[test]
    fn test_privileged_roles_need_matching_code() {
        let auth = auth();
        assert_eq!(
            auth.login("officer_1", "Baraka", Role::ExtensionOfficer, Some("wrong")),
            Err(SessionError::InvalidAccessCode(Role::ExtensionOfficer))
        );
        assert_eq!(
            auth.login("supplier_1", "Agrovet", Role::Supplier, None),
            Err(SessionError::InvalidAccessCode(Role::Supplier))
        );
        assert!(auth.current().is_none());

        auth.login("supplier_1", "Agrovet", Role::Supplier, Some("supplier-code"))
            .unwrap();
    }

    #[test]
    fn test_require_role_and_logout() {
        let auth = auth();
        assert_eq!(auth.require_role(Role::Farmer), Err(SessionError::NotLoggedIn));

        auth.login("farmer_1", "Amina", Role::Farmer, None).unwrap();
        assert_eq!(
            auth.require_role(Role::Supplier),
            Err(SessionError::WrongRole {
                required: Role::Supplier,
                actual: Role::Farmer,
            })
        );
        assert_eq!(
            auth.login("farmer_2", "Juma", Role::Farmer, None),
            Err(SessionError::AlreadyLoggedIn("farmer_1".to_string()))
        );

        let previous = auth.logout().unwrap();
        assert_eq!(previous.user_id, "farmer_1");
        assert_eq!(auth.require_role(Role::Farmer), Err(SessionError::NotLoggedIn));
    }

    #[test]
    fn test_racing_logins_admit_one_user() {
        let auth = auth();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let auth = auth.clone();
                std::thread::spawn(move || {
                    auth.login(&format!("farmer_{}", i), "Farmer", Role::Farmer, None)
                })
            })
            .collect();

        let admitted: Vec<SessionUser> = handles
            .into_iter()
            .filter_map(|handle| handle.join().unwrap().ok())
            .collect();
        assert_eq!(admitted.len(), 1);
        assert_eq!(auth.current(), Some(admitted[0].clone()));
    }

    #[tokio::test]
    async fn test_subscribers_see_login_and_logout() {
        let auth = auth();
        let mut rx = auth.subscribe();

        auth.login("farmer_1", "Amina", Role::Farmer, None).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|u| u.user_id.clone()), Some("farmer_1".to_string()));

        auth.logout();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
