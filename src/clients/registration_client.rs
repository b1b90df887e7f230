use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::{ResourceClient, StoreError};
use crate::clients::ProgramClient;
use crate::domain::{Registration, RegistrationCreate, RegistrationOutcome};
use crate::registration_actor::RegistrationError;

/// Client for program sign-ups.
#[derive(Clone)]
pub struct RegistrationClient {
    inner: ResourceClient<Registration>,
    program_client: ProgramClient,
}

impl_client_methods!(RegistrationClient, Registration, RegistrationError, registration);

impl RegistrationClient {
    pub fn new(inner: ResourceClient<Registration>, program_client: ProgramClient) -> Self {
        Self { inner, program_client }
    }

    /// Signs a farmer up. The store's unique (program, farmer) index turns a repeat
    /// into `AlreadyRegistered`, including two submits racing each other.
    ///
    /// The program lookup and the insert are separate messages, so a program deleted in
    /// between has already swept its registrations. The program is checked again after
    /// the insert and the new registration is withdrawn if it is gone.
    #[instrument(skip(self))]
    pub async fn add_registration(
        &self,
        params: RegistrationCreate,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        info!("Processing add_registration request");

        match self.program_client.get_program(params.program_id.clone()).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                error!("Training program not found");
                return Err(RegistrationError::ProgramNotFound(params.program_id));
            }
            Err(e) => {
                error!(error = %e, "Training program lookup failed");
                return Err(RegistrationError::ActorCommunicationError(e.to_string()));
            }
        }

        let program_id = params.program_id.clone();
        match self.inner.create(params).await {
            Ok(id) => {
                if self.program_deleted_meanwhile(&program_id).await? {
                    warn!(registration_id = %id, "Program deleted during sign-up, withdrawing registration");
                    self.inner.delete(id).await?;
                    return Err(RegistrationError::ProgramNotFound(program_id));
                }
                let registration = self
                    .inner
                    .get(id.clone())
                    .await?
                    .ok_or(RegistrationError::NotFound(id))?;
                info!(registration_id = %registration.id, "Farmer registered");
                Ok(RegistrationOutcome::Registered(registration))
            }
            Err(StoreError::Conflict { existing, .. }) => {
                info!(registration_id = %existing, "Farmer already registered");
                Ok(RegistrationOutcome::AlreadyRegistered {
                    registration_id: existing,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn program_deleted_meanwhile(&self, program_id: &str) -> Result<bool, RegistrationError> {
        match self.program_client.get_program(program_id.to_string()).await {
            Ok(program) => Ok(program.is_none()),
            Err(e) => Err(RegistrationError::ActorCommunicationError(e.to_string())),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_for_program(&self, program_id: String) -> Result<Vec<Registration>, RegistrationError> {
        debug!("Sending request");
        let mut registrations = self
            .inner
            .list(move |r: &Registration| r.program_id == program_id)
            .await?;
        registrations.sort_by(|a, b| a.registered_at.cmp(&b.registered_at));
        Ok(registrations)
    }

    #[instrument(skip(self))]
    pub async fn list_for_farmer(&self, farmer_id: String) -> Result<Vec<Registration>, RegistrationError> {
        debug!("Sending request");
        let mut registrations = self
            .inner
            .list(move |r: &Registration| r.farmer_id == farmer_id)
            .await?;
        registrations.sort_by(|a, b| a.registered_at.cmp(&b.registered_at));
        Ok(registrations)
    }

    #[instrument(skip(self))]
    pub async fn is_registered(&self, program_id: String, farmer_id: String) -> Result<bool, RegistrationError> {
        debug!("Sending request");
        let found = self
            .inner
            .list(move |r: &Registration| r.program_id == program_id && r.farmer_id == farmer_id)
            .await?;
        Ok(!found.is_empty())
    }

    #[instrument(skip(self))]
    pub async fn cancel_registration(&self, id: String) -> Result<Registration, RegistrationError> {
        debug!("Sending request");
        let registration = self.inner.delete(id).await?;
        info!(program_id = %registration.program_id, "Registration cancelled");
        Ok(registration)
    }
}
