use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{ProgramCreate, ProgramPatch, Registration, TrainingProgram};
use crate::program_actor::ProgramError;

/// Client for training programs. Holds the registration store directly so deleting a
/// program can sweep its sign-ups in one batch.
#[derive(Clone)]
pub struct ProgramClient {
    inner: ResourceClient<TrainingProgram>,
    registrations: ResourceClient<Registration>,
}

impl_client_methods!(ProgramClient, TrainingProgram, ProgramError, program);

impl ProgramClient {
    pub fn new(inner: ResourceClient<TrainingProgram>, registrations: ResourceClient<Registration>) -> Self {
        Self { inner, registrations }
    }

    #[instrument(skip(self))]
    pub async fn create_program(&self, params: ProgramCreate) -> Result<String, ProgramError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(program_id = %id, "Training program created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_program(&self, id: String, patch: ProgramPatch) -> Result<TrainingProgram, ProgramError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    /// Programs ordered by start date.
    #[instrument(skip(self))]
    pub async fn list_programs(&self) -> Result<Vec<TrainingProgram>, ProgramError> {
        debug!("Sending request");
        let mut programs = self.inner.list(|_: &TrainingProgram| true).await?;
        programs.sort_by(|a, b| a.starts_on.cmp(&b.starts_on).then_with(|| a.title.cmp(&b.title)));
        Ok(programs)
    }

    #[instrument(skip(self))]
    pub async fn list_upcoming(&self, from: NaiveDate) -> Result<Vec<TrainingProgram>, ProgramError> {
        let programs = self.list_programs().await?;
        Ok(programs.into_iter().filter(|p| p.starts_on >= from).collect())
    }

    /// Deletes the program and every registration for it. Returns the program and
    /// how many registrations went with it.
    #[instrument(skip(self))]
    pub async fn delete_program(&self, id: String) -> Result<(TrainingProgram, usize), ProgramError> {
        debug!("Sending request");
        let program = self.inner.delete(id.clone()).await?;
        let removed = self
            .registrations
            .delete_where(move |registration: &Registration| registration.program_id == id)
            .await
            .map_err(|e| ProgramError::ActorCommunicationError(e.to_string()))?;
        info!(registrations = removed.len(), "Training program deleted");
        Ok((program, removed.len()))
    }
}
