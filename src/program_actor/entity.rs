use chrono::Utc;
use validator::Validate;

use super::error::ProgramError;
use crate::actor_framework::Entity;
use crate::domain::validation::not_blank;
use crate::domain::{ProgramCreate, ProgramPatch, TrainingProgram};

impl Entity for TrainingProgram {
    type Id = String;
    type CreateParams = ProgramCreate;
    type Patch = ProgramPatch;
    type Action = ();
    type ActionResult = ();
    type Error = ProgramError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: ProgramCreate) -> Result<Self, ProgramError> {
        params
            .validate()
            .map_err(|e| ProgramError::Validation(e.to_string()))?;
        Ok(Self {
            id,
            title: params.title,
            description: params.description,
            location: params.location,
            starts_on: params.starts_on,
            officer_id: params.officer_id,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, patch: ProgramPatch) -> Result<(), ProgramError> {
        if let Some(title) = patch.title {
            not_blank(&title).map_err(|_| ProgramError::Validation("title is required".to_string()))?;
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(location) = patch.location {
            not_blank(&location).map_err(|_| ProgramError::Validation("location is required".to_string()))?;
            self.location = location;
        }
        if let Some(starts_on) = patch.starts_on {
            self.starts_on = starts_on;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), ProgramError> {
        Ok(())
    }
}
