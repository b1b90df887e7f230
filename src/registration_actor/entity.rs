use chrono::Utc;
use validator::Validate;

use super::error::RegistrationError;
use crate::actor_framework::Entity;
use crate::domain::{Registration, RegistrationCreate};

impl Entity for Registration {
    type Id = String;
    type CreateParams = RegistrationCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Error = RegistrationError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Stamps `registered_at` with the store's clock.
    fn from_create_params(id: String, params: RegistrationCreate) -> Result<Self, RegistrationError> {
        params
            .validate()
            .map_err(|e| RegistrationError::Validation(e.to_string()))?;
        Ok(Self {
            id,
            program_id: params.program_id,
            farmer_id: params.farmer_id,
            farmer_name: params.farmer_name,
            contact: params.contact,
            registered_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(Registration::key(&self.program_id, &self.farmer_id))
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), RegistrationError> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), RegistrationError> {
        Ok(())
    }
}
