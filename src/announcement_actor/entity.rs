use chrono::Utc;
use validator::Validate;

use super::error::AnnouncementError;
use crate::actor_framework::Entity;
use crate::domain::validation::not_blank;
use crate::domain::{Announcement, AnnouncementCreate, AnnouncementPatch};

impl Entity for Announcement {
    type Id = String;
    type CreateParams = AnnouncementCreate;
    type Patch = AnnouncementPatch;
    type Action = ();
    type ActionResult = ();
    type Error = AnnouncementError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: AnnouncementCreate) -> Result<Self, AnnouncementError> {
        params
            .validate()
            .map_err(|e| AnnouncementError::Validation(e.to_string()))?;
        Ok(Self {
            id,
            title: params.title,
            body: params.body,
            author_id: params.author_id,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, patch: AnnouncementPatch) -> Result<(), AnnouncementError> {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if not_blank(&self.title).is_err() || not_blank(&self.body).is_err() {
            return Err(AnnouncementError::Validation(
                "title and body are required".to_string(),
            ));
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), AnnouncementError> {
        Ok(())
    }
}
