use chrono::Utc;
use validator::Validate;

use super::actions::QueryAction;
use super::error::QueryError;
use crate::actor_framework::Entity;
use crate::domain::{FarmerQuery, QueryCreate, QueryStatus};

impl Entity for FarmerQuery {
    type Id = String;
    type CreateParams = QueryCreate;
    type Patch = ();
    type Action = QueryAction;
    type ActionResult = FarmerQuery;
    type Error = QueryError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: QueryCreate) -> Result<Self, QueryError> {
        params
            .validate()
            .map_err(|e| QueryError::Validation(e.to_string()))?;
        Ok(Self {
            id,
            farmer_id: params.farmer_id,
            subject: params.subject,
            message: params.message,
            status: QueryStatus::Open,
            response: None,
            responded_by: None,
            created_at: Utc::now(),
            responded_at: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), QueryError> {
        Ok(())
    }

    fn handle_action(&mut self, action: QueryAction) -> Result<FarmerQuery, QueryError> {
        match action {
            QueryAction::Respond { officer_id, response } => {
                if self.status == QueryStatus::Answered {
                    return Err(QueryError::AlreadyAnswered(self.id.clone()));
                }
                if response.trim().is_empty() {
                    return Err(QueryError::Validation("response is required".to_string()));
                }
                self.status = QueryStatus::Answered;
                self.response = Some(response);
                self.responded_by = Some(officer_id);
                self.responded_at = Some(Utc::now());
                Ok(self.clone())
            }
        }
    }
}
