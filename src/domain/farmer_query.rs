use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::validation::not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStatus {
    Open,
    Answered,
}

/// A question a farmer sends to the extension officers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerQuery {
    pub id: String,
    pub farmer_id: String,
    pub subject: String,
    pub message: String,
    pub status: QueryStatus,
    pub response: Option<String>,
    pub responded_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QueryCreate {
    #[validate(length(min = 1))]
    pub farmer_id: String,
    #[validate(custom = "not_blank")]
    pub subject: String,
    #[validate(custom = "not_blank")]
    pub message: String,
}
