use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::validation::not_blank;

/// A training session run by an extension officer that farmers can sign up for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingProgram {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_on: NaiveDate,
    pub officer_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProgramCreate {
    #[validate(custom = "not_blank")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom = "not_blank")]
    pub location: String,
    pub starts_on: NaiveDate,
    #[validate(length(min = 1))]
    pub officer_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_on: Option<NaiveDate>,
}
