use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::validation::not_blank;

/// A notice posted by an extension officer for all portal users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnnouncementCreate {
    #[validate(custom = "not_blank")]
    pub title: String,
    #[validate(custom = "not_blank")]
    pub body: String,
    #[validate(length(min = 1))]
    pub author_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}
