use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::validation::not_blank;

/// A farmer's sign-up for a training program. At most one per (program, farmer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub program_id: String,
    pub farmer_id: String,
    pub farmer_name: String,
    pub contact: String,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn key(program_id: &str, farmer_id: &str) -> String {
        format!("{}:{}", program_id, farmer_id)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegistrationCreate {
    #[validate(length(min = 1))]
    pub program_id: String,
    #[validate(length(min = 1))]
    pub farmer_id: String,
    #[validate(custom = "not_blank")]
    pub farmer_name: String,
    #[serde(default)]
    pub contact: String,
}

/// Result of a sign-up attempt. A repeat sign-up is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Registered(Registration),
    AlreadyRegistered { registration_id: String },
}
