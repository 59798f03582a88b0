use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::nullable;
use crate::validation::{FieldErrors, Validate};

/// The site owner profile is a single row with a fixed key
pub const PROFILE_ID: &str = "main_profile";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub email: String,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub professional_background: Option<String>,
    pub journey: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCreate {
    pub name: String,
    pub description: String,
    pub email: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub professional_background: Option<String>,
    #[serde(default)]
    pub journey: Option<String>,
}

impl Validate for ProfileCreate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name);
        errors.email("email", &self.email);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub linkedin_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub github_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub professional_background: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub journey: Option<Option<String>>,
}

impl ProfileUpdate {
    pub fn apply(self, target: &mut Profile) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(email) = self.email {
            target.email = email;
        }
        if let Some(linkedin_url) = self.linkedin_url {
            target.linkedin_url = linkedin_url;
        }
        if let Some(github_url) = self.github_url {
            target.github_url = github_url;
        }
        if let Some(background) = self.professional_background {
            target.professional_background = background;
        }
        if let Some(journey) = self.journey {
            target.journey = journey;
        }
    }
}

impl Validate for ProfileUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_if_present("name", self.name.as_deref());
        if let Some(email) = &self.email {
            errors.email("email", email);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_validates_email_only_when_supplied() {
        let ok: ProfileUpdate = serde_json::from_value(json!({ "journey": "Started in 2015" })).unwrap();
        assert!(ok.validate().is_ok());

        let bad: ProfileUpdate = serde_json::from_value(json!({ "email": "not-an-email" })).unwrap();
        assert!(bad.validate().unwrap_err().into_inner().contains_key("email"));
    }
}
