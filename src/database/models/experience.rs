use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{FieldErrors, Validate};

/// A work experience entry. `projects` holds project ids as plain strings;
/// they are not checked against the projects table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Experience {
    pub id: String,
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub projects: Vec<String>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceCreate {
    pub id: String,
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub projects: Vec<String>,
    pub color: String,
}

impl From<ExperienceCreate> for Experience {
    fn from(input: ExperienceCreate) -> Self {
        Self {
            id: input.id,
            role: input.role,
            company: input.company,
            period: input.period,
            description: input.description,
            achievements: input.achievements,
            projects: input.projects,
            color: input.color,
        }
    }
}

impl Validate for ExperienceCreate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("id", &self.id);
        errors.require("role", &self.role);
        errors.require("company", &self.company);
        errors.require("period", &self.period);
        errors.require("description", &self.description);
        errors.require("color", &self.color);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceUpdate {
    pub role: Option<String>,
    pub company: Option<String>,
    pub period: Option<String>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub projects: Option<Vec<String>>,
    pub color: Option<String>,
}

impl ExperienceUpdate {
    pub fn apply(self, target: &mut Experience) {
        if let Some(role) = self.role {
            target.role = role;
        }
        if let Some(company) = self.company {
            target.company = company;
        }
        if let Some(period) = self.period {
            target.period = period;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(achievements) = self.achievements {
            target.achievements = achievements;
        }
        if let Some(projects) = self.projects {
            target.projects = projects;
        }
        if let Some(color) = self.color {
            target.color = color;
        }
    }
}

impl Validate for ExperienceUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_if_present("role", self.role.as_deref());
        errors.require_if_present("company", self.company.as_deref());
        errors.require_if_present("period", self.period.as_deref());
        errors.require_if_present("description", self.description.as_deref());
        errors.require_if_present("color", self.color.as_deref());
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_touches_only_supplied_fields() {
        let mut experience = Experience {
            id: "acme".to_string(),
            role: "Engineer".to_string(),
            company: "Acme".to_string(),
            period: "2020 - 2022".to_string(),
            description: "Built things".to_string(),
            achievements: vec!["Shipped".to_string()],
            projects: vec!["rocket".to_string()],
            color: "#123456".to_string(),
        };
        let update: ExperienceUpdate =
            serde_json::from_value(json!({ "period": "2020 - 2023", "projects": [] })).unwrap();
        update.apply(&mut experience);

        assert_eq!(experience.period, "2020 - 2023");
        assert!(experience.projects.is_empty());
        assert_eq!(experience.role, "Engineer");
        assert_eq!(experience.achievements, vec!["Shipped".to_string()]);
    }

    #[test]
    fn create_requires_every_text_field() {
        let create: ExperienceCreate = serde_json::from_value(json!({
            "id": "",
            "role": "Engineer",
            "company": " ",
            "period": "",
            "description": "",
            "achievements": [],
            "projects": [],
            "color": ""
        }))
        .unwrap();
        let errors = create.validate().unwrap_err().into_inner();
        assert!(errors.contains_key("id"));
        assert!(errors.contains_key("company"));
        assert!(errors.contains_key("period"));
        assert!(errors.contains_key("description"));
        assert!(errors.contains_key("color"));
        assert!(!errors.contains_key("role"));
    }

    #[test]
    fn update_rejects_blank_supplied_fields() {
        let update: ExperienceUpdate =
            serde_json::from_value(json!({ "period": "  ", "role": "Lead" })).unwrap();
        let errors = update.validate().unwrap_err().into_inner();
        assert!(errors.contains_key("period"));
        assert!(!errors.contains_key("role"));

        let ok: ExperienceUpdate = serde_json::from_value(json!({ "color": "#000000" })).unwrap();
        assert!(ok.validate().is_ok());
    }
}
