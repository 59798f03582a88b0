use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::nullable;
use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicData {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tags: Vec<Tag>,
}

impl DynamicData {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicDataCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: Map<String, Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Validate for DynamicDataCreate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title);
        validate_tag_names(&mut errors, &self.tags);
        errors.into_result()
    }
}

/// Partial update. When `tags` is supplied it replaces the whole tag set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DynamicDataUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub content: Option<Map<String, Value>>,
    pub tags: Option<Vec<String>>,
}

impl DynamicDataUpdate {
    /// Applies the scalar fields; tag replacement is left to the store
    pub fn apply_fields(&mut self, target: &mut DynamicData) {
        if let Some(title) = self.title.take() {
            target.title = title;
        }
        if let Some(description) = self.description.take() {
            target.description = description;
        }
        if let Some(content) = self.content.take() {
            target.content = content;
        }
    }
}

impl Validate for DynamicDataUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_if_present("title", self.title.as_deref());
        if let Some(tags) = &self.tags {
            validate_tag_names(&mut errors, tags);
        }
        errors.into_result()
    }
}

fn validate_tag_names(errors: &mut FieldErrors, tags: &[String]) {
    if tags.iter().any(|t| t.trim().is_empty()) {
        errors.add("tags", "Tag names must not be empty");
    }
}

/// Tag names in first-seen order with repeats removed
pub fn unique_tag_names(tags: &[String]) -> Vec<&str> {
    let mut seen = Vec::with_capacity(tags.len());
    for name in tags {
        if !seen.contains(&name.as_str()) {
            seen.push(name.as_str());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicate_tags_collapse_in_order() {
        let tags = vec!["b".to_string(), "a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(unique_tag_names(&tags), vec!["b", "a", "c"]);
    }

    #[test]
    fn content_must_be_an_object() {
        let payload = json!({ "title": "x", "content": [1, 2, 3] });
        assert!(serde_json::from_value::<DynamicDataCreate>(payload).is_err());

        let payload = json!({ "title": "x", "content": { "k": "v" } });
        let create: DynamicDataCreate = serde_json::from_value(payload).unwrap();
        assert!(create.tags.is_empty());
        assert!(create.description.is_none());
    }

    #[test]
    fn empty_tag_name_fails_validation() {
        let update = DynamicDataUpdate {
            tags: Some(vec!["ok".to_string(), "".to_string()]),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err().into_inner();
        assert!(errors.contains_key("tags"));
    }

    #[test]
    fn apply_fields_keeps_description_unless_supplied() {
        let mut item = DynamicData {
            id: 1,
            title: "Original".to_string(),
            description: Some("Original description".to_string()),
            content: Map::new(),
            created_at: Utc::now(),
            updated_at: None,
            tags: vec![],
        };
        let mut update: DynamicDataUpdate =
            serde_json::from_value(json!({ "title": "Updated" })).unwrap();
        update.apply_fields(&mut item);
        assert_eq!(item.title, "Updated");
        assert_eq!(item.description.as_deref(), Some("Original description"));

        let mut clear: DynamicDataUpdate =
            serde_json::from_value(json!({ "description": null })).unwrap();
        clear.apply_fields(&mut item);
        assert_eq!(item.description, None);
    }
}
