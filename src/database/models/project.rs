use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::nullable;
use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub link: String,
    pub github: Option<String>,
    #[serde(rename = "appStore")]
    pub app_store: Option<String>,
    #[serde(rename = "playStore")]
    pub play_store: Option<String>,
    pub achievements: Vec<String>,
}

/// Create payload; the id is chosen by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub link: String,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default, rename = "appStore")]
    pub app_store: Option<String>,
    #[serde(default, rename = "playStore")]
    pub play_store: Option<String>,
    pub achievements: Vec<String>,
}

impl From<ProjectCreate> for Project {
    fn from(input: ProjectCreate) -> Self {
        Self {
            id: input.id,
            title: input.title,
            description: input.description,
            image: input.image,
            technologies: input.technologies,
            link: input.link,
            github: input.github,
            app_store: input.app_store,
            play_store: input.play_store,
            achievements: input.achievements,
        }
    }
}

impl Validate for ProjectCreate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("id", &self.id);
        errors.require("title", &self.title);
        errors.require("description", &self.description);
        errors.require("image", &self.image);
        errors.require("link", &self.link);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub link: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub github: Option<Option<String>>,
    #[serde(default, rename = "appStore", deserialize_with = "nullable")]
    pub app_store: Option<Option<String>>,
    #[serde(default, rename = "playStore", deserialize_with = "nullable")]
    pub play_store: Option<Option<String>>,
    pub achievements: Option<Vec<String>>,
}

impl ProjectUpdate {
    pub fn apply(self, target: &mut Project) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(image) = self.image {
            target.image = image;
        }
        if let Some(technologies) = self.technologies {
            target.technologies = technologies;
        }
        if let Some(link) = self.link {
            target.link = link;
        }
        if let Some(github) = self.github {
            target.github = github;
        }
        if let Some(app_store) = self.app_store {
            target.app_store = app_store;
        }
        if let Some(play_store) = self.play_store {
            target.play_store = play_store;
        }
        if let Some(achievements) = self.achievements {
            target.achievements = achievements;
        }
    }
}

impl Validate for ProjectUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_if_present("title", self.title.as_deref());
        errors.require_if_present("description", self.description.as_deref());
        errors.require_if_present("image", self.image.as_deref());
        errors.require_if_present("link", self.link.as_deref());
        errors.into_result()
    }
}
