use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    pub error: String,
    pub success: String,
    pub warning: String,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DarkModeColors {
    pub background: String,
    pub text: String,
    pub primary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub font_family: String,
    pub heading_font: String,
    pub base_size: String,
    pub scale_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub base_unit: String,
    pub scale_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderRadius {
    pub small: String,
    pub medium: String,
    pub large: String,
    pub round: String,
}

/// The token sections of a design system, persisted as one JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSystemConfig {
    pub colors: ColorScheme,
    pub dark_mode: DarkModeColors,
    pub typography: Typography,
    pub spacing: Spacing,
    pub border_radius: BorderRadius,
}

impl Default for DesignSystemConfig {
    fn default() -> Self {
        Self {
            colors: ColorScheme::default(),
            dark_mode: DarkModeColors {
                background: "#1A1F2C".to_string(),
                text: "#FFFFFF".to_string(),
                primary: "#9B87F5".to_string(),
            },
            typography: Typography {
                font_family: "Inter, sans-serif".to_string(),
                heading_font: "Inter, sans-serif".to_string(),
                base_size: "16px".to_string(),
                scale_ratio: 1.25,
            },
            spacing: Spacing {
                base_unit: "4px".to_string(),
                scale_ratio: 2.0,
            },
            border_radius: BorderRadius {
                small: "4px".to_string(),
                medium: "8px".to_string(),
                large: "16px".to_string(),
                round: "50%".to_string(),
            },
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: "#8B5CF6".to_string(),
            secondary: "#D946EF".to_string(),
            accent: "#F97316".to_string(),
            background: "#FFFFFF".to_string(),
            text: "#222222".to_string(),
            error: "#EA384C".to_string(),
            success: "#10B981".to_string(),
            warning: "#F59E0B".to_string(),
            info: "#0EA5E9".to_string(),
        }
    }
}

/// Color values are stored as given; only presence is enforced by the type
impl Validate for ColorScheme {
    fn validate(&self) -> Result<(), FieldErrors> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSystem {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub config: DesignSystemConfig,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSystemCreate {
    pub name: String,
    #[serde(flatten)]
    pub config: DesignSystemConfig,
}

impl Validate for DesignSystemCreate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name);
        errors.into_result()
    }
}

/// Partial update: `name` is a column, every other key replaces one config
/// section wholesale. Sections left out keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignSystemUpdate {
    pub name: Option<String>,
    pub colors: Option<ColorScheme>,
    pub dark_mode: Option<DarkModeColors>,
    pub typography: Option<Typography>,
    pub spacing: Option<Spacing>,
    pub border_radius: Option<BorderRadius>,
}

impl DesignSystemUpdate {
    pub fn colors(colors: ColorScheme) -> Self {
        Self {
            colors: Some(colors),
            ..Default::default()
        }
    }

    pub fn apply(mut self, target: &mut DesignSystem) {
        if let Some(name) = self.name.take() {
            target.name = name;
        }
        self.apply_config(&mut target.config);
    }

    pub fn apply_config(self, config: &mut DesignSystemConfig) {
        if let Some(colors) = self.colors {
            config.colors = colors;
        }
        if let Some(dark_mode) = self.dark_mode {
            config.dark_mode = dark_mode;
        }
        if let Some(typography) = self.typography {
            config.typography = typography;
        }
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }
        if let Some(border_radius) = self.border_radius {
            config.border_radius = border_radius;
        }
    }
}

impl Validate for DesignSystemUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_if_present("name", self.name.as_deref());
        errors.into_result()
    }
}

/// Result of a delete request against a design system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Active,
}
