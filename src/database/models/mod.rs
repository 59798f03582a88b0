pub mod design_system;
pub mod dynamic_data;
pub mod experience;
pub mod profile;
pub mod project;

pub use design_system::{
    BorderRadius, ColorScheme, DarkModeColors, DeleteOutcome, DesignSystem, DesignSystemConfig,
    DesignSystemCreate, DesignSystemUpdate, Spacing, Typography,
};
pub use dynamic_data::{DynamicData, DynamicDataCreate, DynamicDataUpdate, Tag};
pub use experience::{Experience, ExperienceCreate, ExperienceUpdate};
pub use profile::{Profile, ProfileCreate, ProfileUpdate, PROFILE_ID};
pub use project::{Project, ProjectCreate, ProjectUpdate};

use serde::{Deserialize, Deserializer};

/// Distinguishes an explicit `null` from an absent key on nullable fields.
///
/// Used with `#[serde(default, deserialize_with = "nullable")]`: absent keys
/// stay `None`, `null` becomes `Some(None)`, a value becomes `Some(Some(v))`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
