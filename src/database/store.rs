use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::manager::DatabaseError;
use super::memory::MemoryStore;
use super::models::{
    ColorScheme, DeleteOutcome, DesignSystem, DesignSystemCreate, DesignSystemUpdate, DynamicData,
    DynamicDataCreate, DynamicDataUpdate, Experience, ExperienceCreate, ExperienceUpdate, Profile,
    ProfileCreate, ProfileUpdate, Project, ProjectCreate, ProjectUpdate,
};
use super::postgres::PgStore;
use crate::types::{Page, PageRequest};

/// Design systems and the single-active invariant
#[async_trait]
pub trait DesignSystemStore: Send + Sync + 'static {
    async fn list(&self, page: PageRequest) -> Result<Vec<DesignSystem>, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Option<DesignSystem>, DatabaseError>;

    async fn get_by_name(&self, name: &str) -> Result<Option<DesignSystem>, DatabaseError>;

    async fn get_active(&self) -> Result<Option<DesignSystem>, DatabaseError>;

    /// Fails with `Conflict` when the name is taken. The new record becomes
    /// active only if no other record is active.
    async fn create(&self, input: DesignSystemCreate) -> Result<DesignSystem, DatabaseError>;

    async fn update(
        &self,
        id: i64,
        patch: DesignSystemUpdate,
    ) -> Result<Option<DesignSystem>, DatabaseError>;

    /// Deactivate every record and activate `id`, atomically.
    /// Returns `None` without changing anything when `id` does not exist.
    async fn set_active(&self, id: i64) -> Result<Option<DesignSystem>, DatabaseError>;

    async fn delete(&self, id: i64) -> Result<DeleteOutcome, DatabaseError>;

    /// Replace the `colors` section of the active record.
    /// `None` when no record is active.
    async fn update_active_colors(
        &self,
        colors: ColorScheme,
    ) -> Result<Option<ColorScheme>, DatabaseError>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync + 'static {
    async fn list(&self, page: PageRequest) -> Result<Vec<Project>, DatabaseError>;

    async fn get(&self, id: &str) -> Result<Option<Project>, DatabaseError>;

    /// Fails with `Conflict` when the caller-supplied id already exists
    async fn create(&self, input: ProjectCreate) -> Result<Project, DatabaseError>;

    async fn update(&self, id: &str, patch: ProjectUpdate) -> Result<Option<Project>, DatabaseError>;

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait ExperienceStore: Send + Sync + 'static {
    async fn list(&self, page: PageRequest) -> Result<Vec<Experience>, DatabaseError>;

    async fn get(&self, id: &str) -> Result<Option<Experience>, DatabaseError>;

    /// Fails with `Conflict` when the caller-supplied id already exists
    async fn create(&self, input: ExperienceCreate) -> Result<Experience, DatabaseError>;

    async fn update(
        &self,
        id: &str,
        patch: ExperienceUpdate,
    ) -> Result<Option<Experience>, DatabaseError>;

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError>;
}

/// Tagged free-form content
#[async_trait]
pub trait DynamicDataStore: Send + Sync + 'static {
    async fn list(
        &self,
        page: PageRequest,
        tag: Option<&str>,
    ) -> Result<Page<DynamicData>, DatabaseError>;

    /// Case-insensitive substring match on title or description
    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<DynamicData>, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Option<DynamicData>, DatabaseError>;

    async fn create(&self, input: DynamicDataCreate) -> Result<DynamicData, DatabaseError>;

    async fn update(
        &self,
        id: i64,
        patch: DynamicDataUpdate,
    ) -> Result<Option<DynamicData>, DatabaseError>;

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    async fn get(&self) -> Result<Option<Profile>, DatabaseError>;

    async fn create(&self, input: ProfileCreate) -> Result<Profile, DatabaseError>;

    async fn update(&self, patch: ProfileUpdate) -> Result<Option<Profile>, DatabaseError>;
}

#[async_trait]
pub trait StoreHealth: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// One handle per resource, all backed by the same store
#[derive(Clone)]
pub struct Stores {
    pub design: Arc<dyn DesignSystemStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub experiences: Arc<dyn ExperienceStore>,
    pub data: Arc<dyn DynamicDataStore>,
    pub profile: Arc<dyn ProfileStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_backend(Arc::new(PgStore::new(pool)))
    }

    pub fn memory() -> Self {
        Self::from_backend(Arc::new(MemoryStore::new()))
    }

    fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: DesignSystemStore
            + ProjectStore
            + ExperienceStore
            + DynamicDataStore
            + ProfileStore
            + StoreHealth,
    {
        Self {
            design: backend.clone(),
            projects: backend.clone(),
            experiences: backend.clone(),
            data: backend.clone(),
            profile: backend.clone(),
            health: backend,
        }
    }
}
