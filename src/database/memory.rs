use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::dynamic_data::unique_tag_names;
use super::models::{
    ColorScheme, DeleteOutcome, DesignSystem, DesignSystemCreate, DesignSystemUpdate, DynamicData,
    DynamicDataCreate, DynamicDataUpdate, Experience, ExperienceCreate, ExperienceUpdate, Profile,
    ProfileCreate, ProfileUpdate, Project, ProjectCreate, ProjectUpdate, Tag, PROFILE_ID,
};
use super::store::{
    DesignSystemStore, DynamicDataStore, ExperienceStore, ProfileStore, ProjectStore, StoreHealth,
};
use crate::types::{Page, PageRequest};

/// In-process store for local development and tests.
///
/// All state lives behind one lock so multi-record operations (activation,
/// tag replacement) are atomic the same way a transaction would be.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    designs: BTreeMap<i64, DesignSystem>,
    next_design_id: i64,
    projects: BTreeMap<String, Project>,
    experiences: BTreeMap<String, Experience>,
    data: BTreeMap<i64, DataRow>,
    next_data_id: i64,
    tags: BTreeMap<i64, String>,
    tag_ids: HashMap<String, i64>,
    next_tag_id: i64,
    profile: Option<Profile>,
}

struct DataRow {
    id: i64,
    title: String,
    description: Option<String>,
    content: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    tag_ids: Vec<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryState {
    fn design_name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.designs
            .values()
            .any(|d| d.name == name && Some(d.id) != except)
    }

    fn tag_id(&mut self, name: &str) -> i64 {
        if let Some(id) = self.tag_ids.get(name) {
            return *id;
        }
        self.next_tag_id += 1;
        let id = self.next_tag_id;
        self.tags.insert(id, name.to_string());
        self.tag_ids.insert(name.to_string(), id);
        id
    }

    fn resolve_tags(&mut self, names: &[String]) -> Vec<i64> {
        unique_tag_names(names)
            .into_iter()
            .map(|name| self.tag_id(name))
            .collect()
    }

    fn render(&self, row: &DataRow) -> DynamicData {
        let tags = row
            .tag_ids
            .iter()
            .filter_map(|id| {
                self.tags.get(id).map(|name| Tag {
                    id: *id,
                    name: name.clone(),
                })
            })
            .collect();

        DynamicData {
            id: row.id,
            title: row.title.clone(),
            description: row.description.clone(),
            content: row.content.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            tags,
        }
    }

    fn page_of<'a>(
        &self,
        rows: impl Iterator<Item = &'a DataRow>,
        page: PageRequest,
    ) -> Page<DynamicData> {
        let matched: Vec<&DataRow> = rows.collect();
        let (skip, limit) = page.bounds();
        let data = matched
            .iter()
            .skip(skip)
            .take(limit)
            .map(|row| self.render(row))
            .collect();
        Page::new(data, matched.len() as i64, page)
    }
}

fn window<T: Clone>(items: impl Iterator<Item = T>, page: PageRequest) -> Vec<T> {
    let (skip, limit) = page.bounds();
    items.skip(skip).take(limit).collect()
}

#[async_trait]
impl DesignSystemStore for MemoryStore {
    async fn list(&self, page: PageRequest) -> Result<Vec<DesignSystem>, DatabaseError> {
        let state = self.state.read().await;
        Ok(window(state.designs.values().cloned(), page))
    }

    async fn get(&self, id: i64) -> Result<Option<DesignSystem>, DatabaseError> {
        Ok(self.state.read().await.designs.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<DesignSystem>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.designs.values().find(|d| d.name == name).cloned())
    }

    async fn get_active(&self) -> Result<Option<DesignSystem>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.designs.values().find(|d| d.is_active).cloned())
    }

    async fn create(&self, input: DesignSystemCreate) -> Result<DesignSystem, DatabaseError> {
        let mut state = self.state.write().await;
        if state.design_name_taken(&input.name, None) {
            return Err(DatabaseError::Conflict(format!(
                "Design system '{}' already exists",
                input.name
            )));
        }

        let is_active = !state.designs.values().any(|d| d.is_active);
        state.next_design_id += 1;
        let design = DesignSystem {
            id: state.next_design_id,
            name: input.name,
            config: input.config,
            is_active,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.designs.insert(design.id, design.clone());
        Ok(design)
    }

    async fn update(
        &self,
        id: i64,
        patch: DesignSystemUpdate,
    ) -> Result<Option<DesignSystem>, DatabaseError> {
        let mut state = self.state.write().await;
        if !state.designs.contains_key(&id) {
            return Ok(None);
        }
        if let Some(name) = patch.name.as_deref() {
            if state.design_name_taken(name, Some(id)) {
                return Err(DatabaseError::Conflict(format!(
                    "Design system '{}' already exists",
                    name
                )));
            }
        }

        let Some(design) = state.designs.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(design);
        design.updated_at = Some(Utc::now());
        Ok(Some(design.clone()))
    }

    async fn set_active(&self, id: i64) -> Result<Option<DesignSystem>, DatabaseError> {
        let mut state = self.state.write().await;
        if !state.designs.contains_key(&id) {
            return Ok(None);
        }

        let now = Utc::now();
        for design in state.designs.values_mut() {
            let activate = design.id == id;
            if design.is_active != activate {
                design.is_active = activate;
                design.updated_at = Some(now);
            }
        }
        Ok(state.designs.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<DeleteOutcome, DatabaseError> {
        let mut state = self.state.write().await;
        match state.designs.get(&id) {
            None => Ok(DeleteOutcome::NotFound),
            Some(d) if d.is_active => Ok(DeleteOutcome::Active),
            Some(_) => {
                state.designs.remove(&id);
                Ok(DeleteOutcome::Deleted)
            }
        }
    }

    async fn update_active_colors(
        &self,
        colors: ColorScheme,
    ) -> Result<Option<ColorScheme>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(design) = state.designs.values_mut().find(|d| d.is_active) else {
            return Ok(None);
        };
        design.config.colors = colors;
        design.updated_at = Some(Utc::now());
        Ok(Some(design.config.colors.clone()))
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list(&self, page: PageRequest) -> Result<Vec<Project>, DatabaseError> {
        let state = self.state.read().await;
        Ok(window(state.projects.values().cloned(), page))
    }

    async fn get(&self, id: &str) -> Result<Option<Project>, DatabaseError> {
        Ok(self.state.read().await.projects.get(id).cloned())
    }

    async fn create(&self, input: ProjectCreate) -> Result<Project, DatabaseError> {
        let mut state = self.state.write().await;
        if state.projects.contains_key(&input.id) {
            return Err(DatabaseError::Conflict(format!(
                "Project with id '{}' already exists",
                input.id
            )));
        }
        let project = Project::from(input);
        state.projects.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn update(&self, id: &str, patch: ProjectUpdate) -> Result<Option<Project>, DatabaseError> {
        let mut state = self.state.write().await;
        Ok(state.projects.get_mut(id).map(|project| {
            patch.apply(project);
            project.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.state.write().await.projects.remove(id).is_some())
    }
}

#[async_trait]
impl ExperienceStore for MemoryStore {
    async fn list(&self, page: PageRequest) -> Result<Vec<Experience>, DatabaseError> {
        let state = self.state.read().await;
        Ok(window(state.experiences.values().cloned(), page))
    }

    async fn get(&self, id: &str) -> Result<Option<Experience>, DatabaseError> {
        Ok(self.state.read().await.experiences.get(id).cloned())
    }

    async fn create(&self, input: ExperienceCreate) -> Result<Experience, DatabaseError> {
        let mut state = self.state.write().await;
        if state.experiences.contains_key(&input.id) {
            return Err(DatabaseError::Conflict(format!(
                "Experience with id '{}' already exists",
                input.id
            )));
        }
        let experience = Experience::from(input);
        state
            .experiences
            .insert(experience.id.clone(), experience.clone());
        Ok(experience)
    }

    async fn update(
        &self,
        id: &str,
        patch: ExperienceUpdate,
    ) -> Result<Option<Experience>, DatabaseError> {
        let mut state = self.state.write().await;
        Ok(state.experiences.get_mut(id).map(|experience| {
            patch.apply(experience);
            experience.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.state.write().await.experiences.remove(id).is_some())
    }
}

#[async_trait]
impl DynamicDataStore for MemoryStore {
    async fn list(
        &self,
        page: PageRequest,
        tag: Option<&str>,
    ) -> Result<Page<DynamicData>, DatabaseError> {
        let state = self.state.read().await;
        let tag_id = match tag {
            Some(name) => match state.tag_ids.get(name) {
                Some(id) => Some(*id),
                None => return Ok(Page::new(Vec::new(), 0, page)),
            },
            None => None,
        };

        let rows = state
            .data
            .values()
            .filter(|row| tag_id.map_or(true, |id| row.tag_ids.contains(&id)));
        Ok(state.page_of(rows, page))
    }

    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<DynamicData>, DatabaseError> {
        let state = self.state.read().await;
        let needle = query.to_lowercase();
        let rows = state.data.values().filter(|row| {
            row.title.to_lowercase().contains(&needle)
                || row
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        });
        Ok(state.page_of(rows, page))
    }

    async fn get(&self, id: i64) -> Result<Option<DynamicData>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.data.get(&id).map(|row| state.render(row)))
    }

    async fn create(&self, input: DynamicDataCreate) -> Result<DynamicData, DatabaseError> {
        let mut state = self.state.write().await;
        let tag_ids = state.resolve_tags(&input.tags);
        state.next_data_id += 1;
        let row = DataRow {
            id: state.next_data_id,
            title: input.title,
            description: input.description,
            content: input.content,
            created_at: Utc::now(),
            updated_at: None,
            tag_ids,
        };
        let item = state.render(&row);
        state.data.insert(row.id, row);
        Ok(item)
    }

    async fn update(
        &self,
        id: i64,
        mut patch: DynamicDataUpdate,
    ) -> Result<Option<DynamicData>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(mut item) = state.data.get(&id).map(|row| state.render(row)) else {
            return Ok(None);
        };
        patch.apply_fields(&mut item);
        let tag_ids = patch.tags.take().map(|names| state.resolve_tags(&names));

        let Some(row) = state.data.get_mut(&id) else {
            return Ok(None);
        };
        row.title = item.title;
        row.description = item.description;
        row.content = item.content;
        row.updated_at = Some(Utc::now());
        if let Some(tag_ids) = tag_ids {
            row.tag_ids = tag_ids;
        }

        let Some(row) = state.data.get(&id) else {
            return Ok(None);
        };
        Ok(Some(state.render(row)))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.state.write().await.data.remove(&id).is_some())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get(&self) -> Result<Option<Profile>, DatabaseError> {
        Ok(self.state.read().await.profile.clone())
    }

    async fn create(&self, input: ProfileCreate) -> Result<Profile, DatabaseError> {
        let mut state = self.state.write().await;
        if state.profile.is_some() {
            return Err(DatabaseError::Conflict("Profile already exists".to_string()));
        }
        let profile = Profile {
            id: PROFILE_ID.to_string(),
            name: input.name,
            description: input.description,
            email: input.email,
            linkedin_url: input.linkedin_url,
            github_url: input.github_url,
            professional_background: input.professional_background,
            journey: input.journey,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.profile = Some(profile.clone());
        Ok(profile)
    }

    async fn update(&self, patch: ProfileUpdate) -> Result<Option<Profile>, DatabaseError> {
        let mut state = self.state.write().await;
        Ok(state.profile.as_mut().map(|profile| {
            patch.apply(profile);
            profile.updated_at = Some(Utc::now());
            profile.clone()
        }))
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::DesignSystemConfig;

    fn design(name: &str) -> DesignSystemCreate {
        DesignSystemCreate {
            name: name.to_string(),
            config: DesignSystemConfig::default(),
        }
    }

    fn data(title: &str, tags: &[&str]) -> DynamicDataCreate {
        DynamicDataCreate {
            title: title.to_string(),
            description: None,
            content: Map::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn first_design_becomes_active_and_later_ones_do_not() {
        let store = MemoryStore::new();
        let first = DesignSystemStore::create(&store, design("One")).await.unwrap();
        let second = DesignSystemStore::create(&store, design("Two")).await.unwrap();

        assert!(first.is_active);
        assert!(!second.is_active);
        let active = store.get_active().await.unwrap().unwrap();
        assert_eq!(active.id, first.id);
    }

    #[tokio::test]
    async fn activation_moves_the_flag() {
        let store = MemoryStore::new();
        let first = DesignSystemStore::create(&store, design("One")).await.unwrap();
        let second = DesignSystemStore::create(&store, design("Two")).await.unwrap();

        store.set_active(second.id).await.unwrap().unwrap();
        let all = DesignSystemStore::list(&store, PageRequest::default()).await.unwrap();
        let active: Vec<_> = all.iter().filter(|d| d.is_active).map(|d| d.id).collect();
        assert_eq!(active, vec![second.id]);

        assert!(store.set_active(999).await.unwrap().is_none());
        assert_eq!(store.get_active().await.unwrap().unwrap().id, second.id);
        assert_eq!(
            DesignSystemStore::delete(&store, first.id).await.unwrap(),
            DeleteOutcome::Deleted
        );
    }

    #[tokio::test]
    async fn active_design_cannot_be_deleted() {
        let store = MemoryStore::new();
        let only = DesignSystemStore::create(&store, design("Only")).await.unwrap();
        assert_eq!(
            DesignSystemStore::delete(&store, only.id).await.unwrap(),
            DeleteOutcome::Active
        );
        assert_eq!(
            DesignSystemStore::delete(&store, 42).await.unwrap(),
            DeleteOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn duplicate_design_name_conflicts() {
        let store = MemoryStore::new();
        DesignSystemStore::create(&store, design("Same")).await.unwrap();
        let err = DesignSystemStore::create(&store, design("Same")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn tags_are_shared_and_filter_lists() {
        let store = MemoryStore::new();
        let a = DynamicDataStore::create(&store, data("A", &["rust", "web"])).await.unwrap();
        let b = DynamicDataStore::create(&store, data("B", &["rust"])).await.unwrap();
        DynamicDataStore::create(&store, data("C", &[])).await.unwrap();

        let rust_a = a.tags.iter().find(|t| t.name == "rust").unwrap();
        let rust_b = b.tags.iter().find(|t| t.name == "rust").unwrap();
        assert_eq!(rust_a.id, rust_b.id);

        let page = DynamicDataStore::list(&store, PageRequest::default(), Some("rust"))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(page.data.iter().all(|d| d.has_tag("rust")));

        let none = DynamicDataStore::list(&store, PageRequest::default(), Some("missing"))
            .await
            .unwrap();
        assert_eq!(none.total, 0);
        assert!(none.data.is_empty());
    }

    #[tokio::test]
    async fn supplying_tags_replaces_the_set() {
        let store = MemoryStore::new();
        let item = DynamicDataStore::create(&store, data("A", &["one", "two"])).await.unwrap();

        let keep = DynamicDataUpdate {
            title: Some("A2".to_string()),
            ..Default::default()
        };
        let kept = DynamicDataStore::update(&store, item.id, keep).await.unwrap().unwrap();
        assert_eq!(kept.tag_names(), vec!["one", "two"]);
        assert!(kept.updated_at.is_some());

        let replace = DynamicDataUpdate {
            tags: Some(vec!["three".to_string()]),
            ..Default::default()
        };
        let replaced = DynamicDataStore::update(&store, item.id, replace).await.unwrap().unwrap();
        assert_eq!(replaced.tag_names(), vec!["three"]);
        assert_eq!(replaced.title, "A2");
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_title_and_description() {
        let store = MemoryStore::new();
        let mut with_desc = data("Notes", &[]);
        with_desc.description = Some("About RUST macros".to_string());
        DynamicDataStore::create(&store, with_desc).await.unwrap();
        DynamicDataStore::create(&store, data("rustacean", &[])).await.unwrap();
        DynamicDataStore::create(&store, data("Other", &[])).await.unwrap();

        let page = store.search("Rust", PageRequest::new(0, 1)).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn profile_is_a_singleton() {
        let store = MemoryStore::new();
        assert!(ProfileStore::update(&store, ProfileUpdate::default())
            .await
            .unwrap()
            .is_none());

        let input = ProfileCreate {
            name: "Jane".to_string(),
            description: "Engineer".to_string(),
            email: "jane@example.com".to_string(),
            linkedin_url: None,
            github_url: None,
            professional_background: None,
            journey: None,
        };
        let created = ProfileStore::create(&store, input.clone()).await.unwrap();
        assert_eq!(created.id, PROFILE_ID);
        assert!(matches!(
            ProfileStore::create(&store, input).await,
            Err(DatabaseError::Conflict(_))
        ));
    }
}
