use async_trait::async_trait;

use super::PgStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{Project, ProjectCreate, ProjectUpdate};
use crate::database::store::ProjectStore;
use crate::types::PageRequest;

const COLUMNS: &str =
    "id, title, description, image, technologies, link, github, app_store, play_store, achievements";

#[async_trait]
impl ProjectStore for PgStore {
    async fn list(&self, page: PageRequest) -> Result<Vec<Project>, DatabaseError> {
        let sql = format!("SELECT {} FROM projects ORDER BY id LIMIT $1 OFFSET $2", COLUMNS);
        let projects = sqlx::query_as::<_, Project>(&sql)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn get(&self, id: &str) -> Result<Option<Project>, DatabaseError> {
        let sql = format!("SELECT {} FROM projects WHERE id = $1", COLUMNS);
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn create(&self, input: ProjectCreate) -> Result<Project, DatabaseError> {
        let sql = format!(
            "INSERT INTO projects ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (id) DO NOTHING RETURNING {cols}",
            cols = COLUMNS
        );
        let project = Project::from(input);
        let inserted = sqlx::query_as::<_, Project>(&sql)
            .bind(&project.id)
            .bind(&project.title)
            .bind(&project.description)
            .bind(&project.image)
            .bind(&project.technologies)
            .bind(&project.link)
            .bind(&project.github)
            .bind(&project.app_store)
            .bind(&project.play_store)
            .bind(&project.achievements)
            .fetch_optional(&self.pool)
            .await?;

        inserted.ok_or_else(|| {
            DatabaseError::Conflict(format!("Project with id '{}' already exists", project.id))
        })
    }

    async fn update(&self, id: &str, patch: ProjectUpdate) -> Result<Option<Project>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {} FROM projects WHERE id = $1 FOR UPDATE", COLUMNS);
        let Some(mut project) = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        patch.apply(&mut project);

        let sql = format!(
            "UPDATE projects SET title = $2, description = $3, image = $4, technologies = $5, \
             link = $6, github = $7, app_store = $8, play_store = $9, achievements = $10 \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let updated = sqlx::query_as::<_, Project>(&sql)
            .bind(&project.id)
            .bind(&project.title)
            .bind(&project.description)
            .bind(&project.image)
            .bind(&project.technologies)
            .bind(&project.link)
            .bind(&project.github)
            .bind(&project.app_store)
            .bind(&project.play_store)
            .bind(&project.achievements)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
