use async_trait::async_trait;

use super::PgStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{Experience, ExperienceCreate, ExperienceUpdate};
use crate::database::store::ExperienceStore;
use crate::types::PageRequest;

const COLUMNS: &str = "id, role, company, period, description, achievements, projects, color";

#[async_trait]
impl ExperienceStore for PgStore {
    async fn list(&self, page: PageRequest) -> Result<Vec<Experience>, DatabaseError> {
        let sql = format!("SELECT {} FROM experiences ORDER BY id LIMIT $1 OFFSET $2", COLUMNS);
        let experiences = sqlx::query_as::<_, Experience>(&sql)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(experiences)
    }

    async fn get(&self, id: &str) -> Result<Option<Experience>, DatabaseError> {
        let sql = format!("SELECT {} FROM experiences WHERE id = $1", COLUMNS);
        let experience = sqlx::query_as::<_, Experience>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(experience)
    }

    async fn create(&self, input: ExperienceCreate) -> Result<Experience, DatabaseError> {
        let sql = format!(
            "INSERT INTO experiences ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO NOTHING RETURNING {cols}",
            cols = COLUMNS
        );
        let experience = Experience::from(input);
        let inserted = sqlx::query_as::<_, Experience>(&sql)
            .bind(&experience.id)
            .bind(&experience.role)
            .bind(&experience.company)
            .bind(&experience.period)
            .bind(&experience.description)
            .bind(&experience.achievements)
            .bind(&experience.projects)
            .bind(&experience.color)
            .fetch_optional(&self.pool)
            .await?;

        inserted.ok_or_else(|| {
            DatabaseError::Conflict(format!(
                "Experience with id '{}' already exists",
                experience.id
            ))
        })
    }

    async fn update(
        &self,
        id: &str,
        patch: ExperienceUpdate,
    ) -> Result<Option<Experience>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {} FROM experiences WHERE id = $1 FOR UPDATE", COLUMNS);
        let Some(mut experience) = sqlx::query_as::<_, Experience>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        patch.apply(&mut experience);

        let sql = format!(
            "UPDATE experiences SET role = $2, company = $3, period = $4, description = $5, \
             achievements = $6, projects = $7, color = $8 WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let updated = sqlx::query_as::<_, Experience>(&sql)
            .bind(&experience.id)
            .bind(&experience.role)
            .bind(&experience.company)
            .bind(&experience.period)
            .bind(&experience.description)
            .bind(&experience.achievements)
            .bind(&experience.projects)
            .bind(&experience.color)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
