use async_trait::async_trait;

use super::PgStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{Profile, ProfileCreate, ProfileUpdate, PROFILE_ID};
use crate::database::store::ProfileStore;

const COLUMNS: &str = "id, name, description, email, linkedin_url, github_url, \
                       professional_background, journey, created_at, updated_at";

#[async_trait]
impl ProfileStore for PgStore {
    async fn get(&self) -> Result<Option<Profile>, DatabaseError> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", COLUMNS);
        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(PROFILE_ID)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn create(&self, input: ProfileCreate) -> Result<Profile, DatabaseError> {
        let sql = format!(
            "INSERT INTO profiles (id, name, description, email, linkedin_url, github_url, \
             professional_background, journey) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO NOTHING RETURNING {}",
            COLUMNS
        );
        let inserted = sqlx::query_as::<_, Profile>(&sql)
            .bind(PROFILE_ID)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.email)
            .bind(&input.linkedin_url)
            .bind(&input.github_url)
            .bind(&input.professional_background)
            .bind(&input.journey)
            .fetch_optional(&self.pool)
            .await?;

        inserted.ok_or_else(|| DatabaseError::Conflict("Profile already exists".to_string()))
    }

    async fn update(&self, patch: ProfileUpdate) -> Result<Option<Profile>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {} FROM profiles WHERE id = $1 FOR UPDATE", COLUMNS);
        let Some(mut profile) = sqlx::query_as::<_, Profile>(&sql)
            .bind(PROFILE_ID)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        patch.apply(&mut profile);

        let sql = format!(
            "UPDATE profiles SET name = $2, description = $3, email = $4, linkedin_url = $5, \
             github_url = $6, professional_background = $7, journey = $8, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let updated = sqlx::query_as::<_, Profile>(&sql)
            .bind(PROFILE_ID)
            .bind(&profile.name)
            .bind(&profile.description)
            .bind(&profile.email)
            .bind(&profile.linkedin_url)
            .bind(&profile.github_url)
            .bind(&profile.professional_background)
            .bind(&profile.journey)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}
