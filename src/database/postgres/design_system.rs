use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgConnection};

use super::PgStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{
    ColorScheme, DeleteOutcome, DesignSystem, DesignSystemConfig, DesignSystemCreate,
    DesignSystemUpdate,
};
use crate::database::store::DesignSystemStore;
use crate::types::PageRequest;

/// Serializes every operation that moves the active flag
const ACTIVATION_LOCK_KEY: i64 = 0x6465_7369_676e;

const COLUMNS: &str = "id, name, config, is_active, created_at, updated_at";

#[derive(FromRow)]
struct DesignSystemRow {
    id: i64,
    name: String,
    config: Json<DesignSystemConfig>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<DesignSystemRow> for DesignSystem {
    fn from(row: DesignSystemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            config: row.config.0,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn name_conflict(name: &str) -> String {
    format!("Design system '{}' already exists", name)
}

async fn lock_activation(conn: &mut PgConnection) -> Result<(), DatabaseError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(ACTIVATION_LOCK_KEY)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl DesignSystemStore for PgStore {
    async fn list(&self, page: PageRequest) -> Result<Vec<DesignSystem>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM design_systems ORDER BY id LIMIT $1 OFFSET $2",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, DesignSystemRow>(&sql)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(DesignSystem::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<DesignSystem>, DatabaseError> {
        let sql = format!("SELECT {} FROM design_systems WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, DesignSystemRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(DesignSystem::from))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<DesignSystem>, DatabaseError> {
        let sql = format!("SELECT {} FROM design_systems WHERE name = $1", COLUMNS);
        let row = sqlx::query_as::<_, DesignSystemRow>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(DesignSystem::from))
    }

    async fn get_active(&self) -> Result<Option<DesignSystem>, DatabaseError> {
        let sql = format!("SELECT {} FROM design_systems WHERE is_active", COLUMNS);
        let row = sqlx::query_as::<_, DesignSystemRow>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(DesignSystem::from))
    }

    async fn create(&self, input: DesignSystemCreate) -> Result<DesignSystem, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        lock_activation(&mut tx).await?;

        let has_active: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM design_systems WHERE is_active)")
                .fetch_one(&mut *tx)
                .await?;

        let sql = format!(
            "INSERT INTO design_systems (name, config, is_active) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, DesignSystemRow>(&sql)
            .bind(&input.name)
            .bind(Json(&input.config))
            .bind(!has_active)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_unique(e, name_conflict(&input.name)))?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: i64,
        patch: DesignSystemUpdate,
    ) -> Result<Option<DesignSystem>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT {} FROM design_systems WHERE id = $1 FOR UPDATE",
            COLUMNS
        );
        let Some(row) = sqlx::query_as::<_, DesignSystemRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut design = DesignSystem::from(row);
        patch.apply(&mut design);

        let sql = format!(
            "UPDATE design_systems SET name = $2, config = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, DesignSystemRow>(&sql)
            .bind(id)
            .bind(&design.name)
            .bind(Json(&design.config))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_unique(e, name_conflict(&design.name)))?;

        tx.commit().await?;
        Ok(Some(row.into()))
    }

    async fn set_active(&self, id: i64) -> Result<Option<DesignSystem>, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        lock_activation(&mut tx).await?;

        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM design_systems WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        sqlx::query(
            "UPDATE design_systems SET is_active = FALSE, updated_at = NOW() \
             WHERE is_active AND id <> $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let sql = format!(
            "UPDATE design_systems SET is_active = TRUE, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, DesignSystemRow>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row.into()))
    }

    async fn delete(&self, id: i64) -> Result<DeleteOutcome, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        lock_activation(&mut tx).await?;

        let is_active: Option<bool> =
            sqlx::query_scalar("SELECT is_active FROM design_systems WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let outcome = match is_active {
            None => DeleteOutcome::NotFound,
            Some(true) => DeleteOutcome::Active,
            Some(false) => {
                sqlx::query("DELETE FROM design_systems WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                DeleteOutcome::Deleted
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn update_active_colors(
        &self,
        colors: ColorScheme,
    ) -> Result<Option<ColorScheme>, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        lock_activation(&mut tx).await?;

        let sql = format!(
            "SELECT {} FROM design_systems WHERE is_active FOR UPDATE",
            COLUMNS
        );
        let Some(row) = sqlx::query_as::<_, DesignSystemRow>(&sql)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut config = row.config.0;
        DesignSystemUpdate::colors(colors).apply_config(&mut config);

        sqlx::query("UPDATE design_systems SET config = $2, updated_at = NOW() WHERE id = $1")
            .bind(row.id)
            .bind(Json(&config))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(config.colors))
    }
}
