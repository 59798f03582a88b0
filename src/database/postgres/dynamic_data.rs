use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow, PgConnection};
use std::collections::HashMap;

use super::{escape_like, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::dynamic_data::unique_tag_names;
use crate::database::models::{DynamicData, DynamicDataCreate, DynamicDataUpdate, Tag};
use crate::database::store::DynamicDataStore;
use crate::types::{Page, PageRequest};

const COLUMNS: &str = "d.id, d.title, d.description, d.content, d.created_at, d.updated_at";

const TAG_FILTER: &str = "($1::TEXT IS NULL OR EXISTS (\
     SELECT 1 FROM data_tags dt JOIN tags t ON t.id = dt.tag_id \
     WHERE dt.data_id = d.id AND t.name = $1))";

const SEARCH_FILTER: &str =
    "(d.title ILIKE $1 ESCAPE '\\' OR d.description ILIKE $1 ESCAPE '\\')";

#[derive(FromRow)]
struct DataRow {
    id: i64,
    title: String,
    description: Option<String>,
    content: Json<Map<String, Value>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl DataRow {
    fn with_tags(self, tags: Vec<Tag>) -> DynamicData {
        DynamicData {
            id: self.id,
            title: self.title,
            description: self.description,
            content: self.content.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
            tags,
        }
    }
}

#[derive(FromRow)]
struct TagLink {
    data_id: i64,
    id: i64,
    name: String,
}

/// Tags for each of `ids`, in attachment order
async fn load_tags(
    conn: &mut PgConnection,
    ids: &[i64],
) -> Result<HashMap<i64, Vec<Tag>>, DatabaseError> {
    let mut by_data: HashMap<i64, Vec<Tag>> = HashMap::new();
    if ids.is_empty() {
        return Ok(by_data);
    }

    let links = sqlx::query_as::<_, TagLink>(
        "SELECT dt.data_id, t.id, t.name FROM data_tags dt \
         JOIN tags t ON t.id = dt.tag_id \
         WHERE dt.data_id = ANY($1) ORDER BY dt.data_id, dt.position",
    )
    .bind(ids)
    .fetch_all(conn)
    .await?;

    for link in links {
        by_data.entry(link.data_id).or_default().push(Tag {
            id: link.id,
            name: link.name,
        });
    }
    Ok(by_data)
}

async fn attach_tags(
    conn: &mut PgConnection,
    rows: Vec<DataRow>,
) -> Result<Vec<DynamicData>, DatabaseError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut tags = load_tags(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let tags = tags.remove(&row.id).unwrap_or_default();
            row.with_tags(tags)
        })
        .collect())
}

/// Link `names` to `data_id`, creating missing tags. Existing links are
/// expected to be cleared by the caller.
async fn link_tags(
    conn: &mut PgConnection,
    data_id: i64,
    names: &[String],
) -> Result<Vec<Tag>, DatabaseError> {
    let mut tags = Vec::new();
    for (position, name) in unique_tag_names(names).into_iter().enumerate() {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query("INSERT INTO data_tags (data_id, tag_id, position) VALUES ($1, $2, $3)")
            .bind(data_id)
            .bind(tag.id)
            .bind(position as i32)
            .execute(&mut *conn)
            .await?;

        tags.push(tag);
    }
    Ok(tags)
}

impl PgStore {
    async fn data_page(
        &self,
        filter: &str,
        param: Option<String>,
        page: PageRequest,
    ) -> Result<Page<DynamicData>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let count_sql = format!("SELECT COUNT(*) FROM dynamic_data d WHERE {}", filter);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&param)
            .fetch_one(&mut *conn)
            .await?;

        let sql = format!(
            "SELECT {} FROM dynamic_data d WHERE {} ORDER BY d.id LIMIT $2 OFFSET $3",
            COLUMNS, filter
        );
        let rows = sqlx::query_as::<_, DataRow>(&sql)
            .bind(&param)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&mut *conn)
            .await?;

        let data = attach_tags(&mut conn, rows).await?;
        Ok(Page::new(data, total, page))
    }
}

#[async_trait]
impl DynamicDataStore for PgStore {
    async fn list(
        &self,
        page: PageRequest,
        tag: Option<&str>,
    ) -> Result<Page<DynamicData>, DatabaseError> {
        self.data_page(TAG_FILTER, tag.map(str::to_string), page)
            .await
    }

    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<DynamicData>, DatabaseError> {
        let pattern = format!("%{}%", escape_like(query));
        self.data_page(SEARCH_FILTER, Some(pattern), page).await
    }

    async fn get(&self, id: i64) -> Result<Option<DynamicData>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let sql = format!("SELECT {} FROM dynamic_data d WHERE d.id = $1", COLUMNS);
        let Some(row) = sqlx::query_as::<_, DataRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };
        Ok(attach_tags(&mut conn, vec![row]).await?.pop())
    }

    async fn create(&self, input: DynamicDataCreate) -> Result<DynamicData, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DataRow>(
            "INSERT INTO dynamic_data AS d (title, description, content) VALUES ($1, $2, $3) \
             RETURNING d.id, d.title, d.description, d.content, d.created_at, d.updated_at",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(Json(&input.content))
        .fetch_one(&mut *tx)
        .await?;

        let tags = link_tags(&mut tx, row.id, &input.tags).await?;

        tx.commit().await?;
        Ok(row.with_tags(tags))
    }

    async fn update(
        &self,
        id: i64,
        mut patch: DynamicDataUpdate,
    ) -> Result<Option<DynamicData>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT {} FROM dynamic_data d WHERE d.id = $1 FOR UPDATE",
            COLUMNS
        );
        let Some(row) = sqlx::query_as::<_, DataRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut item = row.with_tags(Vec::new());
        patch.apply_fields(&mut item);

        let sql = format!(
            "UPDATE dynamic_data AS d SET title = $2, description = $3, content = $4, \
             updated_at = NOW() WHERE d.id = $1 RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, DataRow>(&sql)
            .bind(id)
            .bind(&item.title)
            .bind(&item.description)
            .bind(Json(&item.content))
            .fetch_one(&mut *tx)
            .await?;

        if let Some(names) = patch.tags.take() {
            sqlx::query("DELETE FROM data_tags WHERE data_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            link_tags(&mut tx, id, &names).await?;
        }

        let updated = attach_tags(&mut tx, vec![row]).await?.pop();
        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM dynamic_data WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
