//! Runs the HTTP surface against a real Postgres store.
//!
//! Skipped unless TEST_DATABASE_URL points at a database the tests may
//! write to. Every record uses a unique name, so reruns against the same
//! database are fine.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{data_payload, project_payload, TestApp};
use serde_json::json;
use uuid::Uuid;

use portfolio_api::config::{ContactConfig, DatabaseConfig};
use portfolio_api::database::{DatabaseManager, Stores};

async fn postgres_app() -> Result<Option<TestApp>> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("TEST_DATABASE_URL not set, skipping postgres tests");
            return Ok(None);
        }
    };

    let config = DatabaseConfig {
        url: Some(url),
        max_connections: 5,
        connection_timeout: 10,
        run_migrations: true,
    };
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some(TestApp::with_stores(
        Stores::postgres(pool),
        ContactConfig::default(),
    )))
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

#[tokio::test]
async fn postgres_store_end_to_end() -> Result<()> {
    let Some(app) = postgres_app().await? else {
        return Ok(());
    };

    let health = app.get("/health").await?;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.data()["store"], "postgres");

    design_activation(&app).await?;
    project_conflict_and_update(&app).await?;
    tagged_data(&app).await?;
    Ok(())
}

async fn design_activation(app: &TestApp) -> Result<()> {
    let first = app.create_design(&unique("theme")).await?;
    let second = app.create_design(&unique("theme")).await?;

    let res = app.post_empty(&format!("/api/v1/design/{}/activate", first)).await?;
    assert_eq!(res.status, StatusCode::OK, "body: {}", res.text);
    assert_eq!(app.get("/api/v1/design/active").await?.data()["id"], first);

    app.post_empty(&format!("/api/v1/design/{}/activate", second)).await?;
    assert_eq!(app.get("/api/v1/design/active").await?.data()["id"], second);
    let stale = app.get(&format!("/api/v1/design/{}", first)).await?.data();
    assert_eq!(stale["is_active"], false);

    let res = app.delete(&format!("/api/v1/design/{}", second)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let res = app.delete(&format!("/api/v1/design/{}", first)).await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    Ok(())
}

async fn project_conflict_and_update(app: &TestApp) -> Result<()> {
    let id = unique("project");
    let res = app.post("/api/v1/projects", project_payload(&id)).await?;
    assert_eq!(res.status, StatusCode::CREATED, "body: {}", res.text);

    let res = app.post("/api/v1/projects", project_payload(&id)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/projects/{}", id);
    let updated = app
        .put(&uri, json!({ "github": null, "technologies": ["Go"] }))
        .await?
        .data();
    assert!(updated["github"].is_null());
    assert_eq!(updated["technologies"], json!(["Go"]));
    assert_eq!(updated["link"], "https://example.com/project");

    assert_eq!(app.delete(&uri).await?.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

async fn tagged_data(app: &TestApp) -> Result<()> {
    let shared = unique("tag");
    let only_first = unique("tag");
    let marker = unique("needle");
    let description = format!("has {}", marker);

    let first = app
        .post(
            "/api/v1/data",
            data_payload("First", Some(description.as_str()), &[only_first.as_str(), shared.as_str()]),
        )
        .await?
        .data();
    let second = app
        .post("/api/v1/data", data_payload("Second", None, &[shared.as_str()]))
        .await?
        .data();
    assert_eq!(first["tags"][1]["id"], second["tags"][0]["id"]);
    assert_eq!(first["tags"][0]["name"], only_first.as_str());

    let by_shared = app.get(&format!("/api/v1/data?tag={}", shared)).await?.data();
    assert_eq!(by_shared["total"], 2);

    let found = app
        .get(&format!("/api/v1/data/search?q={}", marker.to_uppercase()))
        .await?
        .data();
    assert_eq!(found["total"], 1);
    assert_eq!(found["data"][0]["id"], first["id"]);

    let uri = format!("/api/v1/data/{}", first["id"]);
    let replaced = app.put(&uri, json!({ "tags": [&shared] })).await?.data();
    assert_eq!(replaced["tags"].as_array().map(Vec::len), Some(1));
    let by_first = app.get(&format!("/api/v1/data?tag={}", only_first)).await?.data();
    assert_eq!(by_first["total"], 0);

    assert_eq!(app.delete(&uri).await?.status, StatusCode::NO_CONTENT);
    let by_shared = app.get(&format!("/api/v1/data?tag={}", shared)).await?.data();
    assert_eq!(by_shared["total"], 1);
    Ok(())
}
