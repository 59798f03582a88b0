mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{data_payload, TestApp};
use serde_json::{json, Value};

fn tag_names(item: &Value) -> Vec<String> {
    item["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

fn ids(page: &Value) -> Vec<i64> {
    page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn tag_filter_selects_matching_items() -> Result<()> {
    let app = TestApp::new();
    let first = app.create_data("First", None, &["a", "b"]).await?;
    let second = app.create_data("Second", None, &["b", "c"]).await?;

    let by_b = app.get("/api/v1/data?tag=b").await?.data();
    assert_eq!(ids(&by_b), vec![first, second]);
    assert_eq!(by_b["total"], 2);

    let by_a = app.get("/api/v1/data?tag=a").await?.data();
    assert_eq!(ids(&by_a), vec![first]);

    let by_missing = app.get("/api/v1/data?tag=zzz").await?.data();
    assert_eq!(by_missing["total"], 0);
    assert_eq!(by_missing["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn tags_are_shared_by_name_and_deduplicated() -> Result<()> {
    let app = TestApp::new();
    let res = app
        .post("/api/v1/data", data_payload("One", None, &["rust", "web", "rust"]))
        .await?;
    let one = res.data();
    assert_eq!(tag_names(&one), vec!["rust", "web"]);

    let two = app
        .post("/api/v1/data", data_payload("Two", None, &["rust"]))
        .await?
        .data();
    assert_eq!(one["tags"][0]["id"], two["tags"][0]["id"]);
    Ok(())
}

#[tokio::test]
async fn search_matches_description_only_substrings() -> Result<()> {
    let app = TestApp::new();
    let hit = app
        .create_data("Weekly notes", Some("Talks about Ownership rules"), &[])
        .await?;
    app.create_data("Unrelated", Some("Nothing here"), &[]).await?;

    let page = app.get("/api/v1/data/search?q=ownership").await?.data();
    assert_eq!(ids(&page), vec![hit]);
    assert_eq!(page["total"], 1);
    assert_eq!(page["page"], 1);
    assert_eq!(page["total_pages"], 1);
    Ok(())
}

#[tokio::test]
async fn search_treats_wildcards_literally() -> Result<()> {
    let app = TestApp::new();
    let literal = app.create_data("100% done", None, &[]).await?;
    app.create_data("1000 done", None, &[]).await?;

    let page = app.get("/api/v1/data/search?q=100%25").await?.data();
    assert_eq!(ids(&page), vec![literal]);
    Ok(())
}

#[tokio::test]
async fn empty_search_query_is_rejected() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/api/v1/data/search?q=").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["field_errors"].get("q").is_some());

    let res = app.get("/api/v1/data/search").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn pagination_fields_are_consistent() -> Result<()> {
    let app = TestApp::new();
    for i in 0..5 {
        app.create_data(&format!("Item {}", i), None, &[]).await?;
    }

    let page = app.get("/api/v1/data?skip=2&limit=2").await?.data();
    assert_eq!(page["total"], 5);
    assert_eq!(page["page"], 2);
    assert_eq!(page["page_size"], 2);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);

    let tail = app.get("/api/v1/data?skip=4&limit=2").await?.data();
    assert_eq!(tail["page"], 3);
    assert_eq!(tail["data"].as_array().unwrap().len(), 1);

    let zero = app.get("/api/v1/data?limit=0").await?.data();
    assert_eq!(zero["page"], 1);
    assert_eq!(zero["total_pages"], 1);
    assert_eq!(zero["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn update_replaces_tags_only_when_supplied() -> Result<()> {
    let app = TestApp::new();
    let id = app.create_data("Item", Some("Keep me"), &["old", "older"]).await?;
    let uri = format!("/api/v1/data/{}", id);

    let res = app.put(&uri, json!({ "title": "Renamed" })).await?;
    assert_eq!(res.status, StatusCode::OK, "body: {}", res.text);
    let item = res.data();
    assert_eq!(item["title"], "Renamed");
    assert_eq!(item["description"], "Keep me");
    assert_eq!(tag_names(&item), vec!["old", "older"]);

    let item = app.put(&uri, json!({ "tags": ["new"] })).await?.data();
    assert_eq!(tag_names(&item), vec!["new"]);

    let by_old = app.get("/api/v1/data?tag=old").await?.data();
    assert_eq!(by_old["total"], 0);

    let item = app.put(&uri, json!({ "description": null, "tags": [] })).await?.data();
    assert!(item["description"].is_null());
    assert_eq!(item["tags"], json!([]));
    Ok(())
}

#[tokio::test]
async fn content_must_be_an_object() -> Result<()> {
    let app = TestApp::new();
    let res = app
        .post("/api/v1/data", json!({ "title": "Bad", "content": "text" }))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn missing_data_is_404() -> Result<()> {
    let app = TestApp::new();
    let id = app.create_data("Short lived", None, &["t"]).await?;

    assert_eq!(app.delete(&format!("/api/v1/data/{}", id)).await?.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&format!("/api/v1/data/{}", id)).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete("/api/v1/data/4242").await?.status, StatusCode::NOT_FOUND);

    let by_tag = app.get("/api/v1/data?tag=t").await?.data();
    assert_eq!(by_tag["total"], 0);
    Ok(())
}
