mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{experience_payload, TestApp};
use serde_json::json;

#[tokio::test]
async fn experience_crud_cycle() -> Result<()> {
    let app = TestApp::new();

    let res = app.post("/api/v1/experiences", experience_payload("acme")).await?;
    assert_eq!(res.status, StatusCode::CREATED, "body: {}", res.text);
    assert_eq!(res.data()["company"], "Example Corp");

    let res = app
        .put(
            "/api/v1/experiences/acme",
            json!({ "period": "2019 - 2021", "projects": [] }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let updated = res.data();
    assert_eq!(updated["period"], "2019 - 2021");
    assert_eq!(updated["projects"], json!([]));
    assert_eq!(updated["role"], "Senior Engineer");

    assert_eq!(app.delete("/api/v1/experiences/acme").await?.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/api/v1/experiences/acme").await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn project_references_are_not_checked() -> Result<()> {
    let app = TestApp::new();
    let mut payload = experience_payload("orphan");
    payload["projects"] = json!(["does-not-exist"]);

    let res = app.post("/api/v1/experiences", payload).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn duplicate_and_missing_ids() -> Result<()> {
    let app = TestApp::new();
    app.post("/api/v1/experiences", experience_payload("one")).await?;

    let res = app.post("/api/v1/experiences", experience_payload("one")).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["code"], "CONFLICT");

    assert_eq!(app.delete("/api/v1/experiences/none").await?.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.put("/api/v1/experiences/none", json!({ "role": "x" })).await?.status,
        StatusCode::NOT_FOUND
    );
    Ok(())
}

#[tokio::test]
async fn blank_required_fields_fail_validation() -> Result<()> {
    let app = TestApp::new();
    let mut payload = experience_payload("blank");
    payload["company"] = json!("");
    payload["period"] = json!("");
    payload["color"] = json!("");

    let res = app.post("/api/v1/experiences", payload).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let errors = &res.json()["field_errors"];
    for field in ["company", "period", "color"] {
        assert!(errors.get(field).is_some(), "missing error for {}", field);
    }

    app.post("/api/v1/experiences", experience_payload("kept")).await?;
    let res = app
        .put("/api/v1/experiences/kept", json!({ "description": "" }))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}
