mod common;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::post, Form, Router};
use common::TestApp;
use portfolio_api::config::ContactConfig;
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};

type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Stand-in for the external form endpoint; records every submission and
/// answers with `status`
async fn spawn_form_endpoint(status: StatusCode) -> Result<(String, Received)> {
    let received: Received = Arc::default();
    let router = Router::new()
        .route(
            "/formResponse",
            post(
                move |State(seen): State<Received>, Form(fields): Form<HashMap<String, String>>| async move {
                    seen.lock().await.push(fields);
                    status
                },
            ),
        )
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok((format!("http://{}/formResponse", addr), received))
}

fn contact_config(form_url: String) -> ContactConfig {
    ContactConfig {
        form_url,
        timeout_secs: 5,
        ..ContactConfig::default()
    }
}

fn message() -> serde_json::Value {
    json!({ "name": "Jane", "email": "jane@example.com", "message": "Hello there" })
}

#[tokio::test]
async fn message_is_relayed_as_form_fields() -> Result<()> {
    let (url, received) = spawn_form_endpoint(StatusCode::OK).await?;
    let app = TestApp::with_contact(contact_config(url));

    let res = app.post("/api/v1/contact", message()).await?;
    assert_eq!(res.status, StatusCode::OK, "body: {}", res.text);
    assert_eq!(res.data(), json!({ "status": "success" }));

    let seen = received.lock().await;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["entry.2005620554"], "Jane");
    assert_eq!(seen[0]["entry.1045781291"], "jane@example.com");
    assert_eq!(seen[0]["entry.839337160"], "Hello there");
    Ok(())
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() -> Result<()> {
    let (url, received) = spawn_form_endpoint(StatusCode::INTERNAL_SERVER_ERROR).await?;
    let app = TestApp::with_contact(contact_config(url));

    let res = app.post("/api/v1/contact", message()).await?;
    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    assert_eq!(res.json()["error"], true);
    assert_eq!(received.lock().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unreachable_endpoint_is_bad_gateway() -> Result<()> {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let app = TestApp::with_contact(contact_config(format!("http://{}/formResponse", addr)));
    let res = app.post("/api/v1/contact", message()).await?;
    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    Ok(())
}

#[tokio::test]
async fn invalid_message_never_reaches_upstream() -> Result<()> {
    let (url, received) = spawn_form_endpoint(StatusCode::OK).await?;
    let app = TestApp::with_contact(contact_config(url));

    let res = app
        .post(
            "/api/v1/contact",
            json!({ "name": "Jane", "email": "not-an-email", "message": "" }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let body = res.json();
    assert!(body["field_errors"].get("email").is_some());
    assert!(body["field_errors"].get("message").is_some());
    assert!(received.lock().await.is_empty());
    Ok(())
}
