#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use portfolio_api::config::{ApiConfig, ContactConfig, SecurityConfig};
use portfolio_api::database::models::DesignSystemConfig;
use portfolio_api::database::Stores;
use portfolio_api::services::ContactRelay;
use portfolio_api::{app, AppState};

/// The full router over a fresh in-memory store, driven in-process
pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }

    /// Payload of a success envelope
    pub fn data(&self) -> Value {
        self.json()["data"].clone()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_contact(ContactConfig::default())
    }

    pub fn with_contact(contact: ContactConfig) -> Self {
        Self::with_stores(Stores::memory(), contact)
    }

    pub fn with_stores(stores: Stores, contact: ContactConfig) -> Self {
        let security = SecurityConfig {
            cors_origins: vec!["*".to_string()],
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_minutes: 30,
        };
        let contact = ContactRelay::new(contact).expect("contact relay");
        let state = AppState::new(
            stores,
            DesignSystemConfig::default(),
            ApiConfig::default(),
            contact,
        );
        Self {
            router: app(state, &security),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value)?)
            }
            None => Body::empty(),
        };
        self.send(builder.body(body)?).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok(TestResponse {
            status,
            content_type,
            text: String::from_utf8(bytes.to_vec())?,
        })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::POST, uri, None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a design system and return its id
    pub async fn create_design(&self, name: &str) -> Result<i64> {
        let res = self.post("/api/v1/design", design_payload(name)).await?;
        assert_eq!(res.status, StatusCode::CREATED, "create design: {}", res.text);
        Ok(res.data()["id"].as_i64().expect("design id"))
    }

    /// Create a data item and return its id
    pub async fn create_data(&self, title: &str, description: Option<&str>, tags: &[&str]) -> Result<i64> {
        let res = self.post("/api/v1/data", data_payload(title, description, tags)).await?;
        assert_eq!(res.status, StatusCode::CREATED, "create data: {}", res.text);
        Ok(res.data()["id"].as_i64().expect("data id"))
    }
}

pub fn design_payload(name: &str) -> Value {
    let mut payload = serde_json::to_value(DesignSystemConfig::default()).expect("default config");
    payload["name"] = json!(name);
    payload
}

pub fn project_payload(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Project {}", id),
        "description": "A portfolio project",
        "image": "/images/project.png",
        "technologies": ["Rust", "PostgreSQL"],
        "link": "https://example.com/project",
        "github": "https://github.com/example/project",
        "achievements": ["Shipped v1"]
    })
}

pub fn experience_payload(id: &str) -> Value {
    json!({
        "id": id,
        "role": "Senior Engineer",
        "company": "Example Corp",
        "period": "2021 - Present",
        "description": "Built backend services",
        "achievements": ["Cut p99 latency in half"],
        "projects": ["portfolio"],
        "color": "#8B5CF6"
    })
}

pub fn data_payload(title: &str, description: Option<&str>, tags: &[&str]) -> Value {
    json!({
        "title": title,
        "description": description,
        "content": { "body": format!("{} body", title) },
        "tags": tags
    })
}

pub fn profile_payload() -> Value {
    json!({
        "name": "Jane Doe",
        "description": "Software engineer",
        "email": "jane@example.com",
        "github_url": "https://github.com/janedoe"
    })
}
