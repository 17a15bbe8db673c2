//! Shared harness for the integration tests: a fresh in-memory SQLite
//! database per test, migrated and wired into the real router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use diaspora_bridge::api::{create_router, AppState};
use diaspora_bridge::config::Config;
use diaspora_bridge::infra::Database;
use diaspora_bridge::services::Services;

pub const JWT_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const ADMIN_EMAIL: &str = "admin@diasporabridge.org";
pub const ADMIN_CODE: &str = "bootstrap-code-123";
pub const PASSWORD: &str = "SecurePass123!";

/// One connection so every query sees the same in-memory database.
pub fn test_config() -> Config {
    Config::new("sqlite::memory:", JWT_SECRET)
        .with_max_connections(1)
        .with_admin_bootstrap(ADMIN_EMAIL, ADMIN_CODE)
}

pub async fn test_database(config: &Config) -> Arc<Database> {
    Arc::new(
        Database::connect(config)
            .await
            .expect("in-memory database should migrate"),
    )
}

pub struct TestApp {
    pub router: Router,
    pub database: Arc<Database>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let database = test_database(&config).await;
        let router = create_router(AppState::from_config(database.clone(), config));
        Self { router, database }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(token), body).await
    }

    /// Register a mentee and return (token, user id).
    pub async fn register_mentee(&self, email: &str) -> (String, String) {
        let (status, body) = self
            .post(
                "/auth/register",
                None,
                json!({
                    "email": email,
                    "password": PASSWORD,
                    "firstName": "Amina",
                    "lastName": "Uwase",
                    "type": "mentee",
                    "goals": ["Career change"],
                    "interests": ["Finance"],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "mentee registration failed: {}", body);
        credentials(&body)
    }

    /// Register a mentor (pending approval) and return (token, user id).
    pub async fn register_mentor(&self, email: &str, expertise: &[&str]) -> (String, String) {
        let (status, body) = self
            .post(
                "/auth/register",
                None,
                json!({
                    "email": email,
                    "password": PASSWORD,
                    "firstName": "Kwame",
                    "lastName": "Mensah",
                    "type": "mentor",
                    "bio": "Investment banker in London",
                    "expertise": expertise,
                    "languages": ["English", "Twi"],
                    "availability": "Weekends",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "mentor registration failed: {}", body);
        credentials(&body)
    }

    /// Claim the admin role with a fresh account and return its token.
    pub async fn claim_admin(&self) -> String {
        let (status, body) = self
            .post(
                "/auth/claim-admin",
                None,
                json!({ "email": ADMIN_EMAIL, "code": ADMIN_CODE, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin claim failed: {}", body);
        credentials(&body).0
    }

    /// Id of the application belonging to the given user.
    pub async fn application_of(&self, admin_token: &str, user_id: &str) -> String {
        let (status, body) = self.get("/admin/mentor-applications", admin_token).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array()
            .expect("list of applications")
            .iter()
            .find(|a| a["userId"] == user_id)
            .and_then(|a| a["id"].as_str())
            .expect("application for user")
            .to_string()
    }
}

/// Build the same services the router uses, for tests that bypass HTTP.
pub async fn test_services() -> (Services, Arc<Database>) {
    let config = test_config();
    let database = test_database(&config).await;
    let services = Services::from_connection(database.get_connection(), config);
    (services, database)
}

fn credentials(body: &Value) -> (String, String) {
    let token = body["token"].as_str().expect("token").to_string();
    let id = body["user"]["id"].as_str().expect("user id").to_string();
    (token, id)
}
