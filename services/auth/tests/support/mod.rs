#![allow(dead_code)]

use async_trait::async_trait;
use auth::{AppState, create_router, models::Credentials, repositories::CredentialStore};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use common::{
    error::DatabaseResult,
    jwt::{JwtConfig, JwtService},
    password::hash_password,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
pub struct MemoryCredentials {
    rows: Mutex<Vec<Credentials>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentials {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<Credentials>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|c| c.username == username).cloned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub jwt: JwtService,
    pub credentials: Arc<MemoryCredentials>,
}

impl TestApp {
    pub fn new() -> Self {
        let jwt = JwtService::new(JwtConfig::with_secret("token-test-secret")).unwrap();
        let credentials = Arc::new(MemoryCredentials::default());

        let state = AppState {
            jwt_service: jwt.clone(),
            credential_store: credentials.clone(),
        };

        Self {
            router: create_router(state),
            jwt,
            credentials,
        }
    }

    /// Store a user with an Argon2 hash of `password`
    pub fn add_user(&self, id: i32, username: &str, password: &str, is_active: bool) {
        self.add_raw_user(id, username, &hash_password(password).unwrap(), is_active);
    }

    /// Store a user with the given hash verbatim
    pub fn add_raw_user(&self, id: i32, username: &str, password_hash: &str, is_active: bool) {
        self.credentials.rows.lock().unwrap().push(Credentials {
            id,
            username: username.to_string(),
            password: password_hash.to_string(),
            is_active,
        });
    }

    pub async fn post(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
