//! Shared harness for router tests
//!
//! Builds the real router on top of in-memory stores that honour the same
//! contracts as the PostgreSQL repositories.

#![allow(dead_code)]

use api::{
    AppState, create_router,
    models::{Message, MessageFields, NewUser, Sessao, User},
    repositories::{MessageStore, SessaoStore, UserStore},
};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use common::{
    error::DatabaseResult,
    jwt::{JwtConfig, JwtService},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "router-test-secret";

struct Table<T> {
    next_id: i32,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    table: Mutex<Table<User>>,
}

impl MemoryUsers {
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        let table = self.table.lock().unwrap();
        table.rows.iter().find(|u| u.username == username).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn username_exists(&self, username: &str) -> DatabaseResult<bool> {
        Ok(self.find_by_username(username).is_some())
    }

    async fn create(&self, new_user: &NewUser, password_hash: &str) -> DatabaseResult<User> {
        let mut table = self.table.lock().unwrap();
        let user = User {
            id: table.allocate_id(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            password: password_hash.to_string(),
            is_staff: false,
            is_superuser: false,
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
            birth_date: None,
        };
        table.rows.push(user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct MemorySessoes {
    table: Mutex<Table<Sessao>>,
}

impl MemorySessoes {
    /// Unscoped read, for asserting on stored state
    pub fn get(&self, id_sessao: i32) -> Option<Sessao> {
        let table = self.table.lock().unwrap();
        table.rows.iter().find(|s| s.id_sessao == id_sessao).cloned()
    }
}

#[async_trait]
impl SessaoStore for MemorySessoes {
    async fn list_by_owner(&self, owner: i32) -> DatabaseResult<Vec<Sessao>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .filter(|s| s.id_user == Some(owner))
            .cloned()
            .collect())
    }

    async fn create(&self, owner: i32, name: &str) -> DatabaseResult<Sessao> {
        let mut table = self.table.lock().unwrap();
        let sessao = Sessao {
            id_sessao: table.allocate_id(),
            name: name.to_string(),
            id_user: Some(owner),
        };
        table.rows.push(sessao.clone());
        Ok(sessao)
    }

    async fn find_owned(&self, id_sessao: i32, owner: i32) -> DatabaseResult<Option<Sessao>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .find(|s| s.id_sessao == id_sessao && s.id_user == Some(owner))
            .cloned())
    }

    async fn update_owned(
        &self,
        id_sessao: i32,
        owner: i32,
        name: &str,
    ) -> DatabaseResult<Option<Sessao>> {
        let mut table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter_mut()
            .find(|s| s.id_sessao == id_sessao && s.id_user == Some(owner))
            .map(|s| {
                s.name = name.to_string();
                s.id_user = Some(owner);
                s.clone()
            }))
    }

    async fn delete_owned(&self, id_sessao: i32, owner: i32) -> DatabaseResult<bool> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table
            .rows
            .retain(|s| !(s.id_sessao == id_sessao && s.id_user == Some(owner)));
        Ok(table.rows.len() < before)
    }

    async fn exists(&self, id_sessao: i32) -> DatabaseResult<bool> {
        Ok(self.get(id_sessao).is_some())
    }
}

#[derive(Default)]
pub struct MemoryMessages {
    table: Mutex<Table<Message>>,
}

fn apply(message: &mut Message, fields: &MessageFields) {
    message.id_sessao = fields.id_sessao;
    message.key_id = fields.key_id;
    message.tex = fields.tex.clone();
    message.media_url = fields.media_url.clone();
    message.media_type = fields.media_type.clone();
    message.media_size = fields.media_size;
    message.media_name = fields.media_name.clone();
    message.media_duration = fields.media_duration;
}

#[async_trait]
impl MessageStore for MemoryMessages {
    async fn list(&self) -> DatabaseResult<Vec<Message>> {
        Ok(self.table.lock().unwrap().rows.clone())
    }

    async fn list_by_sessao(&self, id_sessao: i32) -> DatabaseResult<Vec<Message>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .filter(|m| m.id_sessao == Some(id_sessao))
            .cloned()
            .collect())
    }

    async fn find(&self, id: i32) -> DatabaseResult<Option<Message>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, fields: &MessageFields) -> DatabaseResult<Message> {
        let mut table = self.table.lock().unwrap();
        let mut message = Message {
            id: table.allocate_id(),
            id_sessao: None,
            key_id: 0,
            tex: None,
            timestamp: Utc::now(),
            media_url: None,
            media_type: None,
            media_size: None,
            media_name: None,
            media_duration: None,
        };
        apply(&mut message, fields);
        table.rows.push(message.clone());
        Ok(message)
    }

    async fn update(&self, id: i32, fields: &MessageFields) -> DatabaseResult<Option<Message>> {
        let mut table = self.table.lock().unwrap();
        Ok(table.rows.iter_mut().find(|m| m.id == id).map(|m| {
            apply(m, fields);
            m.clone()
        }))
    }

    async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|m| m.id != id);
        Ok(table.rows.len() < before)
    }
}

pub struct TestApp {
    pub router: Router,
    pub jwt: JwtService,
    pub users: Arc<MemoryUsers>,
    pub sessoes: Arc<MemorySessoes>,
    pub messages: Arc<MemoryMessages>,
}

impl TestApp {
    pub fn new() -> Self {
        let jwt = JwtService::new(JwtConfig::with_secret(JWT_SECRET)).unwrap();
        let users = Arc::new(MemoryUsers::default());
        let sessoes = Arc::new(MemorySessoes::default());
        let messages = Arc::new(MemoryMessages::default());

        let state = AppState {
            jwt_service: jwt.clone(),
            user_store: users.clone(),
            sessao_store: sessoes.clone(),
            message_store: messages.clone(),
        };

        Self {
            router: create_router(state),
            jwt,
            users,
            sessoes,
            messages,
        }
    }

    /// Access token for a user id
    pub fn token_for(&self, user_id: i32) -> String {
        self.jwt.generate_access_token(user_id).unwrap()
    }

    /// Send a request through the router and decode the JSON body, if any
    pub async fn send(
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
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }
}
