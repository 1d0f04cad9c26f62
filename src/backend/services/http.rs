//! REST backend over HTTP.
//!
//! Talks JSON to a fuel log API:
//! - `GET /logs`, `POST /logs`, `PUT /logs/{id}`, `DELETE /logs/{id}`
//! - `POST /auth/login`, `POST /auth/register`
//!
//! Every request carries a fresh `X-Request-Id` and, once a token is set,
//! `Authorization: Bearer <token>`.

use std::sync::RwLock;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::{
    AuthBackend, AuthResponse, BackendError, FuelBackend, FuelLogForm, FuelLogRecord,
};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Serialize, Debug)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize, Debug)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            token: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let request_id = uuid::Uuid::new_v4().to_string();
        debug!("{} {} (request_id={})", method, path, request_id);
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header("X-Request-Id", request_id);
        let token = self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Sends the request and maps transport failures and non-2xx statuses.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend API error: {} - {}", status, message);
            return Err(BackendError::Api { status, message });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self.send(builder).await?;
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl FuelBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_records(&self) -> Result<Vec<FuelLogRecord>, BackendError> {
        let records: Vec<FuelLogRecord> = self
            .send_json(self.request(reqwest::Method::GET, "/logs"))
            .await?;
        info!("Fetched {} records from {}", records.len(), self.base_url);
        Ok(records)
    }

    async fn create_record(&self, form: &FuelLogForm) -> Result<FuelLogRecord, BackendError> {
        self.send_json(self.request(reqwest::Method::POST, "/logs").json(form))
            .await
    }

    async fn update_record(
        &self,
        id: &str,
        form: &FuelLogForm,
    ) -> Result<FuelLogRecord, BackendError> {
        let path = format!("/logs/{id}");
        self.send_json(self.request(reqwest::Method::PUT, &path).json(form))
            .await
    }

    async fn delete_record(&self, id: &str) -> Result<(), BackendError> {
        let path = format!("/logs/{id}");
        self.send(self.request(reqwest::Method::DELETE, &path)).await?;
        Ok(())
    }

    fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError> {
        let body = LoginRequest { email, password };
        self.send_json(self.request(reqwest::Method::POST, "/auth/login").json(&body))
            .await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, BackendError> {
        let body = RegisterRequest {
            name,
            email,
            password,
        };
        self.send_json(self.request(reqwest::Method::POST, "/auth/register").json(&body))
            .await
    }
}
