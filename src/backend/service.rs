use std::fmt;

use async_trait::async_trait;

use super::types::{AuthResponse, FuelLogForm, FuelLogRecord};

/// Errors that can occur while talking to a backend.
/// Variants carry the failure kind so callers can tell them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Backend returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the backend's response.
    Parse(String),
    /// The backend refused the operation without further detail.
    Rejected(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
            BackendError::Rejected(msg) => write!(f, "request rejected: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Storage for fuel log records.
#[async_trait]
pub trait FuelBackend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// All records belonging to the current user.
    async fn fetch_records(&self) -> Result<Vec<FuelLogRecord>, BackendError>;

    async fn create_record(&self, form: &FuelLogForm) -> Result<FuelLogRecord, BackendError>;

    /// Replaces the editable fields of `id`, keeping its identity.
    async fn update_record(
        &self,
        id: &str,
        form: &FuelLogForm,
    ) -> Result<FuelLogRecord, BackendError>;

    async fn delete_record(&self, id: &str) -> Result<(), BackendError>;

    /// Sets the bearer token sent with subsequent requests.
    fn set_token(&self, _token: Option<String>) {}
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError>;

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, BackendError>;
}
