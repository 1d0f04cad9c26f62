//! In-process backend with fixed response delays.
//!
//! Stands in for a real server: it is seeded with demo records, assigns ids
//! from the wall clock, and keeps its own list so a re-fetch sees earlier
//! mutations. `fail_next` makes upcoming calls fail for error-path testing.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use crate::backend::{
    AuthBackend, AuthResponse, BackendError, FuelBackend, FuelLogForm, FuelLogRecord, User,
};

pub const DEMO_USER_ID: &str = "1";
pub const DEMO_TOKEN: &str = "mock-jwt-token";
pub const DEFAULT_MOCK_DELAY_MS: u64 = 500;
pub const DEFAULT_AUTH_DELAY_MS: u64 = 800;

struct MockState {
    records: Vec<FuelLogRecord>,
    last_id: i64,
    failures_remaining: u32,
}

pub struct MockBackend {
    delay: Duration,
    auth_delay: Duration,
    state: Mutex<MockState>,
}

impl MockBackend {
    /// A mock seeded with the demo records.
    pub fn new(delay_ms: u64) -> Self {
        Self::with_records(delay_ms, demo_records())
    }

    pub fn with_records(delay_ms: u64, records: Vec<FuelLogRecord>) -> Self {
        let auth_delay_ms = if delay_ms == 0 { 0 } else { DEFAULT_AUTH_DELAY_MS };
        Self {
            delay: Duration::from_millis(delay_ms),
            auth_delay: Duration::from_millis(auth_delay_ms),
            state: Mutex::new(MockState {
                records,
                last_id: 0,
                failures_remaining: 0,
            }),
        }
    }

    /// Makes the next `count` calls fail with `BackendError::Rejected`.
    pub fn fail_next(&self, count: u32) {
        self.lock().failures_remaining = count;
    }

    /// Snapshot of the records the mock currently holds.
    pub fn records(&self) -> Vec<FuelLogRecord> {
        self.lock().records.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn simulate_latency(&self, delay: Duration) -> Result<(), BackendError> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.lock();
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            debug!(
                "Mock backend rejecting call ({} failures left)",
                state.failures_remaining
            );
            return Err(BackendError::Rejected("simulated failure".to_string()));
        }
        Ok(())
    }

    /// Millisecond timestamp id, bumped so two calls in the same millisecond
    /// still get distinct ids.
    fn next_id(state: &mut MockState) -> String {
        let now = Utc::now().timestamp_millis();
        state.last_id = now.max(state.last_id + 1);
        state.last_id.to_string()
    }
}

#[async_trait]
impl FuelBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_records(&self) -> Result<Vec<FuelLogRecord>, BackendError> {
        self.simulate_latency(self.delay).await?;
        let records = self.records();
        info!("Mock backend returning {} records", records.len());
        Ok(records)
    }

    async fn create_record(&self, form: &FuelLogForm) -> Result<FuelLogRecord, BackendError> {
        self.simulate_latency(self.delay).await?;
        let mut state = self.lock();
        let id = Self::next_id(&mut state);
        let record = FuelLogRecord::from_form(id, DEMO_USER_ID.to_string(), form);
        state.records.insert(0, record.clone());
        info!("Mock backend created record {}", record.id);
        Ok(record)
    }

    async fn update_record(
        &self,
        id: &str,
        form: &FuelLogForm,
    ) -> Result<FuelLogRecord, BackendError> {
        self.simulate_latency(self.delay).await?;
        let record = FuelLogRecord::from_form(id.to_string(), DEMO_USER_ID.to_string(), form);
        let mut state = self.lock();
        if let Some(existing) = state.records.iter_mut().find(|r| r.id == id) {
            *existing = record.clone();
        }
        info!("Mock backend updated record {}", id);
        Ok(record)
    }

    async fn delete_record(&self, id: &str) -> Result<(), BackendError> {
        self.simulate_latency(self.delay).await?;
        self.lock().records.retain(|r| r.id != id);
        info!("Mock backend deleted record {}", id);
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthResponse, BackendError> {
        self.simulate_latency(self.auth_delay).await?;
        Ok(AuthResponse {
            user: User {
                id: DEMO_USER_ID.to_string(),
                name: "Demo User".to_string(),
                email: email.to_string(),
            },
            token: DEMO_TOKEN.to_string(),
        })
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<AuthResponse, BackendError> {
        self.simulate_latency(self.auth_delay).await?;
        Ok(AuthResponse {
            user: User {
                id: DEMO_USER_ID.to_string(),
                name: name.to_string(),
                email: email.to_string(),
            },
            token: DEMO_TOKEN.to_string(),
        })
    }
}

/// The three April 2025 demo records.
pub fn demo_records() -> Vec<FuelLogRecord> {
    let record = |id: &str, date: &str, liters: f64, price: f64, total: f64, notes: &str| {
        FuelLogRecord {
            id: id.to_string(),
            user_id: DEMO_USER_ID.to_string(),
            date: date.to_string(),
            liters,
            price_per_liter: price,
            total_cost: total,
            vehicle_type: "Sedan".to_string(),
            notes: Some(notes.to_string()),
        }
    };
    vec![
        record("1", "2025-04-18", 45.0, 1.35, 60.75, "Regular fill-up"),
        record("2", "2025-04-10", 40.0, 1.40, 56.00, "Premium gas"),
        record("3", "2025-04-01", 50.0, 1.32, 66.00, ""),
    ]
}
