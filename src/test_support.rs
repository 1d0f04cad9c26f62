//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use chrono::NaiveDate;

use crate::backend::services::mock::DEMO_TOKEN;
use crate::backend::{FuelLogForm, FuelLogRecord, MockBackend};
use crate::core::clock::FixedClock;
use crate::core::session::{MemoryTokenStore, SessionContext};
use crate::core::state::App;

/// The fixed "today" used throughout the tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
}

pub fn record(
    id: &str,
    date: &str,
    liters: f64,
    price_per_liter: f64,
    total_cost: f64,
    vehicle_type: &str,
) -> FuelLogRecord {
    FuelLogRecord {
        id: id.to_string(),
        user_id: "1".to_string(),
        date: date.to_string(),
        liters,
        price_per_liter,
        total_cost,
        vehicle_type: vehicle_type.to_string(),
        notes: Some("Regular fill-up".to_string()),
    }
}

pub fn sample_form() -> FuelLogForm {
    FuelLogForm {
        date: "2025-04-19".to_string(),
        liters: 30.0,
        price_per_liter: 1.5,
        vehicle_type: "Truck".to_string(),
        notes: Some("Road trip".to_string()),
    }
}

/// A signed-in app over a zero-latency mock backend.
pub fn test_app() -> App {
    let backend = Arc::new(MockBackend::new(0));
    let session = SessionContext::init(Box::new(MemoryTokenStore::with_token(DEMO_TOKEN)));
    App::new(
        backend.clone(),
        backend,
        session,
        Arc::new(FixedClock(today())),
    )
}
