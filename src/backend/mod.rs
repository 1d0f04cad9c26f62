pub mod service;
pub mod services;
pub mod types;

pub use service::{AuthBackend, BackendError, FuelBackend};
pub use services::{HttpBackend, MockBackend};
pub use types::{AuthResponse, FuelLogForm, FuelLogRecord, User};
