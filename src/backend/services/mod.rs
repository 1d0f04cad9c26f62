pub mod http;
pub mod mock;

pub use http::HttpBackend;
pub use mock::MockBackend;
