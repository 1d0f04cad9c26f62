//! Fuelog library exports for testing

use clap::ValueEnum;

pub mod backend;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum BackendKind {
    #[default]
    Mock,
    Http,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Mock => "mock",
            BackendKind::Http => "http",
        }
    }
}
