//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.fuelog/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::backend::services::http::DEFAULT_API_URL;
use crate::backend::services::mock::DEFAULT_MOCK_DELAY_MS;
use crate::core::currency::Currency;
use crate::core::view::SortOrder;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FuelogConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub currency: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub export_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub kind: Option<String>,
    pub base_url: Option<String>,
    pub mock_delay_ms: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `"mock"` or `"http"`.
    pub backend: String,
    pub api_url: String,
    pub mock_delay_ms: u64,
    pub currency: Currency,
    pub sort_order: SortOrder,
    pub export_dir: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.fuelog/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fuelog").join("config.toml"))
}

/// Load config from `~/.fuelog/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FuelogConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FuelogConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FuelogConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FuelogConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: FuelogConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Fuelog Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# currency = "usd"                   # "usd", "inr", "eur", "jpy" (or FUELOG_CURRENCY)
# sort_order = "desc"                # "asc" or "desc"
# export_dir = "/home/me/Downloads"  # Where CSV exports are written

# [backend]
# kind = "mock"                      # "mock" or "http" (or FUELOG_BACKEND)
# base_url = "http://localhost:5000/api"   # Or set FUELOG_API_URL
# mock_delay_ms = 500
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_backend` and `cli_api_url` come from CLI flags (None = not specified).
pub fn resolve(
    config: &FuelogConfig,
    cli_backend: Option<&str>,
    cli_api_url: Option<&str>,
) -> ResolvedConfig {
    // Backend: CLI → env → config → default
    let backend = cli_backend
        .map(|s| s.to_string())
        .or_else(|| std::env::var("FUELOG_BACKEND").ok())
        .or_else(|| config.backend.kind.clone())
        .unwrap_or_else(|| "mock".to_string());

    // API URL: CLI → env → config → default
    let api_url = cli_api_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("FUELOG_API_URL").ok())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    // Currency: env → config → default
    let currency = std::env::var("FUELOG_CURRENCY")
        .ok()
        .or_else(|| config.general.currency.clone())
        .map(|code| Currency::from_code(&code))
        .unwrap_or_default();

    let export_dir = config
        .general
        .export_dir
        .as_ref()
        .map(PathBuf::from)
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    ResolvedConfig {
        backend,
        api_url,
        mock_delay_ms: config
            .backend
            .mock_delay_ms
            .unwrap_or(DEFAULT_MOCK_DELAY_MS),
        currency,
        sort_order: config.general.sort_order.unwrap_or_default(),
        export_dir,
    }
}
