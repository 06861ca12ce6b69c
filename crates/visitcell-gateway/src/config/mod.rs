//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use visitcell_core::error::{Result, VisitCellError};

pub use schema::{GatewayConfig, GatewaySection, SessionSection, StorageBackend, StorageSection};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "visitcell.yaml";

/// Env var overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "VISITCELL_CONFIG";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| VisitCellError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| VisitCellError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config path from the environment, falling back to the default.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
