use std::net::SocketAddr;

use serde::Deserialize;
use visitcell_core::error::{Result, VisitCellError};
use visitcell_core::DEFAULT_SEED;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub storage: StorageSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(VisitCellError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.session.validate()?;
        self.storage.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            VisitCellError::BadRequest(format!(
                "gateway.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// Where SessionKeys come from. Only the seed is configurable; every request
/// resolves to the key derived from it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_seed")]
    pub seed: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if self.seed.is_empty() {
            return Err(VisitCellError::BadRequest("session.seed must not be empty".into()));
        }
        Ok(())
    }
}

fn default_seed() -> String {
    DEFAULT_SEED.into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sled,
    Memory,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_path(),
            mailbox_capacity: default_mailbox_capacity(),
        }
    }
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::Sled && self.path.trim().is_empty() {
            return Err(VisitCellError::BadRequest(
                "storage.path must not be empty for the sled backend".into(),
            ));
        }
        if !(1..=4096).contains(&self.mailbox_capacity) {
            return Err(VisitCellError::BadRequest(
                "storage.mailbox_capacity must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::Sled
}
fn default_path() -> String {
    "data/visitcell.sled".into()
}
fn default_mailbox_capacity() -> usize {
    64
}
