use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::Result;
use crate::remote::DEFAULT_HOST;

/// Persisted client settings.
///
/// Only the daemon host lives here; keys are held by the daemon itself and
/// never written to disk by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Config {
    fn path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".config"));
        config_dir.join("peermail").join("config.toml")
    }

    /// Load from the platform config dir; a missing file yields an error the
    /// caller is expected to fall back from.
    pub async fn load() -> Result<Self> {
        let content = fs::read_to_string(Self::path()).await?;
        Ok(toml::from_str(&content)?)
    }

    pub async fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, toml::to_string_pretty(self)?).await?;
        Ok(())
    }
}
