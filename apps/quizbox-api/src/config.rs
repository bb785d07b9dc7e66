use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_STATIC_DIR: &str = "frontend/dist";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    #[serde(default)]
    pub admin_token: Option<String>,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Overrides `DATABASE_URL` / `DB_*` when set in the file.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATIC_DIR)
}

impl ApiConfig {
    pub fn load() -> Result<Self> {
        let config_paths = ["/etc/quizbox/api.toml", "./quizbox.toml"];

        for path in config_paths {
            if let Ok(contents) = fs::read_to_string(path) {
                tracing::info!("Loading config from {}", path);
                let config: Self =
                    toml::from_str(&contents).with_context(|| format!("Invalid config file {}", path))?;
                return Ok(config.normalized());
            }
        }

        tracing::info!("Loading config from environment");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(addr) => addr
                .trim()
                .parse()
                .with_context(|| format!("LISTEN_ADDR '{}' is not a socket address", addr))?,
            None => default_listen_addr(),
        };

        Ok(Self {
            listen_addr,
            admin_token: lookup("ADMIN_TOKEN"),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or_else(default_static_dir),
            database_url: None,
        }
        .normalized())
    }

    fn normalized(mut self) -> Self {
        self.admin_token = self
            .admin_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }
}
