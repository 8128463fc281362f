//! Configuration for the relay and the client.
//!
//! Read from a TOML file (`clarity.toml` by default). Every key is optional and
//! a missing file is the same as an empty one.
use anyhow::Context as _;
use serde_derive::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::utils::paths::expand_home;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "clarity.toml";

/// Top level of `clarity.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[server]` table, read by `clarity serve`.
    pub server: Server,
    /// `[client]` table, read by every other subcommand.
    pub client: Client,
}

/// Relay settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    /// Address to bind to.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory uploaded files are written to and served from.
    pub uploads_dir: PathBuf,
    /// Base URL of the Clarity engine API.
    pub engine_url: String,
    /// How long a single engine call may take before it is abandoned.
    pub engine_timeout_secs: u64,
    /// Largest accepted upload.
    pub max_upload_bytes: usize,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_owned(),
            port: 5000,
            uploads_dir: PathBuf::from("uploads"),
            engine_url: "http://localhost:8000/api".to_owned(),
            engine_timeout_secs: 300,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Server {
    /// The engine base URL, parsed.
    ///
    /// # Errors
    /// Errors if `engine_url` is not an absolute URL.
    pub fn engine_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.engine_url)
            .with_context(|| format!("invalid engine_url '{}'", self.engine_url))
    }

    /// Timeout applied to every engine call.
    #[must_use]
    pub const fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }
}

/// Client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    /// Where the relay is reachable.
    pub backend_url: String,
    /// File holding the client's local storage.
    pub storage_path: PathBuf,
}

impl Default for Client {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".to_owned(),
            storage_path: PathBuf::from("~/.clarity/local_storage.json"),
        }
    }
}

impl Client {
    /// The relay base URL, parsed.
    ///
    /// # Errors
    /// Errors if `backend_url` is not an absolute URL.
    pub fn backend_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.backend_url)
            .with_context(|| format!("invalid backend_url '{}'", self.backend_url))
    }

    /// `storage_path` with `~` expanded.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        expand_home(&self.storage_path)
    }
}

impl Config {
    /// Load the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    /// Errors if the file cannot be read, is not valid TOML or holds an
    /// invalid URL.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at '{}', using defaults", path.display());
            return Ok(Self::default());
        }
        let config_str = read_to_string(path)
            .with_context(|| format!("could not read config at '{}'", path.display()))?;
        let conf: Self = toml::from_str(&config_str)
            .with_context(|| format!("could not parse config at '{}'", path.display()))?;
        conf.validate()?;
        Ok(conf)
    }

    /// Check the values serde cannot check on its own.
    ///
    /// # Errors
    /// Errors on the first invalid URL.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server.engine_url()?;
        self.client.backend_url()?;
        Ok(())
    }
}
