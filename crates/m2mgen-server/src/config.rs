//! Server configuration for the m2mgen web API.
//!
//! The configuration can be loaded from a YAML file, created programmatically,
//! or assembled from command-line arguments; flags given on the command line
//! take precedence over the file.
//!
//! # Examples
//!
//! ```no_run
//! use m2mgen_server::config::ServerConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> m2mgen_core::Result<()> {
//! let mut config = ServerConfig::from_file("m2mgen.yaml").await?;
//! config.port = 8080;
//! assert!(!config.insecure_tls);
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;
use std::time::Duration;

// External imports (alphabetized)
use m2mgen_core::PassthroughOptions;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Configuration for the m2mgen HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Skip TLS certificate verification on live test requests
    #[serde(default)]
    pub insecure_tls: bool,

    /// Timeout of live test requests, in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            insecure_tls: false,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> m2mgen_core::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> m2mgen_core::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Options for the live test client
    pub fn passthrough_options(&self) -> PassthroughOptions {
        PassthroughOptions {
            timeout: Duration::from_secs(self.request_timeout_secs),
            insecure_tls: self.insecure_tls,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout_secs() -> u64 {
    10
}
