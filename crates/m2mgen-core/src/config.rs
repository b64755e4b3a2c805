//! Device configuration for m2mgen code generation.
//!
//! Two shapes live here. [`RawConfig`] is what a client submits: every field
//! is optional and loosely typed, exactly as it arrives from a form or a
//! configuration file. [`GenerationConfig`] is the normalized copy produced by
//! [`crate::validate::validate`], and it is the only input generators accept.
//!
//! # Examples
//!
//! ```no_run
//! use m2mgen_core::{config::RawConfig, platform::Platform, validate::validate};
//!
//! # #[tokio::main]
//! # async fn main() -> m2mgen_core::Result<()> {
//! let raw = RawConfig::from_file("device.yaml").await?;
//! let config = validate(&raw, Platform::Esp32)?;
//! println!("posting to {}", config.base_url());
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::path::Path;

use crate::params::Parameter;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tokio::fs;

/// Placeholder embedded when no Wi-Fi network name was supplied
pub const WIFI_SSID_PLACEHOLDER: &str = "YOUR_WIFI_SSID";

/// Placeholder embedded when no Wi-Fi password was supplied
pub const WIFI_PASSWORD_PLACEHOLDER: &str = "YOUR_WIFI_PASSWORD";

/// Client-submitted device configuration, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// CSE host name, without scheme
    #[serde(default)]
    pub cse_url: Option<String>,

    /// Port as submitted: a number or a numeric string
    #[serde(default)]
    pub port: Option<JsonValue>,

    /// `http` or `https`, defaults to `https`
    #[serde(default)]
    pub protocol: Option<String>,

    /// Application entity path segment
    #[serde(default)]
    pub ae_name: Option<String>,

    /// Container path segment
    #[serde(default)]
    pub container_name: Option<String>,

    /// Value of the `X-M2M-Origin` header
    #[serde(default)]
    pub origin: Option<String>,

    /// `GET` or `POST`
    #[serde(default)]
    pub operation: Option<String>,

    /// Payload fields, in array order
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Content instance labels
    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub wifi_ssid: Option<String>,

    #[serde(default)]
    pub wifi_password: Option<String>,
}

impl RawConfig {
    /// Load a device configuration from a YAML or JSON file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Save the configuration to a file, picking the format by extension
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content).await?;
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Transport protocol of the CSE endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// URL scheme
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Whether the transport is encrypted
    pub fn is_tls(&self) -> bool {
        matches!(self, Self::Https)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation performed by the generated client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// Read the latest content instance
    Get,
    /// Create a content instance
    Post,
}

impl Operation {
    /// Parse a submitted operation. `GET` (any case) reads, everything else posts.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(op) if op.eq_ignore_ascii_case("get") => Self::Get,
            _ => Self::Post,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, normalized configuration consumed by the generators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub cse_url: String,
    pub port: u16,
    pub protocol: Protocol,
    pub ae_name: String,
    pub container_name: String,
    pub origin: String,
    pub operation: Operation,
    pub parameters: Vec<Parameter>,
    pub labels: Vec<String>,
    pub wifi_ssid: String,
    pub wifi_password: String,
}

impl GenerationConfig {
    /// `{protocol}://{host}:{port}`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.cse_url, self.port)
    }

    /// Resource path for the configured operation
    pub fn resource_path(&self) -> String {
        resource_path(&self.ae_name, &self.container_name, self.operation)
    }

    /// Full request URL for the configured operation
    pub fn resource_url(&self) -> String {
        format!("{}{}", self.base_url(), self.resource_path())
    }
}

/// Build the oneM2M resource path for an application entity and container.
///
/// Reads target the latest content instance (`/Data/la`), writes target the
/// `Data` container itself.
pub fn resource_path(ae_name: &str, container_name: &str, operation: Operation) -> String {
    let container = format!("/~/in-cse/in-name/{}/{}/Data", ae_name, container_name);
    match operation {
        Operation::Get => container + "/la",
        Operation::Post => container,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_resource_path() {
        assert_eq!(
            resource_path("AE-SL", "SL-VN03-00", Operation::Get),
            "/~/in-cse/in-name/AE-SL/SL-VN03-00/Data/la"
        );
        assert_eq!(
            resource_path("AE-SL", "SL-VN03-00", Operation::Post),
            "/~/in-cse/in-name/AE-SL/SL-VN03-00/Data"
        );
    }

    #[test]
    fn test_operation_parse_lenient() {
        assert_eq!(Operation::parse_lenient(Some("GET")), Operation::Get);
        assert_eq!(Operation::parse_lenient(Some(" get ")), Operation::Get);
        assert_eq!(Operation::parse_lenient(Some("post")), Operation::Post);
        assert_eq!(Operation::parse_lenient(Some("PUT")), Operation::Post);
        assert_eq!(Operation::parse_lenient(None), Operation::Post);
    }

    #[test]
    fn test_raw_config_accepts_string_or_number_port() {
        let raw: RawConfig =
            serde_json::from_value(json!({ "cse_url": "host", "port": "443" })).unwrap();
        assert_eq!(raw.port, Some(json!("443")));

        let raw: RawConfig =
            serde_json::from_value(json!({ "cse_url": "host", "port": 8080 })).unwrap();
        assert_eq!(raw.port, Some(json!(8080)));
        assert!(raw.parameters.is_empty());
        assert!(raw.labels.is_empty());
    }

    #[tokio::test]
    async fn test_config_roundtrip() -> crate::Result<()> {
        let dir = tempdir()?;
        let raw = RawConfig {
            cse_url: Some("onem2m.example.org".to_string()),
            port: Some(json!(443)),
            ae_name: Some("AE-SL".to_string()),
            labels: vec!["node-1".to_string()],
            ..Default::default()
        };

        for name in ["device.yaml", "device.json"] {
            let path = dir.path().join(name);
            raw.save(&path).await?;
            let loaded = RawConfig::from_file(&path).await?;
            assert_eq!(loaded.cse_url.as_deref(), Some("onem2m.example.org"));
            assert_eq!(loaded.port, Some(json!(443)));
            assert_eq!(loaded.ae_name.as_deref(), Some("AE-SL"));
            assert_eq!(loaded.labels, vec!["node-1".to_string()]);
            assert!(loaded.protocol.is_none());
        }

        Ok(())
    }
}
