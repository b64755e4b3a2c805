//! Live test requests against a real oneM2M CSE.
//!
//! These are diagnostics for the configuration UI: they perform the same GET
//! or POST a generated client would, once, and report what the server said.
//! Nothing here is used by the generators.
//!
//! Certificate verification is on unless the client is built with
//! [`PassthroughOptions::insecure_tls`], which exists for lab servers with
//! self-signed certificates.

// Internal imports (std, crate)
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::{GenerationConfig, Operation};
use crate::params::{cin_envelope, content_array, payload_fields};

// External imports (alphabetized)
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Header carrying the caller identity on every oneM2M request
pub const ORIGIN_HEADER: &str = "X-M2M-Origin";

/// Content type announcing a content instance (resource type 4)
pub const CIN_CONTENT_TYPE: &str = "application/json;ty=4";

const ACCEPT_JSON: &str = "application/json";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a live request failed
#[derive(Debug, Error)]
pub enum PassthroughError {
    #[error("Request timeout. Server did not respond.")]
    Timeout,

    #[error("Connection error. Could not reach server.")]
    Connect(#[source] reqwest::Error),

    #[error("Test failed: {0}")]
    Other(#[source] reqwest::Error),
}

impl From<reqwest::Error> for PassthroughError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err)
        } else {
            Self::Other(err)
        }
    }
}

/// Outcome of a live request that reached the server
#[derive(Debug, Clone, Serialize)]
pub struct PassthroughResponse {
    /// HTTP status returned by the CSE
    pub status: u16,
    /// Raw response body
    pub body: String,
    /// URL the request was sent to
    pub url: String,
    /// Envelope sent with a POST
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<JsonValue>,
}

/// Client construction options
#[derive(Debug, Clone, Copy)]
pub struct PassthroughOptions {
    pub timeout: Duration,
    /// Skip TLS certificate verification
    pub insecure_tls: bool,
}

impl Default for PassthroughOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            insecure_tls: false,
        }
    }
}

/// HTTP client performing live test requests
#[derive(Debug, Clone)]
pub struct PassthroughClient {
    http: reqwest::Client,
}

impl PassthroughClient {
    pub fn new(options: PassthroughOptions) -> crate::Result<Self> {
        if options.insecure_tls {
            log::warn!("TLS certificate verification is disabled for live test requests");
        }
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.insecure_tls)
            .build()?;
        Ok(Self { http })
    }

    /// Read the latest content instance of the configured container
    pub async fn test_get(
        &self,
        config: &GenerationConfig,
    ) -> Result<PassthroughResponse, PassthroughError> {
        let url = request_url(config, Operation::Get);
        log::debug!("Test GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(ORIGIN_HEADER, &config.origin)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("Test GET {} returned {}", url, status);

        Ok(PassthroughResponse {
            status,
            body,
            url,
            payload: None,
        })
    }

    /// Create one content instance built from the configured parameters
    pub async fn test_post(
        &self,
        config: &GenerationConfig,
    ) -> Result<PassthroughResponse, PassthroughError> {
        let url = request_url(config, Operation::Post);
        let payload = build_payload(config, epoch_secs());
        log::debug!("Test POST {} with {}", url, payload);

        let response = self
            .http
            .post(&url)
            .header(ORIGIN_HEADER, &config.origin)
            .header(CONTENT_TYPE, CIN_CONTENT_TYPE)
            .header(ACCEPT, ACCEPT_JSON)
            .body(payload.to_string())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("Test POST {} returned {}", url, status);

        Ok(PassthroughResponse {
            status,
            body,
            url,
            payload: Some(payload),
        })
    }
}

/// URL for `operation` regardless of the operation stored in the config
fn request_url(config: &GenerationConfig, operation: Operation) -> String {
    format!(
        "{}{}",
        config.base_url(),
        crate::config::resource_path(&config.ae_name, &config.container_name, operation)
    )
}

/// Content instance envelope for a POST at `epoch`
pub fn build_payload(config: &GenerationConfig, epoch: u64) -> JsonValue {
    let fields = payload_fields(&config.parameters);
    cin_envelope(&content_array(epoch, &fields), &config.labels)
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Protocol;
    use crate::params::Parameter;
    use serde_json::json;

    fn config() -> GenerationConfig {
        GenerationConfig {
            cse_url: "127.0.0.1".to_string(),
            port: 1,
            protocol: Protocol::Http,
            ae_name: "AE-SL".to_string(),
            container_name: "SL-VN03-00".to_string(),
            origin: "admin:admin".to_string(),
            operation: Operation::Get,
            parameters: vec![
                Parameter::new("temperature", "float", "25.5"),
                Parameter::new("humidity", "int", "abc"),
            ],
            labels: vec!["lab".to_string()],
            wifi_ssid: String::new(),
            wifi_password: String::new(),
        }
    }

    #[test]
    fn test_request_urls() {
        let config = config();
        assert_eq!(
            request_url(&config, Operation::Get),
            "http://127.0.0.1:1/~/in-cse/in-name/AE-SL/SL-VN03-00/Data/la"
        );
        assert_eq!(
            request_url(&config, Operation::Post),
            "http://127.0.0.1:1/~/in-cse/in-name/AE-SL/SL-VN03-00/Data"
        );
    }

    #[test]
    fn test_payload_matches_generated_shape() {
        let payload = build_payload(&config(), 1_700_000_000);
        assert_eq!(
            payload,
            json!({
                "m2m:cin": {
                    "con": "[1700000000,25.5,0]",
                    "lbl": ["lab"]
                }
            })
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_connect_error() {
        let client = PassthroughClient::new(PassthroughOptions::default()).unwrap();
        let err = client.test_get(&config()).await.unwrap_err();
        assert!(matches!(err, PassthroughError::Connect(_)), "{err:?}");
        assert_eq!(err.to_string(), "Connection error. Could not reach server.");
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_other_error() {
        let mut config = config();
        config.cse_url = "bad host".to_string();
        let client = PassthroughClient::new(PassthroughOptions::default()).unwrap();

        let err = client.test_post(&config).await.unwrap_err();
        assert!(matches!(err, PassthroughError::Other(_)), "{err:?}");
        assert!(err.to_string().starts_with("Test failed: "), "{err}");
    }
}
