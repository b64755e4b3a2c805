//! Arduino C++ sketch context builder for m2mgen codegen.

use super::{array_shape, payload_entries, PayloadEntry, SketchContextBuilder};
use crate::config::{GenerationConfig, Operation};
use crate::emit::Dialect;
use crate::error::Error;
use crate::platform::PlatformProfile;
use serde::Serialize;
use serde_json::Value as JsonValue;

// Context shared by the ArduinoHttpClient and ESP HTTPClient sketches
#[derive(Debug, Clone, Serialize)]
pub struct CppSketchContext {
    /// Board name for the banner comment
    pub board: String,
    /// `GET` or `POST`
    pub operation: String,
    pub is_get: bool,
    /// `HTTP` or `HTTPS`
    pub protocol_upper: String,
    /// Full target URL, safe for a block comment
    pub target_comment: String,
    /// Headers to include, in order
    pub includes: Vec<String>,
    pub ssid: String,
    pub password: String,
    /// Host literal (ArduinoHttpClient connects by host and port)
    pub host: String,
    pub port: u16,
    /// `{protocol}://{host}:{port}` literal (HTTPClient takes a URL)
    pub server_url: String,
    pub resource_path: String,
    pub origin: String,
    /// Client type implementing the selected transport
    pub client_type: String,
    /// Whether the TLS client variant is in use
    pub tls: bool,
    pub baud_rate: u32,
    pub interval_ms: u32,
    /// Content array elements after the epoch
    pub values: Vec<PayloadEntry>,
    /// `epoch, name1, ...` for the array comment
    pub array_shape: String,
    /// Label literals; empty means no `lbl` field
    pub labels: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CppSketchContextBuilder;

impl SketchContextBuilder for CppSketchContextBuilder {
    fn build(
        &self,
        config: &GenerationConfig,
        profile: &PlatformProfile,
    ) -> crate::Result<JsonValue> {
        let dialect = Dialect::Cpp;
        let tls = config.protocol.is_tls();
        let sketch = profile.sketch.ok_or_else(|| {
            Error::config(format!("{} has no sketch profile", profile.display_name))
        })?;

        let mut includes: Vec<String> = sketch.includes.iter().map(|s| s.to_string()).collect();
        if tls {
            includes.extend(sketch.tls_includes.iter().map(|s| s.to_string()));
        }

        let (values, labels) = match config.operation {
            Operation::Post => (
                payload_entries(config, profile, dialect),
                config
                    .labels
                    .iter()
                    .map(|label| dialect.string_literal(label))
                    .collect(),
            ),
            Operation::Get => (Vec::new(), Vec::new()),
        };

        let context = CppSketchContext {
            board: profile.display_name.to_string(),
            operation: config.operation.as_str().to_string(),
            is_get: config.operation == Operation::Get,
            protocol_upper: config.protocol.as_str().to_uppercase(),
            target_comment: dialect.comment_text(&config.resource_url()),
            includes,
            ssid: dialect.string_literal(&config.wifi_ssid),
            password: dialect.string_literal(&config.wifi_password),
            host: dialect.string_literal(&config.cse_url),
            port: config.port,
            server_url: dialect.string_literal(&config.base_url()),
            resource_path: dialect.string_literal(&config.resource_path()),
            origin: dialect.string_literal(&config.origin),
            client_type: sketch.client_type(config.protocol).to_string(),
            tls,
            baud_rate: sketch.baud_rate,
            interval_ms: profile.interval_ms.unwrap_or(10_000),
            array_shape: array_shape(&values),
            values,
            labels,
        };

        Ok(serde_json::to_value(&context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Protocol;
    use crate::params::Parameter;
    use crate::platform::Platform;

    fn config(operation: Operation, protocol: Protocol) -> GenerationConfig {
        GenerationConfig {
            cse_url: "onem2m.iiit.ac.in".to_string(),
            port: 443,
            protocol,
            ae_name: "AE-SL".to_string(),
            container_name: "SL-VN03-00".to_string(),
            origin: "admin:admin".to_string(),
            operation,
            parameters: vec![
                Parameter::new("temperature", "float", "25.5"),
                Parameter::new("online", "bool", "yes"),
            ],
            labels: vec!["AE-SL".to_string()],
            wifi_ssid: "lab \"2.4\"".to_string(),
            wifi_password: "YOUR_WIFI_PASSWORD".to_string(),
        }
    }

    #[test]
    fn test_post_context() {
        let ctx = CppSketchContextBuilder
            .build(
                &config(Operation::Post, Protocol::Https),
                Platform::Esp32.profile(),
            )
            .unwrap();
        assert_eq!(ctx["is_get"], false);
        assert_eq!(ctx["tls"], true);
        assert_eq!(ctx["client_type"], "WiFiClientSecure");
        assert_eq!(ctx["resource_path"], "\"/~/in-cse/in-name/AE-SL/SL-VN03-00/Data\"");
        assert_eq!(ctx["ssid"], "\"lab \\\"2.4\\\"\"");
        assert_eq!(ctx["values"][0]["expr"], "25.5");
        assert_eq!(ctx["values"][1]["expr"], "true");
        assert_eq!(ctx["array_shape"], "epoch, temperature, online");
        assert_eq!(ctx["labels"][0], "\"AE-SL\"");
        assert_eq!(
            ctx["includes"].as_array().unwrap().last().unwrap(),
            "WiFiClientSecure.h"
        );
    }

    #[test]
    fn test_get_context_has_no_payload() {
        let ctx = CppSketchContextBuilder
            .build(
                &config(Operation::Get, Protocol::Http),
                Platform::ArduinoNano.profile(),
            )
            .unwrap();
        assert_eq!(ctx["is_get"], true);
        assert_eq!(ctx["tls"], false);
        assert_eq!(ctx["client_type"], "WiFiClient");
        assert!(ctx["values"].as_array().unwrap().is_empty());
        assert!(ctx["labels"].as_array().unwrap().is_empty());
        assert_eq!(
            ctx["resource_path"],
            "\"/~/in-cse/in-name/AE-SL/SL-VN03-00/Data/la\""
        );
    }

    #[test]
    fn test_nano_bools_are_numeric() {
        let ctx = CppSketchContextBuilder
            .build(
                &config(Operation::Post, Protocol::Https),
                Platform::ArduinoNano.profile(),
            )
            .unwrap();
        assert_eq!(ctx["values"][1]["expr"], "1");
        assert_eq!(ctx["client_type"], "WiFiSSLClient");
    }

    #[test]
    fn test_profile_without_sketch_is_rejected() {
        let err = CppSketchContextBuilder
            .build(
                &config(Operation::Get, Protocol::Http),
                Platform::Python.profile(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("Python has no sketch profile"));
    }
}
