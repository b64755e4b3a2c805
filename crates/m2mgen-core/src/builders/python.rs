//! Python script context builder for m2mgen codegen.

use super::{array_shape, payload_entries, PayloadEntry, SketchContextBuilder};
use crate::config::{GenerationConfig, Operation, Protocol};
use crate::emit::Dialect;
use crate::platform::PlatformProfile;
use serde::Serialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Serialize)]
pub struct PythonScriptContext {
    /// `GET` or `POST`
    pub operation: String,
    pub is_get: bool,
    /// Transport description for the header comment
    pub transport: String,
    /// Full target URL, safe for a comment
    pub target_comment: String,
    /// Request URL literal
    pub url: String,
    pub origin: String,
    /// Content array elements after the epoch
    pub values: Vec<PayloadEntry>,
    pub array_shape: String,
    /// Python list literal of labels, empty when there are none
    pub labels: String,
    pub has_labels: bool,
    /// Seconds between requests in the commented-out loop
    pub interval_secs: u32,
}

#[derive(Debug, Clone)]
pub struct PythonScriptContextBuilder;

impl SketchContextBuilder for PythonScriptContextBuilder {
    fn build(
        &self,
        config: &GenerationConfig,
        profile: &PlatformProfile,
    ) -> crate::Result<JsonValue> {
        let dialect = Dialect::Python;
        let is_post = config.operation == Operation::Post;

        let values = if is_post {
            payload_entries(config, profile, dialect)
        } else {
            Vec::new()
        };
        let has_labels = is_post && !config.labels.is_empty();
        let labels = if has_labels {
            let items: Vec<String> = config
                .labels
                .iter()
                .map(|label| dialect.string_literal(label))
                .collect();
            format!("[{}]", items.join(", "))
        } else {
            String::new()
        };

        let transport = match config.protocol {
            Protocol::Https => "HTTPS (TLS, certificate verified)",
            Protocol::Http => "HTTP (plaintext)",
        };

        let context = PythonScriptContext {
            operation: config.operation.as_str().to_string(),
            is_get: !is_post,
            transport: transport.to_string(),
            target_comment: dialect.comment_text(&config.resource_url()),
            url: dialect.string_literal(&config.resource_url()),
            origin: dialect.string_literal(&config.origin),
            array_shape: array_shape(&values),
            values,
            labels,
            has_labels,
            interval_secs: 10,
        };

        Ok(serde_json::to_value(&context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Parameter;
    use crate::platform::Platform;

    fn config(operation: Operation) -> GenerationConfig {
        GenerationConfig {
            cse_url: "onem2m.iiit.ac.in".to_string(),
            port: 443,
            protocol: Protocol::Https,
            ae_name: "AE-SL".to_string(),
            container_name: "SL-VN03-00".to_string(),
            origin: "admin:admin".to_string(),
            operation,
            parameters: vec![
                Parameter::new("humidity", "int", "60"),
                Parameter::new("online", "bool", "false"),
                Parameter::new("note", "text", "it's \"fine\""),
            ],
            labels: vec!["a".to_string(), "b".to_string()],
            wifi_ssid: String::new(),
            wifi_password: String::new(),
        }
    }

    #[test]
    fn test_post_context() {
        let ctx = PythonScriptContextBuilder
            .build(&config(Operation::Post), Platform::Python.profile())
            .unwrap();
        assert_eq!(
            ctx["url"],
            "\"https://onem2m.iiit.ac.in:443/~/in-cse/in-name/AE-SL/SL-VN03-00/Data\""
        );
        assert_eq!(ctx["values"][0]["expr"], "60");
        assert_eq!(ctx["values"][1]["expr"], "False");
        assert_eq!(ctx["values"][2]["expr"], "\"it's \\\"fine\\\"\"");
        assert_eq!(ctx["labels"], "[\"a\", \"b\"]");
        assert_eq!(ctx["has_labels"], true);
    }

    #[test]
    fn test_get_context() {
        let ctx = PythonScriptContextBuilder
            .build(&config(Operation::Get), Platform::Python.profile())
            .unwrap();
        assert_eq!(ctx["is_get"], true);
        assert_eq!(ctx["has_labels"], false);
        assert!(ctx["values"].as_array().unwrap().is_empty());
        assert!(ctx["url"].as_str().unwrap().ends_with("/Data/la\""));
    }
}
