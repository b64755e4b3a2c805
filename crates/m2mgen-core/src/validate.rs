//! Validation of client-submitted device configurations.
//!
//! [`validate`] is the single boundary where the invariants generators rely on
//! are established: a bare host name, a numeric port in range, a known
//! protocol, and no loopback host for microcontroller targets. It never
//! touches the network and never mutates its input; the caller receives a
//! normalized [`GenerationConfig`].

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::config::{
    GenerationConfig, Operation, Protocol, RawConfig, WIFI_PASSWORD_PLACEHOLDER,
    WIFI_SSID_PLACEHOLDER,
};
use crate::platform::Platform;

/// Reasons a device configuration is rejected. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("CSE host is required.")]
    MissingHost,

    #[error("CSE host should not include a protocol (enter host only).")]
    SchemeInHost,

    #[error("Port must be an integer.")]
    PortNotInteger,

    #[error("Port must be between 1 and 65535.")]
    PortOutOfRange,

    #[error("Protocol must be either http or https.")]
    UnknownProtocol,

    #[error("Localhost is not allowed for microcontroller targets.")]
    LoopbackHost,
}

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// Validate a raw configuration for the given target platform.
///
/// Rules are checked in order and the first failure is returned.
pub fn validate(
    raw: &RawConfig,
    platform: Platform,
) -> std::result::Result<GenerationConfig, ValidationError> {
    let host = raw.cse_url.as_deref().unwrap_or_default().trim();
    if host.is_empty() {
        return Err(ValidationError::MissingHost);
    }
    if has_scheme(host) {
        return Err(ValidationError::SchemeInHost);
    }

    let port = parse_port(raw.port.as_ref())?;
    let protocol = parse_protocol(raw.protocol.as_deref())?;

    if platform.is_microcontroller() && is_loopback(host) {
        return Err(ValidationError::LoopbackHost);
    }

    Ok(GenerationConfig {
        cse_url: host.to_string(),
        port,
        protocol,
        ae_name: raw.ae_name.clone().unwrap_or_default(),
        container_name: raw.container_name.clone().unwrap_or_default(),
        origin: raw.origin.clone().unwrap_or_default(),
        operation: Operation::parse_lenient(raw.operation.as_deref()),
        parameters: raw.parameters.clone(),
        labels: raw.labels.clone(),
        wifi_ssid: or_placeholder(raw.wifi_ssid.as_deref(), WIFI_SSID_PLACEHOLDER),
        wifi_password: or_placeholder(raw.wifi_password.as_deref(), WIFI_PASSWORD_PLACEHOLDER),
    })
}

fn has_scheme(host: &str) -> bool {
    let lower = host.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn is_loopback(host: &str) -> bool {
    let lower = host.to_lowercase();
    LOOPBACK_HOSTS.contains(&lower.as_str())
}

fn parse_port(value: Option<&JsonValue>) -> std::result::Result<u16, ValidationError> {
    let port = match value {
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(JsonValue::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or(ValidationError::PortNotInteger)?;

    if (1..=65535).contains(&port) {
        Ok(port as u16)
    } else {
        Err(ValidationError::PortOutOfRange)
    }
}

fn parse_protocol(value: Option<&str>) -> std::result::Result<Protocol, ValidationError> {
    match value.unwrap_or("https").to_lowercase().as_str() {
        "http" => Ok(Protocol::Http),
        "https" => Ok(Protocol::Https),
        _ => Err(ValidationError::UnknownProtocol),
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}
