//! Target platform definitions for m2mgen.
//!
//! Every generator is selected by a [`Platform`]. Each platform carries a
//! [`PlatformProfile`], the small rendering description that the shared
//! generator fills in: which headers to include, which client types implement
//! plaintext and TLS transport, how booleans are spelled and which file name
//! the emitted program should be saved under.
//!
//! # Examples
//!
//! ```
//! use m2mgen_core::platform::Platform;
//! use std::str::FromStr;
//!
//! let platform = Platform::from_str("esp32").unwrap();
//! assert_eq!(platform, Platform::Esp32);
//! assert_eq!(platform.as_str(), "esp32");
//! assert!(platform.is_microcontroller());
//! assert_eq!(platform.profile().filename, "onem2m_client.ino");
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

use crate::config::Protocol;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Supported target platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Arduino Nano 33 IoT (WiFiNINA + ArduinoHttpClient)
    ArduinoNano,
    /// Espressif ESP32 (WiFi + HTTPClient)
    Esp32,
    /// Espressif ESP8266 (ESP8266WiFi + ESP8266HTTPClient)
    Esp8266,
    /// Python script using `requests`
    Python,
}

/// Template family a platform renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFamily {
    /// Sketch built on ArduinoHttpClient's `HttpClient`
    ArduinoHttpClient,
    /// Sketch built on the Espressif `HTTPClient` class
    EspHttpClient,
    /// Standalone Python script
    PythonRequests,
}

impl TemplateFamily {
    /// Name of the template registered for this family
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::ArduinoHttpClient => "arduino_http_client.ino",
            Self::EspHttpClient => "esp_http_client.ino",
            Self::PythonRequests => "python_requests.py",
        }
    }
}

/// How a platform spells boolean payload values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolIdiom {
    pub true_literal: &'static str,
    pub false_literal: &'static str,
}

/// Rendering description of one target platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Human readable board name used in file banners
    pub display_name: &'static str,
    /// Template family rendering this platform
    pub family: TemplateFamily,
    /// Board specifics, `None` for the Python script
    pub sketch: Option<SketchProfile>,
    /// Boolean payload spelling
    pub bool_idiom: BoolIdiom,
    /// Delay between repeated requests, `None` for one-shot programs
    pub interval_ms: Option<u32>,
    /// Suggested file name for the emitted program
    pub filename: &'static str,
}

/// Headers, client types and serial settings of an Arduino-style sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SketchProfile {
    /// Headers included by every sketch, in order
    pub includes: &'static [&'static str],
    /// Extra headers needed by the TLS client
    pub tls_includes: &'static [&'static str],
    /// Client type for plaintext HTTP
    pub plain_client: &'static str,
    /// Client type for HTTPS
    pub tls_client: &'static str,
    /// Serial baud rate
    pub baud_rate: u32,
}

impl SketchProfile {
    /// Client type matching the configured transport
    pub fn client_type(&self, protocol: Protocol) -> &'static str {
        match protocol {
            Protocol::Https => self.tls_client,
            Protocol::Http => self.plain_client,
        }
    }
}

const SKETCH_FILENAME: &str = "onem2m_client.ino";
const SCRIPT_FILENAME: &str = "onem2m_client.py";
const SERIAL_BAUD: u32 = 115_200;

const C_NUMERIC_BOOLS: BoolIdiom = BoolIdiom {
    true_literal: "1",
    false_literal: "0",
};

const CPP_BOOLS: BoolIdiom = BoolIdiom {
    true_literal: "true",
    false_literal: "false",
};

const PYTHON_BOOLS: BoolIdiom = BoolIdiom {
    true_literal: "True",
    false_literal: "False",
};

const ARDUINO_NANO: PlatformProfile = PlatformProfile {
    display_name: "Arduino Nano 33 IoT",
    family: TemplateFamily::ArduinoHttpClient,
    sketch: Some(SketchProfile {
        includes: &["WiFiNINA.h", "ArduinoHttpClient.h", "ArduinoJson.h"],
        tls_includes: &[],
        plain_client: "WiFiClient",
        tls_client: "WiFiSSLClient",
        baud_rate: SERIAL_BAUD,
    }),
    bool_idiom: C_NUMERIC_BOOLS,
    interval_ms: Some(10_000),
    filename: SKETCH_FILENAME,
};

const ESP32: PlatformProfile = PlatformProfile {
    display_name: "ESP32",
    family: TemplateFamily::EspHttpClient,
    sketch: Some(SketchProfile {
        includes: &["WiFi.h", "HTTPClient.h", "ArduinoJson.h", "time.h"],
        tls_includes: &["WiFiClientSecure.h"],
        plain_client: "WiFiClient",
        tls_client: "WiFiClientSecure",
        baud_rate: SERIAL_BAUD,
    }),
    bool_idiom: CPP_BOOLS,
    interval_ms: Some(10_000),
    filename: SKETCH_FILENAME,
};

const ESP8266: PlatformProfile = PlatformProfile {
    display_name: "ESP8266",
    family: TemplateFamily::EspHttpClient,
    sketch: Some(SketchProfile {
        includes: &[
            "ESP8266WiFi.h",
            "ESP8266HTTPClient.h",
            "ArduinoJson.h",
            "time.h",
        ],
        tls_includes: &["WiFiClientSecureBearSSL.h"],
        plain_client: "WiFiClient",
        tls_client: "BearSSL::WiFiClientSecure",
        baud_rate: SERIAL_BAUD,
    }),
    bool_idiom: CPP_BOOLS,
    interval_ms: Some(10_000),
    filename: SKETCH_FILENAME,
};

const PYTHON: PlatformProfile = PlatformProfile {
    display_name: "Python",
    family: TemplateFamily::PythonRequests,
    sketch: None,
    bool_idiom: PYTHON_BOOLS,
    interval_ms: None,
    filename: SCRIPT_FILENAME,
};

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arduino_nano" => Ok(Platform::ArduinoNano),
            "esp32" => Ok(Platform::Esp32),
            "esp8266" => Ok(Platform::Esp8266),
            "python" => Ok(Platform::Python),
            _ => Err(format!("Unknown controller: {}", s)),
        }
    }
}

impl Platform {
    /// Returns the controller identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArduinoNano => "arduino_nano",
            Self::Esp32 => "esp32",
            Self::Esp8266 => "esp8266",
            Self::Python => "python",
        }
    }

    /// Returns an iterator over all supported platforms
    pub fn all() -> impl Iterator<Item = Self> {
        use Platform::*;
        [ArduinoNano, Esp32, Esp8266, Python].iter().copied()
    }

    /// Whether the platform is a Wi-Fi microcontroller
    pub fn is_microcontroller(&self) -> bool {
        !matches!(self, Self::Python)
    }

    /// Rendering description for this platform
    pub fn profile(&self) -> &'static PlatformProfile {
        match self {
            Self::ArduinoNano => &ARDUINO_NANO,
            Self::Esp32 => &ESP32,
            Self::Esp8266 => &ESP8266,
            Self::Python => &PYTHON,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_as_str() {
        assert_eq!(Platform::ArduinoNano.as_str(), "arduino_nano");
        assert_eq!(Platform::Esp32.as_str(), "esp32");
        assert_eq!(Platform::Esp8266.as_str(), "esp8266");
        assert_eq!(Platform::Python.as_str(), "python");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "arduino_nano".parse::<Platform>().unwrap(),
            Platform::ArduinoNano
        );
        assert_eq!("esp32".parse::<Platform>().unwrap(), Platform::Esp32);
        assert_eq!("esp8266".parse::<Platform>().unwrap(), Platform::Esp8266);
        assert_eq!("python".parse::<Platform>().unwrap(), Platform::Python);

        assert!("arduino_uno".parse::<Platform>().is_err());
        assert!("".parse::<Platform>().is_err());
    }

    #[test]
    fn test_from_str_requires_exact_ids() {
        for id in ["ESP32", " esp8266 ", "Python", "arduino_nano\n"] {
            assert!(id.parse::<Platform>().is_err(), "{id:?} accepted");
        }
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for platform in Platform::all() {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform.as_str()));
        }
    }

    #[test]
    fn test_all() {
        let unique: HashSet<_> = Platform::all().collect();
        assert_eq!(unique.len(), 4);
        assert_eq!(
            Platform::all().filter(Platform::is_microcontroller).count(),
            3
        );
    }

    #[test]
    fn test_filenames() {
        assert_eq!(Platform::ArduinoNano.profile().filename, "onem2m_client.ino");
        assert_eq!(Platform::Esp32.profile().filename, "onem2m_client.ino");
        assert_eq!(Platform::Esp8266.profile().filename, "onem2m_client.ino");
        assert_eq!(Platform::Python.profile().filename, "onem2m_client.py");
    }

    #[test]
    fn test_client_type_follows_protocol() {
        let nano = Platform::ArduinoNano.profile().sketch.unwrap();
        assert_eq!(nano.client_type(Protocol::Https), "WiFiSSLClient");
        assert_eq!(nano.client_type(Protocol::Http), "WiFiClient");

        let esp8266 = Platform::Esp8266.profile().sketch.unwrap();
        assert_eq!(
            esp8266.client_type(Protocol::Https),
            "BearSSL::WiFiClientSecure"
        );
    }

    #[test]
    fn test_only_microcontrollers_have_sketch_profiles() {
        for platform in Platform::all() {
            let profile = platform.profile();
            assert_eq!(
                profile.sketch.is_some(),
                platform.is_microcontroller(),
                "{platform}"
            );
            assert_eq!(
                profile.interval_ms.is_some(),
                platform.is_microcontroller(),
                "{platform}"
            );
        }
    }
}
