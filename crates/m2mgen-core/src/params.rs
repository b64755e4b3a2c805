//! Payload parameters and their typed coercion.
//!
//! A [`Parameter`] is one field of the `[epoch, v1, v2, ...]` content array.
//! Coercion into a [`PayloadValue`] happens here once and is shared by every
//! generator and by the live passthrough, so the emitted programs and the
//! test requests always agree on what a default means.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One typed payload field as submitted by the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Field name; entries without one are skipped
    #[serde(default)]
    pub name: Option<String>,

    /// Declared type (`string`, `int`, `float`, `boolean` and their aliases)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Raw default value
    #[serde(default)]
    pub default: Option<JsonValue>,
}

impl Parameter {
    pub fn new(name: &str, kind: &str, default: impl Into<JsonValue>) -> Self {
        Self {
            name: Some(name.to_string()),
            kind: Some(kind.to_string()),
            default: Some(default.into()),
        }
    }

    /// The parameter name, if it is present and not blank
    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }

    pub fn param_type(&self) -> ParamType {
        ParamType::parse(self.kind.as_deref())
    }

    /// Default value rendered as text, the way a form would submit it
    pub fn default_text(&self) -> String {
        match &self.default {
            None | Some(JsonValue::Null) => String::new(),
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Coerce the default into a typed payload value
    pub fn coerce(&self) -> PayloadValue {
        let text = self.default_text();
        let trimmed = text.trim();
        match self.param_type() {
            ParamType::Int => PayloadValue::Int(trimmed.parse().unwrap_or(0)),
            ParamType::Float => PayloadValue::Float(
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .unwrap_or(0.0),
            ),
            ParamType::Bool => PayloadValue::Bool(matches!(
                trimmed.to_lowercase().as_str(),
                "1" | "true" | "yes"
            )),
            ParamType::Text => PayloadValue::Text(text),
        }
    }
}

/// Declared parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Text,
    Int,
    Float,
    Bool,
}

impl ParamType {
    /// Parse a declared type; unknown or missing types are text
    pub fn parse(kind: Option<&str>) -> Self {
        match kind.map(|k| k.trim().to_lowercase()).as_deref() {
            Some("int" | "integer") => Self::Int,
            Some("float" | "decimal") => Self::Float,
            Some("boolean" | "bool") => Self::Bool,
            _ => Self::Text,
        }
    }
}

/// A coerced payload value
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl PayloadValue {
    /// Numeric literal shared by C++ and Python; `None` for text and booleans
    pub fn numeric_literal(&self) -> Option<String> {
        match self {
            Self::Int(i) => Some(i.to_string()),
            // Debug keeps a decimal point or exponent, so the literal stays a float
            Self::Float(f) => Some(format!("{:?}", f)),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(f) => JsonValue::from(*f),
            Self::Bool(b) => JsonValue::from(*b),
            Self::Text(s) => JsonValue::from(s.as_str()),
        }
    }
}

/// A named, coerced payload field
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadField {
    pub name: String,
    pub value: PayloadValue,
}

/// Coerce all named parameters, in order, dropping the unnamed ones
pub fn payload_fields(parameters: &[Parameter]) -> Vec<PayloadField> {
    parameters
        .iter()
        .filter_map(|param| {
            let name = param.field_name()?;
            Some(PayloadField {
                name: name.to_string(),
                value: param.coerce(),
            })
        })
        .collect()
}

/// The content array `[epoch, v1, v2, ...]` as JSON
pub fn content_array(epoch_secs: u64, fields: &[PayloadField]) -> JsonValue {
    let mut values = Vec::with_capacity(fields.len() + 1);
    values.push(JsonValue::from(epoch_secs));
    values.extend(fields.iter().map(|field| field.value.to_json()));
    JsonValue::Array(values)
}

/// The oneM2M content instance envelope carrying `content` as a string.
///
/// `lbl` is only present when there is at least one label.
pub fn cin_envelope(content: &JsonValue, labels: &[String]) -> JsonValue {
    let mut cin = serde_json::Map::new();
    cin.insert("con".to_string(), JsonValue::from(content.to_string()));
    if !labels.is_empty() {
        cin.insert("lbl".to_string(), JsonValue::from(labels.to_vec()));
    }
    let mut envelope = serde_json::Map::new();
    envelope.insert("m2m:cin".to_string(), JsonValue::Object(cin));
    JsonValue::Object(envelope)
}
