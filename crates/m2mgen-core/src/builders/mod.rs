//! Context builders turning a validated configuration into template contexts.
pub mod cpp;
pub mod python;

use crate::config::GenerationConfig;
use crate::emit::Dialect;
use crate::params::{payload_fields, PayloadField};
use crate::platform::{Platform, PlatformProfile, TemplateFamily};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Trait for converting a configuration into a language-specific template context.
pub trait SketchContextBuilder {
    fn build(&self, config: &GenerationConfig, profile: &PlatformProfile)
        -> crate::Result<JsonValue>;
}

pub struct SketchContext;

impl SketchContext {
    /// Build the template context for `platform`
    pub fn for_platform(config: &GenerationConfig, platform: Platform) -> crate::Result<JsonValue> {
        let profile = platform.profile();
        Self::get_builder(profile.family).build(config, profile)
    }

    pub fn get_builder(family: TemplateFamily) -> Box<dyn SketchContextBuilder> {
        match family {
            TemplateFamily::ArduinoHttpClient | TemplateFamily::EspHttpClient => {
                Box::new(cpp::CppSketchContextBuilder)
            }
            TemplateFamily::PythonRequests => Box::new(python::PythonScriptContextBuilder),
        }
    }
}

/// One element of the content array after the epoch
#[derive(Debug, Clone, Serialize)]
pub struct PayloadEntry {
    /// Source expression for the value
    pub expr: String,
    /// Parameter name, safe for a line comment
    pub comment: String,
}

/// Render the named parameters of `config` as payload entries
pub(crate) fn payload_entries(
    config: &GenerationConfig,
    profile: &PlatformProfile,
    dialect: Dialect,
) -> Vec<PayloadEntry> {
    payload_fields(&config.parameters)
        .iter()
        .map(|PayloadField { name, value }| PayloadEntry {
            expr: dialect.payload_value(value, profile.bool_idiom),
            comment: dialect.comment_text(name),
        })
        .collect()
}

/// `[epoch, name1, name2, ...]`, used to annotate the array construction
pub(crate) fn array_shape(entries: &[PayloadEntry]) -> String {
    std::iter::once("epoch")
        .chain(entries.iter().map(|entry| entry.comment.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}
