//! Code generation functionality for m2mgen

use serde::{Deserialize, Serialize};

use crate::{
    builders::SketchContext, config::GenerationConfig, error::Result, platform::Platform,
    templates::TemplateManager,
};

/// A generated client program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Program source text
    pub code: String,
    /// Suggested file name
    pub filename: String,
    /// Platform the program targets
    #[serde(rename = "controller")]
    pub platform: Platform,
}

/// Generates a oneM2M client program for a target platform.
///
/// This is the main entry point for m2mgen's code generation. It builds the
/// platform's template context from an already validated configuration and
/// renders the matching embedded template. Output is deterministic: the same
/// configuration always yields byte-identical source.
///
/// # Arguments
/// * `config` - Validated configuration (see [`crate::validate::validate`])
/// * `platform` - Target platform selecting the template and rendering profile
///
/// # Errors
/// Only fails if a template cannot be rendered, which indicates a bug in the
/// embedded templates rather than a problem with the configuration.
///
/// # Examples
/// ```
/// use m2mgen_core::{config::RawConfig, generate, platform::Platform, validate::validate};
/// use serde_json::json;
///
/// # fn main() -> m2mgen_core::Result<()> {
/// let raw: RawConfig = serde_json::from_value(json!({
///     "cse_url": "onem2m.iiit.ac.in",
///     "port": 443,
///     "ae_name": "AE-SL",
///     "container_name": "SL-VN03-00",
///     "origin": "admin:admin",
///     "operation": "GET",
/// }))?;
/// let config = validate(&raw, Platform::Python)?;
/// let generated = generate(&config, Platform::Python)?;
/// assert_eq!(generated.filename, "onem2m_client.py");
/// assert!(generated.code.contains("/Data/la"));
/// # Ok(())
/// # }
/// ```
pub fn generate(config: &GenerationConfig, platform: Platform) -> Result<GeneratedCode> {
    let profile = platform.profile();
    log::debug!(
        "Generating {} {} client for {}",
        platform,
        config.operation,
        config.base_url()
    );

    // 1. Build the platform context (escaping happens here)
    let context = SketchContext::for_platform(config, platform)?;

    // 2. Render the family template
    let code = TemplateManager::shared()?.render(profile.family, &context)?;

    Ok(GeneratedCode {
        code,
        filename: profile.filename.to_string(),
        platform,
    })
}
