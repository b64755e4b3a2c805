//! Template system for code generation

// Internal imports (std, crate)
use std::sync::Arc;

use crate::{error::Result, platform::TemplateFamily};

// External imports (alphabetized)
use once_cell::sync::OnceCell;
use serde_json::Value as JsonValue;
use tera::{Context, Tera};

/// Template sources compiled into the binary, keyed by registered name
const EMBEDDED_TEMPLATES: [(&str, &str); 3] = [
    (
        "arduino_http_client.ino",
        include_str!("../../templates/arduino_http_client.ino.tera"),
    ),
    (
        "esp_http_client.ino",
        include_str!("../../templates/esp_http_client.ino.tera"),
    ),
    (
        "python_requests.py",
        include_str!("../../templates/python_requests.py.tera"),
    ),
];

static SHARED: OnceCell<TemplateManager> = OnceCell::new();

/// Manages loading and rendering of the embedded sketch templates
#[derive(Debug, Clone)]
pub struct TemplateManager {
    /// Cached Tera template engine instance
    tera: Arc<Tera>,
}

impl TemplateManager {
    /// Parse the embedded templates into a fresh engine
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        // Emitted sources are not markup; escaping is done by the dialects
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(EMBEDDED_TEMPLATES.to_vec())?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Process-wide manager, parsed on first use
    pub fn shared() -> Result<&'static Self> {
        SHARED.get_or_try_init(Self::new)
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    /// List all registered template names
    pub fn list_templates(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(String::from).collect();
        names.sort();
        names
    }

    /// Render the template of `family` with a JSON object context
    pub fn render(&self, family: TemplateFamily, context: &JsonValue) -> Result<String> {
        let template_name = family.template_name();

        let context_map = context.as_object().ok_or_else(|| {
            crate::error::Error::template("Context must be a JSON object".to_string())
        })?;

        let mut tera_context = Context::new();
        for (k, v) in context_map {
            tera_context.insert(k, v);
        }

        log::debug!("Rendering template: {}", template_name);
        match self.tera.render(template_name, &tera_context) {
            Ok(content) => {
                log::debug!(
                    "Rendered {} ({} bytes)",
                    template_name,
                    content.len()
                );
                Ok(content)
            }
            Err(e) => {
                log::error!("Template rendering failed for '{}': {}", template_name, e);
                log::error!(
                    "Available context keys: {:?}",
                    context_map.keys().collect::<Vec<_>>()
                );
                Err(crate::error::Error::template(format!(
                    "Failed to render template '{}': {}",
                    template_name, e
                )))
            }
        }
    }
}
