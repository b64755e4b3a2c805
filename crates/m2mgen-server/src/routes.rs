//! Request handlers for the m2mgen web API.

// Internal imports (std, crate)
use std::sync::Arc;

use crate::error::ApiError;

// External imports (alphabetized)
use axum::{
    body::Bytes,
    extract::{Json, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use m2mgen_core::{
    generate, validate, GeneratedCode, GenerationConfig, PassthroughClient, PassthroughResponse,
    Platform, RawConfig,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub passthrough: Arc<PassthroughClient>,
}

impl AppState {
    pub fn new(passthrough: PassthroughClient) -> Self {
        Self {
            passthrough: Arc::new(passthrough),
        }
    }
}

/// Body of `POST /generate`
#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    controller: Option<String>,
    #[serde(flatten)]
    config: RawConfig,
}

/// Body of `POST /download`
#[derive(Debug, Deserialize)]
struct DownloadRequest {
    #[serde(default)]
    code: String,
    #[serde(default = "default_download_name")]
    filename: String,
}

fn default_download_name() -> String {
    "code.txt".to_string()
}

#[derive(Debug, Serialize)]
struct ControllerInfo {
    id: Platform,
    name: &'static str,
    filename: &'static str,
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate_code))
        .route("/download", post(download))
        .route("/test-get", post(test_get))
        .route("/test-post", post(test_post))
        .route("/controllers", get(controllers))
        .route("/health", get(health))
        .with_state(state)
}

/// Parse a JSON request body; an empty body reads as `{}`
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let parsed = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(json!({}))
    } else {
        serde_json::from_slice(body)
    };
    parsed.map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))
}

async fn generate_code(body: Bytes) -> Result<Json<GeneratedCode>, ApiError> {
    let request: GenerateRequest = parse_body(&body)?;
    log::debug!(
        "Generate request for controller {:?}",
        request.controller.as_deref()
    );

    let platform: Platform = request
        .controller
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid controller"))?;

    let config = validate(&request.config, platform).map_err(|e| {
        log::debug!("Validation failed: {}", e);
        ApiError::from(e)
    })?;

    let generated = generate(&config, platform).map_err(|e| {
        log::error!("Failed to generate {} code: {}", platform, e);
        ApiError::internal(format!("Failed to generate code: {e}"))
    })?;
    log::info!(
        "Generated {} for {} ({} bytes)",
        generated.filename,
        platform,
        generated.code.len()
    );

    Ok(Json(generated))
}

async fn download(body: Bytes) -> Result<Response, ApiError> {
    let request: DownloadRequest = parse_body(&body)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        attachment_name(&request.filename)
    );

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, request.code).into_response())
}

/// Restrict a client-supplied file name to characters safe in a header
fn attachment_name(requested: &str) -> String {
    let cleaned: String = requested
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(|c| c == '.' || c == ' ').is_empty() {
        default_download_name()
    } else {
        cleaned
    }
}

/// Validate a live test request; the CSE host rules are those of the Python target
fn live_test_config(body: &[u8]) -> Result<GenerationConfig, ApiError> {
    let raw: RawConfig = parse_body(body)?;
    Ok(validate(&raw, Platform::Python)?)
}

fn test_result(result: PassthroughResponse) -> Json<JsonValue> {
    let mut body = json!({
        "success": true,
        "status_code": result.status,
        "response": result.body,
        "url": result.url,
    });
    if let Some(payload) = result.payload {
        body["payload"] = payload;
    }
    Json(body)
}

async fn test_get(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JsonValue>, ApiError> {
    let config = live_test_config(&body)?;
    let result = state.passthrough.test_get(&config).await.map_err(|e| {
        log::warn!("Test GET against {} failed: {}", config.base_url(), e);
        ApiError::from(e)
    })?;
    Ok(test_result(result))
}

async fn test_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JsonValue>, ApiError> {
    let config = live_test_config(&body)?;
    let result = state.passthrough.test_post(&config).await.map_err(|e| {
        log::warn!("Test POST against {} failed: {}", config.base_url(), e);
        ApiError::from(e)
    })?;
    Ok(test_result(result))
}

async fn controllers() -> Json<Vec<ControllerInfo>> {
    let list = Platform::all()
        .map(|platform| {
            let profile = platform.profile();
            ControllerInfo {
                id: platform,
                name: profile.display_name,
                filename: profile.filename,
            }
        })
        .collect();
    Json(list)
}

async fn health() -> Json<JsonValue> {
    Json(json!({ "status": "ok" }))
}
