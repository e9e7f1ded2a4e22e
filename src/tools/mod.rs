//! Tool registry and operations
//!
//! The gateway's agent tools are defined once here and exposed through two
//! surfaces: the REST group under `/api/tools` and the MCP server. Both call
//! the same operation functions, so the surfaces cannot drift apart.
//!
//! Tools:
//! - `health_check`: platform/backend detection and gateway status
//! - `list_windows`: enumerate capturable windows
//! - `capture_window`: capture one window selected by title/class/exe
//! - `capture_display`: capture an entire display

use base64::{Engine, engine::general_purpose::STANDARD};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use crate::{
    capture::ImageBuffer,
    error::{CaptureError, CaptureResult},
    model::{
        CaptureDisplayRequest, CaptureOptions, CaptureResponse, CaptureWindowRequest,
        HealthResponse, ImageFormat, Region, WindowInfo,
    },
    state::AppState,
    util::{detect::detect_platform, encode::encode_image},
};

/// Errors from dispatching a tool by name
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// No tool with the requested name exists
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments did not match the tool's input schema
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(serde_json::Error),

    /// The tool ran but its result could not be serialized
    #[error("Failed to serialize tool result: {0}")]
    Serialization(serde_json::Error),

    /// The underlying capture operation failed
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Describes one registered tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Tool name, used for dispatch
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// JSON Schema of the tool's argument object
    pub input_schema: Value,
}

/// Returns the descriptors of every registered tool
pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "health_check",
            description: "Check gateway health and detect platform/backend",
            input_schema: empty_object_schema(),
        },
        ToolDescriptor {
            name: "list_windows",
            description: "List all capturable windows on the system",
            input_schema: empty_object_schema(),
        },
        ToolDescriptor {
            name: "capture_window",
            description: "Capture a screenshot of a window selected by title, class, or executable",
            input_schema: schema_value::<CaptureWindowRequest>(),
        },
        ToolDescriptor {
            name: "capture_display",
            description: "Capture a screenshot of an entire display",
            input_schema: schema_value::<CaptureDisplayRequest>(),
        },
    ]
}

/// Runs a tool by name with untyped JSON arguments
///
/// Used by the REST surface; the MCP surface calls the typed operations
/// directly.
pub async fn dispatch(state: &AppState, name: &str, args: Value) -> Result<Value, ToolError> {
    match name {
        "health_check" => to_result_value(&health(state).await),
        "list_windows" => to_result_value(&list_windows(state).await?),
        "capture_window" => {
            let req: CaptureWindowRequest =
                serde_json::from_value(args).map_err(ToolError::InvalidArguments)?;
            to_result_value(&capture_window(state, &req).await?)
        }
        "capture_display" => {
            let req: CaptureDisplayRequest =
                serde_json::from_value(args).map_err(ToolError::InvalidArguments)?;
            to_result_value(&capture_display(state, &req).await?)
        }
        _ => Err(ToolError::UnknownTool(name.to_string())),
    }
}

/// Reports gateway health along with the detected platform and backend
pub async fn health(_state: &AppState) -> HealthResponse {
    HealthResponse::from_platform(detect_platform())
}

/// Enumerates capturable windows through the backend
pub async fn list_windows(state: &AppState) -> CaptureResult<Vec<WindowInfo>> {
    state.backend.list_windows().await
}

/// Captures a window selected by the request and returns the encoded result
pub async fn capture_window(
    state: &AppState,
    req: &CaptureWindowRequest,
) -> CaptureResult<CaptureResponse> {
    let selector = req.selector();
    if selector.is_empty() {
        return Err(CaptureError::InvalidParameter {
            parameter: "selector".to_string(),
            reason: "at least one of 'title', 'class', or 'exe' must be specified".to_string(),
        });
    }

    let opts = build_options(req.format, req.quality, req.scale, req.include_cursor, req.region)?;

    let handle = state.backend.resolve_target(&selector).await?;
    let image = state.backend.capture_window(handle, &opts).await?;

    finalize_capture(state, image, &opts)
}

/// Captures a display (primary when `display_id` is omitted)
pub async fn capture_display(
    state: &AppState,
    req: &CaptureDisplayRequest,
) -> CaptureResult<CaptureResponse> {
    let opts = build_options(req.format, req.quality, req.scale, req.include_cursor, req.region)?;

    let image = state.backend.capture_display(req.display_id, &opts).await?;

    finalize_capture(state, image, &opts)
}

/// Validates request knobs and assembles capture options with defaults
fn build_options(
    format: ImageFormat,
    quality: Option<u8>,
    scale: Option<f32>,
    include_cursor: Option<bool>,
    region: Option<Region>,
) -> CaptureResult<CaptureOptions> {
    if let Some(quality) = quality {
        if quality > 100 {
            return Err(CaptureError::InvalidParameter {
                parameter: "quality".to_string(),
                reason: format!("value {} exceeds maximum 100", quality),
            });
        }
    }

    if let Some(scale) = scale {
        if !(0.1..=2.0).contains(&scale) {
            return Err(CaptureError::InvalidParameter {
                parameter: "scale".to_string(),
                reason: format!("value {} must be between 0.1 and 2.0", scale),
            });
        }
    }

    if let Some(region) = region {
        if region.width == 0 || region.height == 0 {
            return Err(CaptureError::InvalidParameter {
                parameter: "region".to_string(),
                reason: "width and height must be greater than 0".to_string(),
            });
        }
    }

    Ok(CaptureOptions {
        format,
        quality: quality.unwrap_or(80),
        scale: scale.unwrap_or(1.0),
        include_cursor: include_cursor.unwrap_or(false),
        region,
    })
}

/// Encodes a captured frame, persists it, and builds the response
fn finalize_capture(
    state: &AppState,
    image: ImageBuffer,
    opts: &CaptureOptions,
) -> CaptureResult<CaptureResponse> {
    let (width, height) = image.dimensions();

    let encoded = encode_image(&image, opts)?;
    let (file_path, size_bytes) = state.temp_files.write_image(&encoded, opts.format)?;

    Ok(CaptureResponse {
        image_base64: STANDARD.encode(&encoded),
        mime_type: opts.format.mime_type().to_string(),
        width,
        height,
        size_bytes,
        file_path: file_path.to_string_lossy().into_owned(),
    })
}

fn empty_object_schema() -> Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

fn schema_value<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
}

fn to_result_value<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(ToolError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BackendKind;
    use serde_json::json;

    #[test]
    fn test_descriptors_cover_all_tools() {
        let descriptors = descriptors();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name).collect();

        assert_eq!(
            names,
            vec!["health_check", "list_windows", "capture_window", "capture_display"]
        );
        for descriptor in &descriptors {
            assert!(!descriptor.description.is_empty());
            assert!(descriptor.input_schema.is_object());
        }
    }

    #[tokio::test]
    async fn test_dispatch_health_check() {
        let state = AppState::with_mock();
        let result = dispatch(&state, "health_check", json!({})).await.unwrap();

        assert_eq!(result["ok"], true);
        assert!(result["platform"].is_string());
    }

    #[tokio::test]
    async fn test_dispatch_list_windows() {
        let state = AppState::with_mock();
        let result = dispatch(&state, "list_windows", json!({})).await.unwrap();

        let windows = result.as_array().unwrap();
        assert_eq!(windows.len(), 3);
    }

    #[tokio::test]
    async fn test_dispatch_capture_window() {
        let state = AppState::with_mock();
        let args = json!({ "title": "Firefox", "format": "png", "scale": 0.25 });

        let result = dispatch(&state, "capture_window", args).await.unwrap();

        assert_eq!(result["mime_type"], "image/png");
        assert_eq!(result["width"], 480);
        assert_eq!(result["height"], 270);
        assert!(!result["image_base64"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let state = AppState::with_mock();
        let result = dispatch(&state, "no_such_tool", json!({})).await;

        assert!(matches!(result, Err(ToolError::UnknownTool(_))));
    }

    #[tokio::test]
    async fn test_dispatch_invalid_arguments() {
        let state = AppState::with_mock();
        let args = json!({ "title": 42 });

        let result = dispatch(&state, "capture_window", args).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[tokio::test]
    async fn test_capture_window_requires_selector() {
        let state = AppState::with_mock();
        let req = CaptureWindowRequest::default();

        let result = capture_window(&state, &req).await;
        assert!(matches!(
            result,
            Err(CaptureError::InvalidParameter { ref parameter, .. }) if parameter == "selector"
        ));
    }

    #[tokio::test]
    async fn test_capture_window_rejects_bad_scale() {
        let state = AppState::with_mock();
        let req = CaptureWindowRequest {
            title: Some("Firefox".to_string()),
            scale: Some(9.0),
            ..CaptureWindowRequest::default()
        };

        let result = capture_window(&state, &req).await;
        assert!(matches!(
            result,
            Err(CaptureError::InvalidParameter { ref parameter, .. }) if parameter == "scale"
        ));
    }

    #[tokio::test]
    async fn test_capture_window_rejects_bad_quality() {
        let state = AppState::with_mock();
        let req = CaptureWindowRequest {
            title: Some("Firefox".to_string()),
            quality: Some(101),
            ..CaptureWindowRequest::default()
        };

        let result = capture_window(&state, &req).await;
        assert!(matches!(
            result,
            Err(CaptureError::InvalidParameter { ref parameter, .. }) if parameter == "quality"
        ));
    }

    #[tokio::test]
    async fn test_capture_display_persists_file() {
        let state = AppState::with_mock();
        let req = CaptureDisplayRequest {
            format: ImageFormat::Png,
            scale: Some(0.1),
            ..CaptureDisplayRequest::default()
        };

        let response = capture_display(&state, &req).await.unwrap();

        assert_eq!(response.width, 256);
        assert_eq!(response.height, 144);
        assert!(std::path::Path::new(&response.file_path).exists());
        assert_eq!(state.temp_files.tracked_count(), 1);

        let decoded = STANDARD.decode(&response.image_base64).unwrap();
        assert_eq!(decoded.len() as u64, response.size_bytes);

        state.temp_files.cleanup();
    }

    #[tokio::test]
    async fn test_ops_surface_backend_errors() {
        let backend = crate::capture::MockBackend::new().with_error(|| {
            CaptureError::BackendNotAvailable {
                backend: BackendKind::Mock,
            }
        });
        let state = AppState::new(
            std::sync::Arc::new(backend),
            std::sync::Arc::new(crate::util::temp_files::TempFileManager::new()),
        );

        assert!(list_windows(&state).await.is_err());

        let req = CaptureWindowRequest {
            title: Some("Firefox".to_string()),
            ..CaptureWindowRequest::default()
        };
        assert!(matches!(
            capture_window(&state, &req).await,
            Err(CaptureError::BackendNotAvailable { .. })
        ));
    }
}
