//! Data models and type definitions for agent-gateway
//!
//! This module defines the core types shared by the REST and MCP surfaces:
//! - Platform and backend detection types
//! - Window enumeration and selection types
//! - Capture options and capture request/response structures

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Represents the display backend type for the current platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// No backend detected or not yet initialized
    None,
    /// Wayland display server (Linux)
    Wayland,
    /// X11 display server (Linux)
    X11,
    /// Windows Graphics Capture API
    Windows,
    /// macOS ScreenCaptureKit
    #[serde(rename = "macos")]
    MacOS,
    /// Synthetic backend used for development and tests
    Mock,
}

impl BackendKind {
    /// Returns the backend kind as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::None => "none",
            BackendKind::Wayland => "wayland",
            BackendKind::X11 => "x11",
            BackendKind::Windows => "windows",
            BackendKind::MacOS => "macos",
            BackendKind::Mock => "mock",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Platform information including OS and display backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlatformInfo {
    /// Operating system name (e.g., "linux", "windows", "macos")
    pub os: String,
    /// Detected display backend
    pub backend: BackendKind,
}

impl PlatformInfo {
    pub fn new(os: String, backend: BackendKind) -> Self {
        Self { os, backend }
    }
}

/// Response structure for the health_check tool and health endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// Platform/OS name
    pub platform: String,
    /// Backend type as a string
    pub backend: String,
    /// Whether the gateway is functioning correctly
    pub ok: bool,
}

impl HealthResponse {
    /// Creates a successful health response from platform info
    pub fn from_platform(info: PlatformInfo) -> Self {
        Self {
            platform: info.os,
            backend: info.backend.as_str().to_string(),
            ok: true,
        }
    }
}

/// Output image format for capture operations
///
/// Defaults to `Webp` for efficient agent consumption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless, larger files)
    Png,
    /// JPEG format (lossy, quality-controlled)
    Jpeg,
    /// WebP format (lossless in the image crate) - default
    #[default]
    Webp,
}

impl ImageFormat {
    /// Returns the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
        }
    }

    /// Returns the conventional file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Webp => "webp",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Rectangular region of an image in pixels, relative to the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Region {
    /// X offset from the left edge
    pub x: u32,
    /// Y offset from the top edge
    pub y: u32,
    /// Width of the region
    pub width: u32,
    /// Height of the region
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Options controlling a capture operation
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    /// Output image format
    pub format: ImageFormat,
    /// Quality for JPEG (1-100); mapped to a compression level for PNG
    pub quality: u8,
    /// Scale factor applied to the captured frame (0.1-2.0)
    pub scale: f32,
    /// Whether to include the cursor in the capture
    pub include_cursor: bool,
    /// Optional crop region applied after scaling
    pub region: Option<Region>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            quality: 80,
            scale: 1.0,
            include_cursor: false,
            region: None,
        }
    }
}

impl CaptureOptions {
    /// Returns a builder initialized with default options
    pub fn builder() -> CaptureOptionsBuilder {
        CaptureOptionsBuilder::default()
    }
}

/// Builder for [`CaptureOptions`]
#[derive(Debug, Default)]
pub struct CaptureOptionsBuilder {
    opts: CaptureOptions,
}

impl CaptureOptionsBuilder {
    pub fn format(mut self, format: ImageFormat) -> Self {
        self.opts.format = format;
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.opts.quality = quality;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.opts.scale = scale;
        self
    }

    pub fn include_cursor(mut self, include_cursor: bool) -> Self {
        self.opts.include_cursor = include_cursor;
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.opts.region = Some(region);
        self
    }

    pub fn build(self) -> CaptureOptions {
        self.opts
    }
}

/// Platform-specific identifier for a resolved window
pub type WindowHandle = String;

/// Metadata about a capturable window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WindowInfo {
    /// Platform-specific window identifier
    pub id: String,
    /// Window title
    pub title: String,
    /// Window class name
    pub class: String,
    /// Executable name of the owning process
    pub owner: String,
    /// Process ID of the owning process
    pub pid: u32,
    /// Backend that reported this window
    pub backend: BackendKind,
}

/// Criteria for selecting a window to capture
///
/// Matching semantics: title is a case-insensitive substring match, class and
/// exe are exact matches. When several fields are set, all must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WindowSelector {
    /// Window title substring
    pub title: Option<String>,
    /// Window class name
    pub class: Option<String>,
    /// Executable name
    pub exe: Option<String>,
}

impl WindowSelector {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn by_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    pub fn by_exe(exe: impl Into<String>) -> Self {
        Self {
            exe: Some(exe.into()),
            ..Self::default()
        }
    }

    /// True when no criteria are set
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.class.is_none() && self.exe.is_none()
    }
}

/// Feature flags reported by a capture backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Capabilities {
    /// Backend can capture individual windows
    pub window_capture: bool,
    /// Backend can capture full displays
    pub display_capture: bool,
    /// Backend can include the cursor in captures
    pub cursor: bool,
    /// Backend supports crop regions
    pub region: bool,
}

impl Capabilities {
    /// Capabilities with every feature enabled
    pub fn full() -> Self {
        Self {
            window_capture: true,
            display_capture: true,
            cursor: true,
            region: true,
        }
    }
}

/// Request body for window capture (REST) and arguments for the
/// capture_window tool (MCP)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CaptureWindowRequest {
    /// Window title substring (at least one selector field is required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Window class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Executable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exe: Option<String>,
    /// Output image format (default: webp)
    #[serde(default)]
    pub format: ImageFormat,
    /// Image quality for JPEG (0-100, default: 80); compression level for PNG
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    /// Scale factor (0.1-2.0, default: 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Whether to include the cursor (default: false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_cursor: Option<bool>,
    /// Region to crop to; omitted captures the full window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl CaptureWindowRequest {
    /// Builds the window selector described by this request
    pub fn selector(&self) -> WindowSelector {
        WindowSelector {
            title: self.title.clone(),
            class: self.class.clone(),
            exe: self.exe.clone(),
        }
    }
}

/// Request body for display capture (REST) and arguments for the
/// capture_display tool (MCP)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CaptureDisplayRequest {
    /// Display identifier (0 = primary); omitted captures the primary display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_id: Option<u32>,
    /// Output image format (default: webp)
    #[serde(default)]
    pub format: ImageFormat,
    /// Image quality for JPEG (0-100, default: 80); compression level for PNG
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    /// Scale factor (0.1-2.0, default: 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Whether to include the cursor (default: false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_cursor: Option<bool>,
    /// Region to crop to; omitted captures the full display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

/// Result of a capture operation as returned by the gateway
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CaptureResponse {
    /// Base64-encoded image bytes
    pub image_base64: String,
    /// MIME type of the encoded image
    pub mime_type: String,
    /// Width of the final image in pixels
    pub width: u32,
    /// Height of the final image in pixels
    pub height: u32,
    /// Encoded size in bytes
    pub size_bytes: u64,
    /// Path the image was persisted to
    pub file_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_serialization() {
        assert_eq!(serde_json::to_string(&BackendKind::None).unwrap(), r#""none""#);
        assert_eq!(serde_json::to_string(&BackendKind::Wayland).unwrap(), r#""wayland""#);
        assert_eq!(serde_json::to_string(&BackendKind::MacOS).unwrap(), r#""macos""#);
        assert_eq!(serde_json::to_string(&BackendKind::Mock).unwrap(), r#""mock""#);
    }

    #[test]
    fn test_backend_kind_roundtrip() {
        for kind in [
            BackendKind::None,
            BackendKind::Wayland,
            BackendKind::X11,
            BackendKind::Windows,
            BackendKind::MacOS,
            BackendKind::Mock,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            let back: BackendKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_image_format_defaults_to_webp() {
        assert_eq!(ImageFormat::default(), ImageFormat::Webp);
    }

    #[test]
    fn test_image_format_mime_and_extension() {
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ImageFormat::Webp.mime_type(), "image/webp");
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_capture_options_builder() {
        let opts = CaptureOptions::builder()
            .format(ImageFormat::Png)
            .quality(95)
            .scale(0.5)
            .region(Region::new(0, 0, 100, 100))
            .build();

        assert_eq!(opts.format, ImageFormat::Png);
        assert_eq!(opts.quality, 95);
        assert_eq!(opts.scale, 0.5);
        assert_eq!(opts.region, Some(Region::new(0, 0, 100, 100)));
        assert!(!opts.include_cursor);
    }

    #[test]
    fn test_window_selector_constructors() {
        assert_eq!(WindowSelector::by_title("Firefox").title.as_deref(), Some("Firefox"));
        assert_eq!(WindowSelector::by_class("Code").class.as_deref(), Some("Code"));
        assert_eq!(WindowSelector::by_exe("kitty").exe.as_deref(), Some("kitty"));
        assert!(WindowSelector::default().is_empty());
        assert!(!WindowSelector::by_title("x").is_empty());
    }

    #[test]
    fn test_capture_window_request_selector() {
        let req = CaptureWindowRequest {
            title: Some("Firefox".to_string()),
            class: Some("Navigator".to_string()),
            ..CaptureWindowRequest::default()
        };

        let selector = req.selector();
        assert_eq!(selector.title.as_deref(), Some("Firefox"));
        assert_eq!(selector.class.as_deref(), Some("Navigator"));
        assert!(selector.exe.is_none());
    }

    #[test]
    fn test_capture_window_request_minimal_json() {
        let req: CaptureWindowRequest = serde_json::from_str(r#"{"title":"Firefox"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Firefox"));
        assert_eq!(req.format, ImageFormat::Webp);
        assert!(req.quality.is_none());
        assert!(req.region.is_none());
    }

    #[test]
    fn test_health_response_from_platform() {
        let info = PlatformInfo::new("linux".to_string(), BackendKind::X11);
        let response = HealthResponse::from_platform(info);

        assert_eq!(response.platform, "linux");
        assert_eq!(response.backend, "x11");
        assert!(response.ok);
    }

    #[test]
    fn test_json_schema_generation() {
        let _ = schemars::schema_for!(CaptureWindowRequest);
        let _ = schemars::schema_for!(CaptureDisplayRequest);
        let _ = schemars::schema_for!(HealthResponse);
    }
}
