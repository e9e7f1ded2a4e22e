//! Error types for capture operations
//!
//! Each error carries enough context for a user-facing message, and
//! `remediation_hint()` suggests a next step for resolving the condition.

use crate::model::{BackendKind, WindowSelector};

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Error type for capture operations across the gateway
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Window matching the selector could not be found
    #[error("Window not found: {selector:?}")]
    WindowNotFound {
        /// The selector that failed to match any window
        selector: WindowSelector,
    },

    /// Image encoding failed
    #[error("Failed to encode image as {format}: {reason}")]
    EncodingFailed { format: String, reason: String },

    /// Invalid parameter provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// Requested backend is not available
    #[error("Backend {backend} is not available on this platform")]
    BackendNotAvailable { backend: BackendKind },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),
}

impl CaptureError {
    /// Returns an actionable remediation hint for this error
    pub fn remediation_hint(&self) -> &str {
        match self {
            CaptureError::WindowNotFound { .. } => {
                "Use the list_windows tool to see available windows. Check if the window title, \
                 class, or executable name is correct. Window titles may change dynamically."
            }
            CaptureError::EncodingFailed { format, .. } => match format.as_str() {
                "jpeg" | "jpg" => {
                    "JPEG encoding failed. Try reducing the quality parameter or using PNG."
                }
                _ => "Image encoding failed. Try a different format (png, jpeg, or webp).",
            },
            CaptureError::InvalidParameter { parameter, .. } => match parameter.as_str() {
                "quality" => "Quality must be between 0 and 100.",
                "scale" => "Scale must be between 0.1 and 2.0.",
                "selector" => "Provide at least one of 'title', 'class', or 'exe'.",
                _ => "Check the parameter value against the API documentation.",
            },
            CaptureError::BackendNotAvailable { .. } => {
                "No capture backend is available on this platform. Check that a display \
                 session is running and the required environment variables are set."
            }
            CaptureError::Io(_) => {
                "An I/O error occurred. Check file permissions, disk space, and system resources."
            }
            CaptureError::Image(_) => {
                "Image processing failed. Ensure the image data is valid and the requested \
                 operations are supported."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_not_found_message() {
        let error = CaptureError::WindowNotFound {
            selector: WindowSelector::by_title("Firefox"),
        };

        let msg = error.to_string();
        assert!(msg.contains("Window not found"));
        assert!(msg.contains("Firefox"));
        assert!(error.remediation_hint().contains("list_windows"));
    }

    #[test]
    fn test_encoding_failed_message() {
        let error = CaptureError::EncodingFailed {
            format: "jpeg".to_string(),
            reason: "encoder rejected buffer".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("Failed to encode"));
        assert!(msg.contains("jpeg"));
        assert!(error.remediation_hint().contains("PNG"));
    }

    #[test]
    fn test_invalid_parameter_hints() {
        let scale = CaptureError::InvalidParameter {
            parameter: "scale".to_string(),
            reason: "value 5.0 exceeds maximum 2.0".to_string(),
        };
        assert!(scale.remediation_hint().contains("0.1 and 2.0"));

        let quality = CaptureError::InvalidParameter {
            parameter: "quality".to_string(),
            reason: "value 150 exceeds maximum 100".to_string(),
        };
        assert!(quality.remediation_hint().contains("0 and 100"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: CaptureError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.remediation_hint().contains("permissions"));
    }

    #[test]
    fn test_backend_not_available_message() {
        let error = CaptureError::BackendNotAvailable {
            backend: BackendKind::Wayland,
        };

        assert!(error.to_string().contains("wayland"));
        assert!(error.to_string().contains("not available"));
    }
}
