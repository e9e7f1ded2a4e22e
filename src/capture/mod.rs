//! Capture backend abstraction
//!
//! This module provides the core abstraction for screenshot capture:
//!
//! - `ImageBuffer`: a wrapper around `image::DynamicImage` with scaling and
//!   cropping transformations
//! - `CaptureBackend`: the trait every capture backend implements
//! - `MockBackend`: a synthetic backend used as the default implementation;
//!   platform backends plug in behind the same trait

use async_trait::async_trait;

use crate::{
    error::CaptureResult,
    model::{Capabilities, CaptureOptions, WindowHandle, WindowInfo, WindowSelector},
};

pub mod image_buffer;
pub mod mock;

pub use image_buffer::ImageBuffer;
pub use mock::MockBackend;

/// Core trait for screenshot capture backends
///
/// Defines the interface the gateway uses to enumerate windows and capture
/// frames. Implementations must be thread-safe (`Send + Sync`) because the
/// HTTP and MCP surfaces call them concurrently from async tasks.
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Lists all capturable windows on the system
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::BackendNotAvailable`](crate::error::CaptureError::BackendNotAvailable)
    /// when the backend cannot enumerate windows.
    async fn list_windows(&self) -> CaptureResult<Vec<WindowInfo>>;

    /// Resolves a window selector to a specific window handle
    ///
    /// If multiple windows match, the first match is returned (order is
    /// backend-specific).
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::WindowNotFound`](crate::error::CaptureError::WindowNotFound)
    /// when no window matches the selector.
    async fn resolve_target(&self, selector: &WindowSelector) -> CaptureResult<WindowHandle>;

    /// Captures a screenshot of a specific window
    ///
    /// The captured frame respects the options provided (scale and region;
    /// format and quality are applied at encode time).
    async fn capture_window(
        &self,
        handle: WindowHandle,
        opts: &CaptureOptions,
    ) -> CaptureResult<ImageBuffer>;

    /// Captures a screenshot of an entire display
    ///
    /// `None` captures the primary display.
    async fn capture_display(
        &self,
        display_id: Option<u32>,
        opts: &CaptureOptions,
    ) -> CaptureResult<ImageBuffer>;

    /// Returns the capabilities of this backend
    ///
    /// Synchronous because capabilities are known at backend initialization.
    fn capabilities(&self) -> Capabilities;
}
