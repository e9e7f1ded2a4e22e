//! Synthetic capture backend
//!
//! `MockBackend` implements [`CaptureBackend`] without access to a real
//! windowing system: it serves a fixed window list and renders gradient test
//! frames. It is the gateway's default backend and the workhorse of the test
//! suite, where its error injection exercises failure paths.

use std::sync::Arc;

use async_trait::async_trait;

use super::{CaptureBackend, ImageBuffer};
use crate::{
    error::{CaptureError, CaptureResult},
    model::{BackendKind, Capabilities, CaptureOptions, WindowHandle, WindowInfo, WindowSelector},
};

/// Dimensions of a synthetic window frame
const WINDOW_FRAME: (u32, u32) = (1920, 1080);
/// Dimensions of a synthetic display frame
const DISPLAY_FRAME: (u32, u32) = (2560, 1440);

type ErrorFactory = Arc<dyn Fn() -> CaptureError + Send + Sync>;

/// Capture backend serving synthetic windows and frames
pub struct MockBackend {
    windows: Vec<WindowInfo>,
    /// When set, every operation fails with the produced error
    fail_with: Option<ErrorFactory>,
}

impl MockBackend {
    /// Creates a new MockBackend with the predefined window list
    pub fn new() -> Self {
        Self {
            windows: Self::mock_windows(),
            fail_with: None,
        }
    }

    /// Makes every operation fail with the error produced by `factory`
    ///
    /// Used by tests to exercise error handling paths.
    pub fn with_error<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> CaptureError + Send + Sync + 'static,
    {
        self.fail_with = Some(Arc::new(factory));
        self
    }

    fn mock_windows() -> Vec<WindowInfo> {
        vec![
            WindowInfo {
                id: "win-0x1".to_string(),
                title: "Mozilla Firefox".to_string(),
                class: "Navigator".to_string(),
                owner: "firefox".to_string(),
                pid: 1000,
                backend: BackendKind::Mock,
            },
            WindowInfo {
                id: "win-0x2".to_string(),
                title: "main.rs - Zed".to_string(),
                class: "Zed".to_string(),
                owner: "zed".to_string(),
                pid: 2000,
                backend: BackendKind::Mock,
            },
            WindowInfo {
                id: "win-0x3".to_string(),
                title: "~ - kitty".to_string(),
                class: "kitty".to_string(),
                owner: "kitty".to_string(),
                pid: 3000,
                backend: BackendKind::Mock,
            },
        ]
    }

    fn check_injected_error(&self) -> CaptureResult<()> {
        match &self.fail_with {
            Some(factory) => Err(factory()),
            None => Ok(()),
        }
    }

    /// Finds the first window matching the selector
    ///
    /// Title is a case-insensitive substring match; class and exe are exact.
    /// When several criteria are set, all must match.
    fn match_window(&self, selector: &WindowSelector) -> Option<&WindowInfo> {
        self.windows.iter().find(|window| {
            let title_matches = selector
                .title
                .as_ref()
                .map(|pattern| window.title.to_lowercase().contains(&pattern.to_lowercase()))
                .unwrap_or(true);

            let class_matches = selector
                .class
                .as_ref()
                .map(|class| window.class == *class)
                .unwrap_or(true);

            let exe_matches = selector
                .exe
                .as_ref()
                .map(|exe| window.owner == *exe)
                .unwrap_or(true);

            title_matches && class_matches && exe_matches
        })
    }

    fn validate_handle(&self, handle: &WindowHandle) -> CaptureResult<()> {
        if self.windows.iter().any(|w| w.id == *handle) {
            Ok(())
        } else {
            Err(CaptureError::WindowNotFound {
                selector: WindowSelector::by_title(format!("handle:{}", handle)),
            })
        }
    }

    /// Applies scale then crop from the capture options
    fn apply_transformations(
        &self,
        mut image: ImageBuffer,
        opts: &CaptureOptions,
    ) -> CaptureResult<ImageBuffer> {
        if (opts.scale - 1.0).abs() > f32::EPSILON {
            image = image.scale(opts.scale)?;
        }

        if let Some(region) = opts.region {
            image = image.crop(region)?;
        }

        Ok(image)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureBackend for MockBackend {
    async fn list_windows(&self) -> CaptureResult<Vec<WindowInfo>> {
        self.check_injected_error()?;
        Ok(self.windows.clone())
    }

    async fn resolve_target(&self, selector: &WindowSelector) -> CaptureResult<WindowHandle> {
        self.check_injected_error()?;

        self.match_window(selector)
            .map(|window| window.id.clone())
            .ok_or_else(|| CaptureError::WindowNotFound {
                selector: selector.clone(),
            })
    }

    async fn capture_window(
        &self,
        handle: WindowHandle,
        opts: &CaptureOptions,
    ) -> CaptureResult<ImageBuffer> {
        self.check_injected_error()?;
        self.validate_handle(&handle)?;

        let image = ImageBuffer::from_test_pattern(WINDOW_FRAME.0, WINDOW_FRAME.1);
        self.apply_transformations(image, opts)
    }

    async fn capture_display(
        &self,
        _display_id: Option<u32>,
        opts: &CaptureOptions,
    ) -> CaptureResult<ImageBuffer> {
        self.check_injected_error()?;

        let image = ImageBuffer::from_test_pattern(DISPLAY_FRAME.0, DISPLAY_FRAME.1);
        self.apply_transformations(image, opts)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::full()
    }
}
