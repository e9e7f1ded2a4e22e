//! Shared application state
//!
//! One `AppState` is built by the launcher and shared by every surface: the
//! REST route groups, the MCP server, and the tool registry all borrow the
//! same backend and temp file manager.

use std::sync::Arc;

use crate::{
    capture::{CaptureBackend, MockBackend},
    util::temp_files::TempFileManager,
};

/// Application state shared across the REST and MCP surfaces
#[derive(Clone)]
pub struct AppState {
    /// Capture backend used for window enumeration and screenshots
    pub backend: Arc<dyn CaptureBackend>,
    /// Manager for persisted capture files
    pub temp_files: Arc<TempFileManager>,
}

impl AppState {
    pub fn new(backend: Arc<dyn CaptureBackend>, temp_files: Arc<TempFileManager>) -> Self {
        Self {
            backend,
            temp_files,
        }
    }

    /// State wired with the synthetic backend, as used by the launcher and
    /// the test suite
    pub fn with_mock() -> Self {
        Self::new(Arc::new(MockBackend::new()), Arc::new(TempFileManager::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_mock_builds_state() {
        let state = AppState::with_mock();
        assert!(state.backend.capabilities().window_capture);
        assert_eq!(state.temp_files.tracked_count(), 0);
    }
}
