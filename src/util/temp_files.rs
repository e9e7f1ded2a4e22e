//! Temporary file management for captured images
//!
//! Tracks every file it creates and deletes them when the manager is
//! dropped. Files live in a dedicated subdirectory of the system temp
//! directory with unique timestamped names, so concurrent gateways do not
//! collide.

use std::{
    fs,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::{
    error::{CaptureError, CaptureResult},
    model::ImageFormat,
};

/// Thread-safe temporary file manager
///
/// Cloning shares the tracked file list; cleanup runs when the last clone is
/// dropped. Cleanup is best-effort: failures are logged, never panicked on.
#[derive(Clone, Debug)]
pub struct TempFileManager {
    files: Arc<Mutex<Vec<PathBuf>>>,
    counter: Arc<AtomicU64>,
}

impl TempFileManager {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(Vec::new())),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Base directory for the gateway's temp files
    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join("agent-gateway")
    }

    fn ensure_temp_dir() -> CaptureResult<PathBuf> {
        let dir = Self::temp_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(CaptureError::Io)?;
        }
        Ok(dir)
    }

    /// Writes encoded image bytes to a fresh tracked temp file
    ///
    /// Returns the file path and the number of bytes written.
    pub fn write_image(&self, data: &[u8], format: ImageFormat) -> CaptureResult<(PathBuf, u64)> {
        let dir = Self::ensure_temp_dir()?;

        let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        let filename = format!(
            "capture-{}-{}-{}.{}",
            timestamp,
            std::process::id(),
            sequence,
            format.extension()
        );
        let path = dir.join(filename);

        fs::write(&path, data).map_err(CaptureError::Io)?;

        if let Ok(mut files) = self.files.lock() {
            files.push(path.clone());
        }

        Ok((path, data.len() as u64))
    }

    /// Number of files currently tracked
    pub fn tracked_count(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or(0)
    }

    /// Deletes all tracked files now instead of waiting for drop
    ///
    /// Cleanup is best-effort: failures are logged, never panicked on.
    pub fn cleanup(&self) {
        if let Ok(mut files) = self.files.lock() {
            for path in files.drain(..) {
                if let Err(e) = fs::remove_file(&path) {
                    tracing::debug!("Failed to remove temp file {:?}: {}", path, e);
                }
            }
        }
    }
}

impl Default for TempFileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempFileManager {
    fn drop(&mut self) {
        // Only the last clone owns the file list
        if Arc::strong_count(&self.files) == 1 {
            self.cleanup();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_image_creates_file() {
        let manager = TempFileManager::new();
        let data = vec![0u8; 256];

        let (path, size) = manager.write_image(&data, ImageFormat::Png).unwrap();

        assert!(path.exists());
        assert_eq!(size, 256);
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(manager.tracked_count(), 1);

        manager.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn test_write_image_unique_paths() {
        let manager = TempFileManager::new();

        let (a, _) = manager.write_image(b"a", ImageFormat::Webp).unwrap();
        let (b, _) = manager.write_image(b"b", ImageFormat::Webp).unwrap();

        assert_ne!(a, b);
        manager.cleanup();
    }

    #[test]
    fn test_extension_follows_format() {
        let manager = TempFileManager::new();

        let (jpg, _) = manager.write_image(b"x", ImageFormat::Jpeg).unwrap();
        assert_eq!(jpg.extension().and_then(|e| e.to_str()), Some("jpg"));

        manager.cleanup();
    }

    #[test]
    fn test_drop_removes_tracked_files() {
        let path = {
            let manager = TempFileManager::new();
            let (path, _) = manager.write_image(b"gone", ImageFormat::Png).unwrap();
            assert!(path.exists());
            path
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_clones_share_tracking() {
        let manager = TempFileManager::new();
        let clone = manager.clone();

        let (path, _) = clone.write_image(b"shared", ImageFormat::Png).unwrap();
        assert_eq!(manager.tracked_count(), 1);

        drop(clone);
        // Original clone still alive, file must survive
        assert!(path.exists());

        manager.cleanup();
    }
}
