//! Overlay window geometry and persistence.
//!
//! The overlay's on-screen rectangle can be saved to disk, restored, or
//! reset to the default placement (tucked into the top-right corner of the
//! screen, offset in from the edges). Screen coordinates may be negative on
//! multi-monitor setups, so positions are signed while sizes are not.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::WindowConfig;
use crate::display::offset_from_edge;
use crate::error::{Error, Result};

/// The usable screen area, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBounds {
    /// Screen width in pixels.
    pub width: u32,
    /// Screen height in pixels.
    pub height: u32,
}

/// A screen-coordinate rectangle for the overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    /// Left edge in screen coordinates.
    pub left: i32,
    /// Top edge in screen coordinates.
    pub top: i32,
    /// Width in pixels, non-zero.
    pub width: u32,
    /// Height in pixels, non-zero.
    pub height: u32,
}

impl WindowRect {
    /// Validate the rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the width or height is zero.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::window_validation(format!(
                "size {}x{} must be non-zero in both dimensions",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// The default overlay placement for a screen: the configured window
    /// size in the top-right corner, offset in from the edges.
    #[allow(clippy::cast_possible_wrap)]
    #[must_use]
    pub fn default_placement(screen: ScreenBounds, config: &WindowConfig) -> Self {
        let horiz_offset = offset_from_edge(
            screen.width,
            config.from_edge_proportion,
            config.from_edge_min,
        );
        let vert_offset = offset_from_edge(
            screen.height,
            config.from_edge_proportion,
            config.from_edge_min,
        );
        WindowRect {
            left: screen
                .width
                .saturating_sub(horiz_offset)
                .saturating_sub(config.width) as i32,
            top: (vert_offset * 2) as i32,
            width: config.width,
            height: config.height,
        }
    }
}

/// On-disk form of a saved window position.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPosition {
    rect: WindowRect,
    saved_at: DateTime<Utc>,
}

/// Serializes the overlay rectangle to a JSON file on disk.
#[derive(Debug, Clone)]
pub struct WindowStore {
    path: PathBuf,
}

impl WindowStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the position file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save a window rectangle.
    ///
    /// The write is atomic (temp file, then rename) and the parent
    /// directory is created if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle is invalid or the file cannot be
    /// written.
    pub fn save(&self, rect: &WindowRect) -> Result<()> {
        rect.validate()?;

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let stored = StoredPosition {
            rect: *rect,
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        info!(path = %self.path.display(), ?rect, "Saved window position");
        Ok(())
    }

    /// Load the saved window rectangle.
    ///
    /// A missing file is `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load(&self) -> Result<Option<WindowRect>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved window position");
                return Ok(None);
            }
            Err(source) => {
                return Err(Error::WindowRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let stored: StoredPosition =
            serde_json::from_str(&contents).map_err(|source| Error::WindowParse {
                path: self.path.clone(),
                source,
            })?;
        stored.rect.validate()?;

        debug!(path = %self.path.display(), rect = ?stored.rect, "Loaded window position");
        Ok(Some(stored.rect))
    }

    /// Remove the saved position, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Cleared saved window position");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reset to the default placement: clear the saved position and return
    /// the default rectangle for the given screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved position cannot be removed.
    pub fn reset(&self, screen: ScreenBounds, config: &WindowConfig) -> Result<WindowRect> {
        self.clear()?;
        Ok(WindowRect::default_placement(screen, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(dir: &Path) -> WindowStore {
        WindowStore::new(dir.join("window.json"))
    }

    fn sample_rect() -> WindowRect {
        WindowRect {
            left: 1470,
            top: 100,
            width: 400,
            height: 300,
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());
        let rect = sample_rect();

        store.save(&rect).unwrap();
        assert_eq!(store.load().unwrap(), Some(rect));
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = WindowStore::new(dir.path().join("deep/nested/window.json"));
        store.save(&sample_rect()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_rejects_zero_size() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());
        let rect = WindowRect {
            left: 0,
            top: 0,
            width: 0,
            height: 300,
        };
        let err = store.save(&rect).unwrap_err();
        assert!(matches!(err, Error::WindowValidation { .. }));
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());
        std::fs::write(store.path(), "not json at all").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::WindowParse { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_stored_rect() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());
        std::fs::write(
            store.path(),
            r#"{"rect":{"left":0,"top":0,"width":0,"height":0},"saved_at":"2024-01-15T10:00:00Z"}"#,
        )
        .unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::WindowValidation { .. }));
    }

    #[test]
    fn test_saved_file_records_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());
        store.save(&sample_rect()).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains("saved_at"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());

        store.save(&sample_rect()).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());

        // Clearing again is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_negative_coordinates_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());
        let rect = WindowRect {
            left: -1920,
            top: -50,
            width: 400,
            height: 300,
        };

        store.save(&rect).unwrap();
        assert_eq!(store.load().unwrap(), Some(rect));
    }

    #[test]
    fn test_default_placement() {
        let config = WindowConfig::default();
        let screen = ScreenBounds {
            width: 1920,
            height: 1080,
        };
        let rect = WindowRect::default_placement(screen, &config);

        // 1920/20 = 96 capped at 50; 1080/20 = 54 capped at 50
        assert_eq!(rect.left, 1920 - 50 - 400);
        assert_eq!(rect.top, 100);
        assert_eq!(rect.width, 400);
        assert_eq!(rect.height, 300);
    }

    #[test]
    fn test_default_placement_small_screen() {
        let config = WindowConfig::default();
        let screen = ScreenBounds {
            width: 800,
            height: 600,
        };
        let rect = WindowRect::default_placement(screen, &config);

        // 800/20 = 40, under the cap
        assert_eq!(rect.left, 800 - 40 - 400);
        assert_eq!(rect.top, 60);
    }

    #[test]
    fn test_reset_clears_and_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());
        let config = WindowConfig::default();
        store.save(&sample_rect()).unwrap();

        let screen = ScreenBounds {
            width: 1920,
            height: 1080,
        };
        let rect = store.reset(screen, &config).unwrap();

        assert!(!store.path().exists());
        assert_eq!(rect, WindowRect::default_placement(screen, &config));
    }
}
