//! The hint deck: image loading, ordering, and cycling.
//!
//! A deck is built from the `hints` directory inside an aircraft's own
//! directory. JPEG and PNG files load in file-name order (byte-wise
//! lexicographic, so numeric prefixes like `01-`, `02-` order naturally)
//! and the pilot cycles through them with wrap-around. Reloading re-scans
//! the directory without restarting the host; files whose contents are
//! unchanged keep their decoded pixels and display handle.

use std::cell::Cell;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageReader, RgbaImage};
use tracing::{debug, error, info, warn};

use crate::display::{TextureAllocator, TextureHandle};
use crate::error::{Error, Result};
use crate::event::CycleEvent;

/// File extensions recognized as hint images (ASCII case-insensitive).
pub const HINT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// List the hint image files in a directory, in cycling order.
///
/// Only plain files with a recognized extension are returned; anything else
/// in the directory is ignored. Ordering is byte-wise lexicographic on the
/// file name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn scan_hint_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| Error::DeckScan {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_hint_extension(path))
        .collect();

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn has_hint_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            HINT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// A single checklist image.
///
/// Holds the decoded pixels, a fingerprint of the source file for reload
/// deduplication, and a lazily created display handle.
#[derive(Debug)]
pub struct Hint {
    path: PathBuf,
    name: String,
    image: RgbaImage,
    fingerprint: String,
    handle: Cell<Option<TextureHandle>>,
}

impl Hint {
    /// Load a hint image from disk.
    ///
    /// `max_dimension` guards against decoding pathologically large images;
    /// 0 disables the guard.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a decodable
    /// image, or exceeds the dimension limit.
    pub fn load(path: &Path, max_dimension: u32) -> Result<Self> {
        info!(path = %path.display(), "Loading hint");
        let bytes = std::fs::read(path).map_err(|source| Error::HintRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, &bytes, max_dimension)
    }

    /// Build a hint from file bytes already read from `path`.
    fn from_bytes(path: &Path, bytes: &[u8], max_dimension: u32) -> Result<Self> {
        let fingerprint = fingerprint_bytes(bytes);

        // Read dimensions without decoding so the guard is cheap
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|source| Error::HintRead {
                path: path.to_path_buf(),
                source,
            })?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|source| Error::HintDecode {
                path: path.to_path_buf(),
                source,
            })?;
        if max_dimension > 0 && (width > max_dimension || height > max_dimension) {
            return Err(Error::HintTooLarge {
                path: path.to_path_buf(),
                width,
                height,
                max: max_dimension,
            });
        }

        let image = image::load_from_memory(bytes)
            .map_err(|source| Error::HintDecode {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Hint {
            path: path.to_path_buf(),
            name,
            image,
            fingerprint,
            handle: Cell::new(None),
        })
    }

    /// The source file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The source file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image dimensions in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// BLAKE3 fingerprint of the source file bytes.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The decoded pixels.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Get the display handle, creating it on first use.
    ///
    /// Creation failure is logged and yields `None`; the next call tries
    /// again.
    pub fn handle(&self, allocator: &dyn TextureAllocator) -> Option<TextureHandle> {
        if let Some(handle) = self.handle.get() {
            Some(handle)
        } else {
            let handle = match allocator.create(&self.image) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    error!(error = %e, path = %self.path.display(), "Unable to create texture");
                    None
                }
            };
            self.handle.set(handle);
            handle
        }
    }

    /// Release the display handle if one was created.
    pub fn release(&self, allocator: &dyn TextureAllocator) {
        if let Some(handle) = self.handle.take() {
            allocator.deallocate(handle);
        }
    }

    /// Whether a display handle is currently cached.
    #[must_use]
    pub fn has_handle(&self) -> bool {
        self.handle.get().is_some()
    }
}

fn fingerprint_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// An ordered collection of hints with a current position.
#[derive(Debug)]
pub struct Deck {
    dir: PathBuf,
    max_dimension: u32,
    hints: Vec<Hint>,
    current: usize,
}

impl Deck {
    /// Load the deck from a hints directory.
    ///
    /// A missing directory yields an empty deck with a logged warning, as
    /// does a directory with no loadable images. Files that fail to load
    /// are skipped with a logged warning; the rest of the deck still loads.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn load(dir: impl Into<PathBuf>, max_dimension: u32) -> Result<Self> {
        let dir = dir.into();
        let mut deck = Deck {
            dir,
            max_dimension,
            hints: Vec::new(),
            current: 0,
        };

        if !deck.dir.is_dir() {
            warn!(path = %deck.dir.display(), "No hints directory found");
            return Ok(deck);
        }

        for path in scan_hint_files(&deck.dir)? {
            match Hint::load(&path, max_dimension) {
                Ok(hint) => deck.hints.push(hint),
                Err(e) => warn!(error = %e, "Unable to load hint"),
            }
        }

        info!(count = deck.hints.len(), path = %deck.dir.display(), "Loaded hint deck");
        Ok(deck)
    }

    /// The hints directory this deck was loaded from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of hints in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Whether the deck has no hints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// The current position in the deck.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The hint at the current position, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Hint> {
        self.hints.get(self.current)
    }

    /// All hints in cycling order.
    #[must_use]
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Move through the deck with wrap-around.
    ///
    /// The outgoing hint's display handle is released so only the visible
    /// hint holds renderer memory. On an empty deck this is a no-op with a
    /// logged warning.
    pub fn cycle(&mut self, event: CycleEvent, allocator: Option<&dyn TextureAllocator>) {
        if self.hints.is_empty() {
            warn!("Check log for errors. No hints were loaded.");
            return;
        }
        if let Some(allocator) = allocator {
            if let Some(current) = self.hints.get(self.current) {
                current.release(allocator);
            }
        }
        match event {
            CycleEvent::Next => {
                self.current = (self.current + 1) % self.hints.len();
                debug!(new_idx = self.current, "next hint");
            }
            CycleEvent::Previous => {
                self.current = (self.current + self.hints.len() - 1) % self.hints.len();
                debug!(new_idx = self.current, "previous hint");
            }
        }
    }

    /// Re-scan the hints directory and rebuild the deck.
    ///
    /// Files whose fingerprint is unchanged keep their decoded pixels and
    /// display handle. New or modified files are decoded fresh; removed
    /// files are dropped and their handles released. The current position
    /// is reset to the start if it falls outside the new deck.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn reload(&mut self, allocator: Option<&dyn TextureAllocator>) -> Result<()> {
        let mut old: HashMap<PathBuf, Hint> = std::mem::take(&mut self.hints)
            .into_iter()
            .map(|hint| (hint.path.clone(), hint))
            .collect();

        if self.dir.is_dir() {
            for path in scan_hint_files(&self.dir)? {
                let bytes = match std::fs::read(&path) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!(error = %e, path = %path.display(), "Unable to read hint");
                        continue;
                    }
                };
                let fingerprint = fingerprint_bytes(&bytes);

                if let Some(hint) = old.remove(&path) {
                    if hint.fingerprint == fingerprint {
                        debug!(path = %path.display(), "Hint unchanged, keeping decoded image");
                        self.hints.push(hint);
                        continue;
                    }
                    // Contents changed: fall through and decode fresh
                    release_or_warn(&hint, allocator);
                }

                match Hint::from_bytes(&path, &bytes, self.max_dimension) {
                    Ok(hint) => {
                        info!(path = %path.display(), "Loaded hint");
                        self.hints.push(hint);
                    }
                    Err(e) => warn!(error = %e, "Unable to load hint"),
                }
            }
        } else {
            warn!(path = %self.dir.display(), "No hints directory found");
        }

        // Anything left in the map was removed from disk
        for hint in old.values() {
            release_or_warn(hint, allocator);
        }

        if self.current >= self.hints.len() {
            self.current = 0;
        }

        info!(count = self.hints.len(), path = %self.dir.display(), "Reloaded hint deck");
        Ok(())
    }

    /// Release every cached display handle.
    pub fn release_all(&self, allocator: &dyn TextureAllocator) {
        for hint in &self.hints {
            hint.release(allocator);
        }
    }
}

fn release_or_warn(hint: &Hint, allocator: Option<&dyn TextureAllocator>) {
    match allocator {
        Some(allocator) => hint.release(allocator),
        None => {
            if hint.has_handle() {
                warn!(path = %hint.path.display(), "Dropping hint with a live display handle");
            }
        }
    }
}
