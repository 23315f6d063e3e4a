//! The hints application state.
//!
//! [`App`] ties the deck, the overlay window geometry, and the position
//! store together, and executes the host-registered commands. The host
//! integration constructs one `App` per loaded aircraft, forwards window
//! input to [`App::handle_event`], and draws the texture returned by
//! [`App::current_handle`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::commands::HostCommand;
use crate::config::Config;
use crate::deck::Deck;
use crate::display::{TextureAllocator, TextureHandle};
use crate::error::Result;
use crate::event::{CycleEvent, InputEvent};
use crate::window::{ScreenBounds, WindowRect, WindowStore};

/// Application state for one loaded aircraft.
pub struct App {
    config: Config,
    hints_dir: PathBuf,
    deck: Deck,
    store: WindowStore,
    screen: ScreenBounds,
    window: WindowRect,
    visible: bool,
    allocator: Option<Arc<dyn TextureAllocator>>,
}

impl App {
    /// Build the app for an aircraft directory.
    ///
    /// The deck loads from the configured hints subdirectory of
    /// `aircraft_dir`. The overlay starts hidden, placed at the saved
    /// window position if one exists (a corrupt position file falls back to
    /// the default placement with a logged warning).
    ///
    /// # Errors
    ///
    /// Returns an error if the hints directory exists but cannot be read.
    pub fn new(config: Config, aircraft_dir: &Path, screen: ScreenBounds) -> Result<Self> {
        let hints_dir = aircraft_dir.join(&config.deck.dir_name);
        info!(path = %hints_dir.display(), "Looking for hints");
        let deck = Deck::load(hints_dir.clone(), config.deck.max_dimension)?;

        let store = WindowStore::new(config.position_file_path());
        let window = match store.load() {
            Ok(Some(rect)) => rect,
            Ok(None) => WindowRect::default_placement(screen, &config.window),
            Err(e) => {
                warn!(error = %e, "Ignoring saved window position");
                WindowRect::default_placement(screen, &config.window)
            }
        };

        Ok(App {
            config,
            hints_dir,
            deck,
            store,
            screen,
            window,
            visible: false,
            allocator: None,
        })
    }

    /// Attach the host's texture allocator.
    #[must_use]
    pub fn with_allocator(mut self, allocator: Arc<dyn TextureAllocator>) -> Self {
        self.allocator = Some(allocator);
        self
    }

    /// The hints directory for the current aircraft.
    #[must_use]
    pub fn hints_dir(&self) -> &Path {
        &self.hints_dir
    }

    /// The hint deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The overlay window rectangle.
    #[must_use]
    pub fn window(&self) -> WindowRect {
        self.window
    }

    /// Update the overlay window rectangle (e.g. after the user drags it).
    pub fn set_window(&mut self, rect: WindowRect) {
        self.window = rect;
    }

    /// Whether the overlay window is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the overlay window.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Flip overlay visibility and return the new state.
    pub fn toggle_window(&mut self) -> bool {
        self.visible = !self.visible;
        info!(visible = self.visible, "Toggled hint window");
        self.visible
    }

    /// The display handle for the currently visible hint, if an allocator
    /// is attached and the texture can be created.
    #[must_use]
    pub fn current_handle(&self) -> Option<TextureHandle> {
        let allocator = self.allocator.as_deref()?;
        self.deck.current().and_then(|hint| hint.handle(allocator))
    }

    /// Execute a host-registered command.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deck or window operation fails.
    pub fn execute(&mut self, command: HostCommand) -> Result<()> {
        match command {
            HostCommand::NextHint => {
                self.cycle(CycleEvent::Next);
                Ok(())
            }
            HostCommand::PreviousHint => {
                self.cycle(CycleEvent::Previous);
                Ok(())
            }
            HostCommand::Reload => self.deck.reload(self.allocator.as_deref()),
            HostCommand::ToggleWindow => {
                self.toggle_window();
                Ok(())
            }
            HostCommand::SaveWindow => self.store.save(&self.window),
            HostCommand::LoadWindow => {
                match self.store.load()? {
                    Some(rect) => self.window = rect,
                    None => warn!("No saved window position to load"),
                }
                Ok(())
            }
            HostCommand::ResetWindow => {
                self.window = self.store.reset(self.screen, &self.config.window)?;
                Ok(())
            }
        }
    }

    /// Handle a raw input event from the host window.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if let Some(cycle) = CycleEvent::from_input(&event) {
            self.cycle(cycle);
            true
        } else {
            false
        }
    }

    fn cycle(&mut self, event: CycleEvent) {
        self.deck.cycle(event, self.allocator.as_deref());
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("hints_dir", &self.hints_dir)
            .field("deck_len", &self.deck.len())
            .field("window", &self.window)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::testing::CountingAllocator;
    use crate::event::{Key, KeyAction};
    use image::{Rgba, RgbaImage};

    const SCREEN: ScreenBounds = ScreenBounds {
        width: 1920,
        height: 1080,
    };

    fn write_png(dir: &Path, name: &str, value: u8) {
        RgbaImage::from_pixel(2, 2, Rgba([value, 0, 0, 255]))
            .save(dir.join(name))
            .expect("failed to write test png");
    }

    /// Aircraft dir with `count` hints and a config whose position file
    /// lives inside the same temp dir.
    fn test_app(dir: &Path, count: u8) -> App {
        let hints_dir = dir.join("hints");
        std::fs::create_dir_all(&hints_dir).unwrap();
        for i in 1..=count {
            write_png(&hints_dir, &format!("{i:02}.png"), i);
        }
        let mut config = Config::default();
        config.window.position_file = Some(dir.join("window.json"));
        App::new(config, dir, SCREEN).unwrap()
    }

    #[test]
    fn test_new_with_missing_hints_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.position_file = Some(dir.path().join("window.json"));

        let app = App::new(config, dir.path(), SCREEN).unwrap();
        assert!(app.deck().is_empty());
        assert!(!app.is_visible());
    }

    #[test]
    fn test_new_uses_default_placement() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), 1);
        assert_eq!(
            app.window(),
            WindowRect::default_placement(SCREEN, &Config::default().window)
        );
    }

    #[test]
    fn test_new_ignores_corrupt_position_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("window.json"), "garbage").unwrap();
        let app = test_app(dir.path(), 1);
        assert_eq!(
            app.window(),
            WindowRect::default_placement(SCREEN, &Config::default().window)
        );
    }

    #[test]
    fn test_execute_next_and_previous() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), 3);

        app.execute(HostCommand::NextHint).unwrap();
        assert_eq!(app.deck().current_index(), 1);

        app.execute(HostCommand::PreviousHint).unwrap();
        app.execute(HostCommand::PreviousHint).unwrap();
        assert_eq!(app.deck().current_index(), 2);
    }

    #[test]
    fn test_execute_toggle_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), 1);

        assert!(!app.is_visible());
        app.execute(HostCommand::ToggleWindow).unwrap();
        assert!(app.is_visible());
        app.execute(HostCommand::ToggleWindow).unwrap();
        assert!(!app.is_visible());
    }

    #[test]
    fn test_execute_save_and_load_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), 1);

        let moved = WindowRect {
            left: 10,
            top: 20,
            width: 500,
            height: 350,
        };
        app.set_window(moved);
        app.execute(HostCommand::SaveWindow).unwrap();

        // Drag somewhere else, then restore
        app.set_window(WindowRect {
            left: 0,
            top: 0,
            width: 400,
            height: 300,
        });
        app.execute(HostCommand::LoadWindow).unwrap();
        assert_eq!(app.window(), moved);
    }

    #[test]
    fn test_execute_load_without_saved_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), 1);
        let before = app.window();

        app.execute(HostCommand::LoadWindow).unwrap();
        assert_eq!(app.window(), before);
    }

    #[test]
    fn test_execute_reset_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), 1);

        app.set_window(WindowRect {
            left: 5,
            top: 5,
            width: 200,
            height: 100,
        });
        app.execute(HostCommand::SaveWindow).unwrap();
        app.execute(HostCommand::ResetWindow).unwrap();

        assert_eq!(
            app.window(),
            WindowRect::default_placement(SCREEN, &Config::default().window)
        );
        // Saved position was cleared
        app.execute(HostCommand::LoadWindow).unwrap();
        assert_eq!(
            app.window(),
            WindowRect::default_placement(SCREEN, &Config::default().window)
        );
    }

    #[test]
    fn test_execute_reload_picks_up_new_hints() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), 1);
        assert_eq!(app.deck().len(), 1);

        write_png(&dir.path().join("hints"), "02.png", 2);
        app.execute(HostCommand::Reload).unwrap();
        assert_eq!(app.deck().len(), 2);
    }

    #[test]
    fn test_handle_event_scroll() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), 2);

        assert!(app.handle_event(InputEvent::Scroll { x: 0, y: 1 }));
        assert_eq!(app.deck().current_index(), 1);

        assert!(!app.handle_event(InputEvent::Scroll { x: 0, y: 0 }));
        assert!(!app.handle_event(InputEvent::Key {
            key: Key::Other,
            action: KeyAction::Press,
        }));
    }

    #[test]
    fn test_current_handle_requires_allocator() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), 1);
        assert!(app.current_handle().is_none());
    }

    #[test]
    fn test_current_handle_with_allocator() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), 2);
        let app = app.with_allocator(Arc::new(CountingAllocator::default()));

        let first = app.current_handle().unwrap();
        // Cached on repeat calls
        assert_eq!(app.current_handle(), Some(first));
    }

    #[test]
    fn test_cycle_with_allocator_releases_outgoing() {
        let dir = tempfile::tempdir().unwrap();
        let allocator = Arc::new(CountingAllocator::default());
        let mut app =
            test_app(dir.path(), 2).with_allocator(Arc::clone(&allocator) as Arc<dyn TextureAllocator>);

        let handle = app.current_handle().unwrap();
        app.execute(HostCommand::NextHint).unwrap();

        assert_eq!(allocator.deallocated.borrow().as_slice(), &[handle]);
    }
}
