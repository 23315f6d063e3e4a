//! `hints` - Per-aircraft checklist image overlay
//!
//! This library provides the core functionality for showing per-aircraft
//! checklist images in a host overlay window: loading and cycling a deck of
//! hint images, persisting the overlay window position, and dispatching the
//! host-registered commands.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deck;
pub mod display;
pub mod error;
pub mod event;
pub mod logging;
pub mod window;

pub use app::App;
pub use commands::HostCommand;
pub use config::Config;
pub use deck::{Deck, Hint};
pub use display::{TextureAllocator, TextureHandle};
pub use error::{Error, Result};
pub use event::{CycleEvent, InputEvent};
pub use logging::init_logging;
pub use window::{ScreenBounds, WindowRect, WindowStore};
