//! Host-registered command identifiers.
//!
//! The host (flight simulator) registers one command per [`HostCommand`]
//! under its identifier, so pilots can bind them to hardware or invoke them
//! from other plugins. The identifiers are part of the user-facing surface
//! and must not change between releases.

use std::fmt;

/// Legacy identifier for [`HostCommand::ToggleWindow`], kept for
/// compatibility with bindings created against older releases.
pub const LEGACY_TOGGLE_IDENTIFIER: &str = "flc/hints/toggle";

/// An operation the host can invoke on the hints app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    /// Show the next hint.
    NextHint,
    /// Show the previous hint.
    PreviousHint,
    /// Reload hints from disk.
    Reload,
    /// Toggle overlay window visibility.
    ToggleWindow,
    /// Save the overlay window position.
    SaveWindow,
    /// Restore the saved overlay window position.
    LoadWindow,
    /// Reset the overlay window to its default position.
    ResetWindow,
}

impl HostCommand {
    /// All commands, in registration order.
    #[must_use]
    pub fn all() -> [HostCommand; 7] {
        [
            Self::NextHint,
            Self::PreviousHint,
            Self::Reload,
            Self::ToggleWindow,
            Self::SaveWindow,
            Self::LoadWindow,
            Self::ResetWindow,
        ]
    }

    /// The identifier the host registers this command under.
    #[must_use]
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::NextHint => "flc/hints/next",
            Self::PreviousHint => "flc/hints/previous",
            Self::Reload => "flc/hints/reload",
            Self::ToggleWindow => "flc/hints/window/toggle",
            Self::SaveWindow => "flc/hints/window/save",
            Self::LoadWindow => "flc/hints/window/load",
            Self::ResetWindow => "flc/hints/window/reset",
        }
    }

    /// The human-readable description shown in the host's command list.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::NextHint => "Show next hint",
            Self::PreviousHint => "Show previous hint",
            Self::Reload => "Reload hints from disk",
            Self::ToggleWindow => "Toggle window visibility",
            Self::SaveWindow => "Save window position",
            Self::LoadWindow => "Load saved window position",
            Self::ResetWindow => "Reset window to default position",
        }
    }

    /// Look up a command by identifier.
    ///
    /// Accepts [`LEGACY_TOGGLE_IDENTIFIER`] as an alias for
    /// [`HostCommand::ToggleWindow`].
    #[must_use]
    pub fn parse(identifier: &str) -> Option<Self> {
        if identifier == LEGACY_TOGGLE_IDENTIFIER {
            return Some(Self::ToggleWindow);
        }
        Self::all()
            .into_iter()
            .find(|command| command.identifier() == identifier)
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
