//! Overlay settings persisted between sessions
//!
//! Only the overlay window position is stored. A position of `(0, 0)` means
//! the window has never been placed; it is centred on first show and is not
//! written back to disk.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Width and height of the screen or of the overlay window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of the overlay window in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: f64,
    pub y: f64,
}

impl WindowPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when the window has never been placed
    pub fn is_unset(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Position to show the window at: the stored one, or centred when unset
    ///
    /// ```
    /// use science_manager_core::settings::{Extent, WindowPosition};
    ///
    /// let centred = WindowPosition::default().resolve(Extent::new(1920.0, 1080.0), Extent::new(400.0, 300.0));
    /// assert_eq!(centred, WindowPosition::new(760.0, 390.0));
    /// ```
    pub fn resolve(&self, screen: Extent, window: Extent) -> WindowPosition {
        if self.is_unset() {
            WindowPosition::new(
                (screen.width - window.width) / 2.0,
                (screen.height - window.height) / 2.0,
            )
        } else {
            *self
        }
    }

    /// Keep the window on screen after a drag
    ///
    /// One pixel of overhang on the top and left edges is allowed.
    pub fn clamp_to_screen(&self, screen: Extent, window: Extent) -> WindowPosition {
        let max_x = (screen.width - window.width).max(-1.0);
        let max_y = (screen.height - window.height).max(-1.0);
        WindowPosition::new(self.x.clamp(-1.0, max_x), self.y.clamp(-1.0, max_y))
    }
}

/// Settings file contents
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    pub window_position: WindowPosition,
}

impl OverlaySettings {
    /// Read settings from `path`; a missing file yields defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write settings to `path`, creating its directory
    ///
    /// Returns `false` without touching disk when the window was never placed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<bool, SettingsError> {
        if self.window_position.is_unset() {
            return Ok(false);
        }
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "Saved overlay settings");
        Ok(true)
    }
}
