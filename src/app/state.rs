//! Application state types

use std::time::Instant;

use crate::view::ViewAction;

/// Result type for application actions that may trigger UI updates
#[must_use = "Handle the AppResult to ensure the UI updates correctly"]
pub enum AppResult {
    /// No action needed
    Ok,
    /// UI needs to be redrawn
    Redraw,
}

impl AppResult {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, AppResult::Redraw)
    }

    pub fn from_changed(changed: bool) -> Self {
        if changed {
            AppResult::Redraw
        } else {
            AppResult::Ok
        }
    }
}

/// Transient UI state (cursor blink, hover)
pub struct UiState {
    pub cursor_visible: bool,
    pub last_cursor_blink: Instant,
    pub hovered: Option<ViewAction>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            cursor_visible: true,
            last_cursor_blink: Instant::now(),
            hovered: None,
        }
    }

    /// Reset cursor blink (call after user action)
    pub fn reset_cursor_blink(&mut self) {
        self.cursor_visible = true;
        self.last_cursor_blink = Instant::now();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
