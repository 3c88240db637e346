//! Centralized action system
//!
//! Adding a new action:
//! 1. Add variant to Action enum
//! 2. Add handler in App::execute()
//! 3. Optionally add keybinding in keybindings.rs

use super::state::AppResult;
use super::App;
use crate::view::{Menu, ViewAction};

/// All actions that can be triggered by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // =========================================================================
    // Console
    // =========================================================================
    ToggleConsole,
    HistoryUp,
    HistoryDown,

    // =========================================================================
    // Console input editing
    // =========================================================================
    Backspace,
    Delete,
    DeleteWordLeft,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,

    // =========================================================================
    // Modal operations
    // =========================================================================
    Cancel,  // Escape - collapses/closes the console, else back to the main menu
    Confirm, // Enter - runs the console line

    // =========================================================================
    // Character input (console text or resize keys)
    // =========================================================================
    InsertChar(char),
}

impl App {
    /// Execute an action and return whether a redraw is needed
    pub fn execute(&mut self, action: Action) -> AppResult {
        let on_clock = self.menu == Menu::Clock;
        let console_open = on_clock && self.console.is_open();

        match action {
            Action::ToggleConsole if on_clock => {
                self.console.toggle();
                self.state.reset_cursor_blink();
                AppResult::Redraw
            }
            Action::Cancel if console_open => {
                self.console.escape();
                AppResult::Redraw
            }
            Action::Cancel if on_clock || self.menu == Menu::Settings => {
                self.apply_view_action(ViewAction::SwitchMenu(Menu::Main))
            }
            Action::Confirm if console_open => {
                self.console.run(&mut self.clock_screen.clock, &self.l10n);
                self.after_console_edit()
            }
            Action::InsertChar(ch) if console_open => {
                self.console.input.insert_char(ch);
                self.after_console_edit()
            }
            Action::InsertChar(ch) if on_clock => {
                let mut buf = [0u8; 4];
                AppResult::from_changed(self.clock_screen.clock.resize_key(ch.encode_utf8(&mut buf)))
            }
            _ if console_open => self.edit_console_input(action),
            _ => AppResult::Ok,
        }
    }

    fn edit_console_input(&mut self, action: Action) -> AppResult {
        let console = &mut self.console;
        match action {
            Action::HistoryUp => console.history_up(),
            Action::HistoryDown => console.history_down(),
            Action::Backspace => console.input.backspace(),
            Action::Delete => console.input.delete(),
            Action::DeleteWordLeft => console.input.delete_word_left(),
            Action::CursorLeft => console.input.move_left(),
            Action::CursorRight => console.input.move_right(),
            Action::CursorStart => console.input.move_to_start(),
            Action::CursorEnd => console.input.move_to_end(),
            _ => return AppResult::Ok,
        }
        self.after_console_edit()
    }

    fn after_console_edit(&mut self) -> AppResult {
        let visible_width = self.width - 2.0 * crate::config::layout::PADDING * self.scale;
        let char_width = self.renderer.console_char_width();
        self.console.input.ensure_cursor_visible(visible_width, char_width);
        self.state.reset_cursor_blink();
        AppResult::Redraw
    }
}
