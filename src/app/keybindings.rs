//! Keyboard shortcut registry
//!
//! Maps keyboard input to Actions. Whether an action applies (console open,
//! clock shown) is decided by `App::execute`.

use super::action::Action;

/// Modifier key state
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Represents a key that can be pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Space,
}

/// A keyboard input event (key + modifiers)
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Resolve a key event to an action
///
/// Returns None if the key event doesn't map to any action.
pub fn resolve(event: &KeyEvent) -> Option<Action> {
    let KeyEvent { key, modifiers } = event;
    let Modifiers { ctrl, alt } = *modifiers;

    match key {
        Key::Escape => Some(Action::Cancel),
        Key::Enter => Some(Action::Confirm),

        Key::Backspace if ctrl => Some(Action::DeleteWordLeft),
        Key::Backspace => Some(Action::Backspace),
        Key::Delete => Some(Action::Delete),

        Key::ArrowLeft => Some(Action::CursorLeft),
        Key::ArrowRight => Some(Action::CursorRight),
        Key::ArrowUp => Some(Action::HistoryUp),
        Key::ArrowDown => Some(Action::HistoryDown),
        Key::Home => Some(Action::CursorStart),
        Key::End => Some(Action::CursorEnd),

        Key::Space if !ctrl && !alt => Some(Action::InsertChar(' ')),

        Key::Char('`') | Key::Char('~') => Some(Action::ToggleConsole),
        Key::Char(c) if !ctrl && !alt => Some(Action::InsertChar(*c)),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_and_tilde_toggle_console() {
        let event = KeyEvent::new(Key::Char('`'), Modifiers::none());
        assert_eq!(resolve(&event), Some(Action::ToggleConsole));
        let event = KeyEvent::new(Key::Char('~'), Modifiers::none());
        assert_eq!(resolve(&event), Some(Action::ToggleConsole));
    }

    #[test]
    fn test_regular_char() {
        let event = KeyEvent::new(Key::Char('='), Modifiers::none());
        assert_eq!(resolve(&event), Some(Action::InsertChar('=')));
        let event = KeyEvent::new(Key::Char('a'), Modifiers::ctrl());
        assert_eq!(resolve(&event), None);
    }

    #[test]
    fn test_editing_keys() {
        let event = KeyEvent::new(Key::Backspace, Modifiers::ctrl());
        assert_eq!(resolve(&event), Some(Action::DeleteWordLeft));
        let event = KeyEvent::new(Key::ArrowUp, Modifiers::none());
        assert_eq!(resolve(&event), Some(Action::HistoryUp));
        let event = KeyEvent::new(Key::Escape, Modifiers::none());
        assert_eq!(resolve(&event), Some(Action::Cancel));
    }
}
