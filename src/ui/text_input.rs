//! Single-line text input for the console prompt

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    /// Byte index into `text`, always on a char boundary
    cursor: usize,
    pub scroll_offset: f32,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the contents and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().filter(|c| !c.is_control()).collect();
        self.cursor = self.text.len();
        self.scroll_offset = 0.0;
    }

    /// Clear the input and return what was typed.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        self.scroll_offset = 0.0;
        std::mem::take(&mut self.text)
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.insert_char(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.text.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn delete_word_left(&mut self) {
        let start = self.word_boundary_left();
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    fn word_boundary_left(&self) -> usize {
        let before = &self.text[..self.cursor];
        let trimmed = before.trim_end();
        trimmed
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(0, |(idx, ch)| idx + ch.len_utf8())
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Characters before the cursor, for positioning the caret.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    pub fn ensure_cursor_visible(&mut self, visible_width: f32, char_width: f32) {
        let cursor_x = self.cursor_column() as f32 * char_width;

        if cursor_x < self.scroll_offset {
            self.scroll_offset = cursor_x;
        }
        if cursor_x + char_width > self.scroll_offset + visible_width {
            self.scroll_offset = cursor_x - visible_width + char_width * 2.0;
        }
        self.scroll_offset = self.scroll_offset.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_editing() {
        let mut input = TextInput::new();
        input.insert_str("clock.hour");
        input.move_left();
        input.move_left();
        input.insert_char('X');
        assert_eq!(input.text(), "clock.hoXur");
        input.backspace();
        input.delete();
        assert_eq!(input.text(), "clock.hor");
        input.insert_char('\n');
        assert_eq!(input.text(), "clock.hor");
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut input = TextInput::new();
        input.insert_str("°é");
        input.move_left();
        assert_eq!(input.cursor_column(), 1);
        input.backspace();
        assert_eq!(input.text(), "é");
        input.move_right();
        assert_eq!(input.cursor(), "é".len());
    }

    #[test]
    fn test_delete_word_left() {
        let mut input = TextInput::new();
        input.insert_str("clock.face.scale = 2  ");
        input.delete_word_left();
        assert_eq!(input.text(), "clock.face.scale = ");
        input.delete_word_left();
        assert_eq!(input.text(), "clock.face.scale ");
        input.move_to_start();
        input.delete_word_left();
        assert_eq!(input.text(), "clock.face.scale ");
    }

    #[test]
    fn test_take_and_set() {
        let mut input = TextInput::new();
        input.set_text("list_commands");
        assert_eq!(input.cursor(), 13);
        assert_eq!(input.take(), "list_commands");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut input = TextInput::new();
        input.insert_str(&"x".repeat(50));
        input.ensure_cursor_visible(100.0, 10.0);
        assert!(input.scroll_offset > 0.0);
        input.move_to_start();
        input.ensure_cursor_visible(100.0, 10.0);
        assert_eq!(input.scroll_offset, 0.0);
    }
}
