use unicode_width::UnicodeWidthStr;

/// Placeholder shown while the input is empty
pub const PLACEHOLDER: &str = "Search for books...";

/// Editable input line for the TUI.
///
/// `cursor_pos` is a byte offset that always sits on a char boundary.
#[derive(Debug, Default)]
pub struct SearchInput {
    text: String,
    cursor_pos: usize,
}

impl SearchInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// Display columns between the start of the input and the cursor
    pub fn cursor_column(&self) -> u16 {
        u16::try_from(self.text[..self.cursor_pos].width()).unwrap_or(u16::MAX)
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    /// Remove the char before the cursor. Returns whether the text changed.
    pub fn backspace(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => {
                self.text.remove(prev);
                self.cursor_pos = prev;
                true
            }
            None => false,
        }
    }

    /// Remove the char under the cursor. Returns whether the text changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor_pos < self.text.len() {
            self.text.remove(self.cursor_pos);
            true
        } else {
            false
        }
    }

    /// Returns whether there was anything to clear
    pub fn clear(&mut self) -> bool {
        let had_text = !self.text.is_empty();
        self.text.clear();
        self.cursor_pos = 0;
        had_text
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor_pos = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor_pos..].chars().next() {
            self.cursor_pos += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.text.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
    }
}
