use crossterm::event::{KeyCode, KeyEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line text input for the chat question box.
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl LineInput {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled
    /// rendering. When the cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        if self.cursor >= self.text.chars().count() {
            (&self.text, None, "")
        } else {
            let ch = self.text[byte_offset..].chars().next().unwrap_or(' ');
            let next_byte = byte_offset + ch.len_utf8();
            (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right => {
                if self.cursor < self.text.chars().count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte = self.char_to_byte(self.cursor);
                    self.text.remove(byte);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.chars().count() {
                    let byte = self.char_to_byte(self.cursor);
                    self.text.remove(byte);
                }
            }
            KeyCode::Char(ch) => {
                let byte = self.char_to_byte(self.cursor);
                self.text.insert(byte, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }
}

impl Default for LineInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut input = LineInput::new();
        for ch in "why?".chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
        assert_eq!(input.value(), "why?");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
    }

    #[test]
    fn test_mid_string_editing() {
        let mut input = LineInput::new();
        for ch in "abd".chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Char('c')));
        assert_eq!(input.value(), "abcd");

        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "abd");
    }

    #[test]
    fn test_multibyte_chars() {
        let mut input = LineInput::new();
        input.handle(key(KeyCode::Char('é')));
        input.handle(key(KeyCode::Char('x')));
        input.handle(key(KeyCode::Home));
        let (before, cursor, after) = input.render_parts();
        assert_eq!(before, "");
        assert_eq!(cursor, Some('é'));
        assert_eq!(after, "x");
    }
}
