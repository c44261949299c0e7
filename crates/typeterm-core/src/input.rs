//! Line-buffered keyboard input.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key as the console sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    Enter,
    Backspace,
    /// Any other key. Ignored by the buffer.
    Other,
}

impl Key {
    /// Classify a crossterm key event. Returns `None` for key releases, which
    /// must not be treated as a second keystroke.
    pub fn from_event(event: &KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let key = match event.code {
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Char(c)
                if !c.is_control()
                    && !event
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Key::Char(c)
            }
            _ => Key::Other,
        };
        Some(key)
    }
}

/// What a keystroke did to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// The buffer changed.
    Edited,
    /// Enter on a non-blank line: carries the line exactly as typed.
    Submitted(String),
    /// Nothing happened.
    Ignored,
}

/// A single line of keyboard input.
///
/// Input is accepted at all times; nothing here knows whether a reveal is in
/// progress.
#[derive(Debug, Default, Clone)]
pub struct InputBuffer {
    value: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current, untrimmed line.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Apply one keystroke.
    pub fn handle(&mut self, key: Key) -> InputOutcome {
        match key {
            Key::Char(c) => {
                self.value.push(c);
                InputOutcome::Edited
            }
            Key::Backspace => {
                if self.value.pop().is_some() {
                    InputOutcome::Edited
                } else {
                    InputOutcome::Ignored
                }
            }
            Key::Enter => match self.submit() {
                Some(line) => InputOutcome::Submitted(line),
                None => InputOutcome::Ignored,
            },
            Key::Other => InputOutcome::Ignored,
        }
    }

    /// Take the line if it has any non-whitespace content, leaving the buffer
    /// empty. A blank line stays in place untouched.
    pub fn submit(&mut self) -> Option<String> {
        if self.value.trim().is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.value))
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputBuffer {
        let mut buf = InputBuffer::new();
        for c in s.chars() {
            buf.handle(Key::Char(c));
        }
        buf
    }

    #[test]
    fn chars_append() {
        let buf = typed("help");
        assert_eq!(buf.value(), "help");
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut buf = typed("héllo");
        assert_eq!(buf.handle(Key::Backspace), InputOutcome::Edited);
        assert_eq!(buf.value(), "héll");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut buf = InputBuffer::new();
        assert_eq!(buf.handle(Key::Backspace), InputOutcome::Ignored);
        assert_eq!(buf.value(), "");
    }

    #[test]
    fn enter_submits_untrimmed_and_resets() {
        let mut buf = typed("  Help ");
        assert_eq!(
            buf.handle(Key::Enter),
            InputOutcome::Submitted("  Help ".to_string())
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn enter_on_blank_keeps_buffer() {
        let mut buf = typed("   ");
        assert_eq!(buf.handle(Key::Enter), InputOutcome::Ignored);
        assert_eq!(buf.value(), "   ");

        let mut empty = InputBuffer::new();
        assert_eq!(empty.handle(Key::Enter), InputOutcome::Ignored);
        assert_eq!(empty.value(), "");
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut buf = typed("ab");
        assert_eq!(buf.handle(Key::Other), InputOutcome::Ignored);
        assert_eq!(buf.value(), "ab");
    }

    #[test]
    fn key_from_event() {
        let press = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(Key::from_event(&press), Some(Key::Char('x')));

        let shifted = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        assert_eq!(Key::from_event(&shifted), Some(Key::Char('X')));

        let ctrl = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from_event(&ctrl), Some(Key::Other));

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(Key::from_event(&enter), Some(Key::Enter));

        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(Key::from_event(&tab), Some(Key::Other));

        let release = KeyEvent::new_with_kind(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(Key::from_event(&release), None);
    }
}
