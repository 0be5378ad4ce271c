//! Single-line editing primitives for the compose box.
//!
//! Edits never mutate in place: [`preview_edit`] produces the candidate
//! state so the caller can decide whether to accept it (the compose box
//! rejects candidates over its length limit).

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditorState {
    pub text: String,
    /// Cursor position in characters.
    pub cursor: usize,
}

impl LineEditorState {
    pub fn with_text(text: String) -> Self {
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditAction {
    Insert(char),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveStart,
    MoveEnd,
    DeleteToEnd,
    DeleteWord,
    ClearAll,
    Paste(String),
}

fn byte_index(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Compute the state an edit would produce.
pub fn preview_edit(state: &LineEditorState, action: &LineEditAction) -> LineEditorState {
    let mut next = state.clone();
    let len = state.char_len();
    next.cursor = next.cursor.min(len);

    match action {
        LineEditAction::Insert(c) => {
            let idx = byte_index(&next.text, next.cursor);
            next.text.insert(idx, *c);
            next.cursor += 1;
        }
        LineEditAction::Paste(text) => {
            let idx = byte_index(&next.text, next.cursor);
            next.text.insert_str(idx, text);
            next.cursor += text.chars().count();
        }
        LineEditAction::Backspace => {
            if next.cursor > 0 {
                let start = byte_index(&next.text, next.cursor - 1);
                let end = byte_index(&next.text, next.cursor);
                next.text.replace_range(start..end, "");
                next.cursor -= 1;
            }
        }
        LineEditAction::Delete => {
            if next.cursor < len {
                let start = byte_index(&next.text, next.cursor);
                let end = byte_index(&next.text, next.cursor + 1);
                next.text.replace_range(start..end, "");
            }
        }
        LineEditAction::MoveLeft => next.cursor = next.cursor.saturating_sub(1),
        LineEditAction::MoveRight => next.cursor = (next.cursor + 1).min(len),
        LineEditAction::MoveStart => next.cursor = 0,
        LineEditAction::MoveEnd => next.cursor = len,
        LineEditAction::DeleteToEnd => {
            let idx = byte_index(&next.text, next.cursor);
            next.text.truncate(idx);
        }
        LineEditAction::DeleteWord => {
            let chars: Vec<char> = next.text.chars().collect();
            let mut start = next.cursor;
            while start > 0 && chars[start - 1].is_whitespace() {
                start -= 1;
            }
            while start > 0 && !chars[start - 1].is_whitespace() {
                start -= 1;
            }
            let from = byte_index(&next.text, start);
            let to = byte_index(&next.text, next.cursor);
            next.text.replace_range(from..to, "");
            next.cursor = start;
        }
        LineEditAction::ClearAll => {
            next.text.clear();
            next.cursor = 0;
        }
    }

    next
}

/// Map a key press to an edit, if it is one.
pub fn map_key_event_to_action(key: &KeyEvent) -> Option<LineEditAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Backspace => Some(LineEditAction::Backspace),
        KeyCode::Delete => Some(LineEditAction::Delete),
        KeyCode::Left => Some(LineEditAction::MoveLeft),
        KeyCode::Right => Some(LineEditAction::MoveRight),
        KeyCode::Home => Some(LineEditAction::MoveStart),
        KeyCode::End => Some(LineEditAction::MoveEnd),
        KeyCode::Char('a') if ctrl => Some(LineEditAction::MoveStart),
        KeyCode::Char('e') if ctrl => Some(LineEditAction::MoveEnd),
        KeyCode::Char('k') if ctrl => Some(LineEditAction::DeleteToEnd),
        KeyCode::Char('w') if ctrl => Some(LineEditAction::DeleteWord),
        KeyCode::Char('u') if ctrl => Some(LineEditAction::ClearAll),
        KeyCode::Char(c) if !ctrl && !c.is_control() => Some(LineEditAction::Insert(c)),
        _ => None,
    }
}

/// Flatten pasted text to a single line.
pub fn sanitize_pasted_text(text: &str) -> String {
    text.replace("\r\n", " ")
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            other => other,
        })
        .filter(|c| !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str, cursor: usize) -> LineEditorState {
        LineEditorState {
            text: text.to_string(),
            cursor,
        }
    }

    #[test]
    fn insert_and_backspace_respect_cursor() {
        let next = preview_edit(&state("helo", 3), &LineEditAction::Insert('l'));
        assert_eq!(next, state("hello", 4));

        let next = preview_edit(&next, &LineEditAction::Backspace);
        assert_eq!(next, state("helo", 3));
    }

    #[test]
    fn preview_leaves_original_untouched() {
        let original = state("abc", 3);
        let _ = preview_edit(&original, &LineEditAction::ClearAll);
        assert_eq!(original, state("abc", 3));
    }

    #[test]
    fn delete_word_removes_previous_word_and_spacing() {
        let next = preview_edit(&state("hey there  ", 11), &LineEditAction::DeleteWord);
        assert_eq!(next, state("hey ", 4));
    }

    #[test]
    fn edits_handle_multibyte_text() {
        let next = preview_edit(&state("añb", 2), &LineEditAction::Backspace);
        assert_eq!(next, state("ab", 1));

        let next = preview_edit(&state("añb", 1), &LineEditAction::Delete);
        assert_eq!(next, state("ab", 1));
    }

    #[test]
    fn paste_moves_cursor_past_inserted_text() {
        let next = preview_edit(&state("ad", 1), &LineEditAction::Paste("bc".into()));
        assert_eq!(next, state("abcd", 3));
    }

    #[test]
    fn sanitize_flattens_newlines_and_tabs() {
        assert_eq!(sanitize_pasted_text("a\r\nb\tc\nd\u{7}"), "a b c d");
    }

    #[test]
    fn control_chords_map_to_edits() {
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event_to_action(&key), Some(LineEditAction::ClearAll));

        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(map_key_event_to_action(&key), Some(LineEditAction::Insert('x')));

        let key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event_to_action(&key), None);
    }
}
