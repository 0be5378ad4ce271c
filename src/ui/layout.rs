//! Screen geometry for the chat view.
//!
//! Everything here is pure: given the frame area and the animated offsets
//! sampled for the current frame, compute where each region goes. The event
//! loop uses the same functions for mouse hit-testing so the sheet a user
//! grabs is exactly the sheet that was drawn.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::core::constants::ROW_UNITS;

pub const HEADER_HEIGHT: u16 = 2;
pub const INPUT_HEIGHT: u16 = 3;
pub const SUGGESTIONS_HEIGHT: u16 = 5;

/// Regions of the chat screen for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub transcript: Rect,
    pub suggestions: Option<Rect>,
    pub input: Rect,
    pub key_hints: Option<Rect>,
}

impl ScreenLayout {
    /// Split `area` top to bottom: header, transcript, optional suggestion
    /// row, input bar, then the key-hint panel raised by `keyboard_rows`.
    pub fn compute(area: Rect, keyboard_rows: u16, show_suggestions: bool) -> Self {
        let mut remaining = area.height;

        let header_height = HEADER_HEIGHT.min(remaining);
        remaining -= header_height;

        let input_height = INPUT_HEIGHT.min(remaining);
        remaining -= input_height;

        let hint_height = keyboard_rows.min(remaining);
        remaining -= hint_height;

        let suggestion_height = if show_suggestions && remaining > SUGGESTIONS_HEIGHT {
            SUGGESTIONS_HEIGHT
        } else {
            0
        };
        remaining -= suggestion_height;

        let mut y = area.y;
        let mut take = |height: u16| {
            let rect = Rect::new(area.x, y, area.width, height);
            y += height;
            rect
        };

        let header = take(header_height);
        let transcript = take(remaining);
        let suggestions = take(suggestion_height);
        let input = take(input_height);
        let key_hints = take(hint_height);

        Self {
            header,
            transcript,
            suggestions: (suggestion_height > 0).then_some(suggestions),
            input,
            key_hints: (hint_height > 0).then_some(key_hints),
        }
    }
}

/// Convert a gesture offset into whole terminal rows.
pub fn units_to_rows(units: f32) -> u16 {
    if units <= 0.0 {
        return 0;
    }
    (units / ROW_UNITS).round().min(f32::from(u16::MAX)) as u16
}

/// Convert a terminal row into gesture units.
pub fn row_to_units(row: u16) -> f32 {
    f32::from(row) * ROW_UNITS
}

/// Rest position of the sheet: the lower two thirds of the screen.
pub fn sheet_rest_area(area: Rect) -> Rect {
    let height = (area.height.saturating_mul(2) / 3).max(1).min(area.height);
    Rect::new(area.x, area.bottom() - height, area.width, height)
}

/// Sheet area pushed down by `offset_units`, clipped to the screen.
///
/// Returns `None` once the sheet has slid entirely off the bottom edge.
/// Upward drags are drawn at the rest position.
pub fn sheet_area(area: Rect, offset_units: f32) -> Option<Rect> {
    let rest = sheet_rest_area(area);
    let shift = units_to_rows(offset_units);
    if shift >= rest.height {
        return None;
    }
    Some(Rect::new(
        rest.x,
        rest.y + shift,
        rest.width,
        rest.height - shift,
    ))
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Word-wrap `text` to `width` display columns.
///
/// Explicit newlines always break. Words longer than `width` are split at
/// the column limit. Leading spaces after a soft break are dropped.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0usize;

        for word in split_keep_spaces(paragraph) {
            let word_width: usize = word.chars().map(char_width).sum();
            let is_space = word.starts_with(' ');

            if line_width + word_width <= width {
                line.push_str(word);
                line_width += word_width;
                continue;
            }
            if is_space {
                push_soft_line(&mut lines, &mut line);
                line_width = 0;
                continue;
            }
            if line_width > 0 {
                push_soft_line(&mut lines, &mut line);
                line_width = 0;
            }
            for ch in word.chars() {
                let w = char_width(ch);
                if line_width + w > width && line_width > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(ch);
                line_width += w;
            }
        }
        lines.push(line);
    }
    lines
}

/// Longest display width among `lines`.
pub fn max_line_width(lines: &[String]) -> usize {
    lines
        .iter()
        .map(|line| line.chars().map(char_width).sum())
        .max()
        .unwrap_or(0)
}

/// Visible slice of the compose text for a box `width` columns wide, and
/// the cursor column within it.
///
/// The window scrolls horizontally so the cursor stays in view.
pub fn input_window(text: &str, cursor: usize, width: usize) -> (String, u16) {
    if width == 0 {
        return (String::new(), 0);
    }

    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());

    // Walk back from the cursor until the window is full; one column is
    // kept free for the cursor itself.
    let mut start = cursor;
    let mut used = 0usize;
    while start > 0 {
        let w = char_width(chars[start - 1]);
        if used + w >= width {
            break;
        }
        used += w;
        start -= 1;
    }

    let mut visible = String::new();
    let mut visible_width = 0usize;
    for &ch in &chars[start..] {
        let w = char_width(ch);
        if visible_width + w > width {
            break;
        }
        visible.push(ch);
        visible_width += w;
    }

    (visible, used as u16)
}

fn push_soft_line(lines: &mut Vec<String>, line: &mut String) {
    let mut done = std::mem::take(line);
    done.truncate(done.trim_end_matches(' ').len());
    lines.push(done);
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Split into alternating runs of spaces and non-spaces.
fn split_keep_spaces(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (idx, ch) in text.char_indices() {
        let space = ch == ' ';
        match in_space {
            Some(prev) if prev != space => {
                parts.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}
