//! Shared constants used across the application

use std::time::Duration;

/// Maximum number of characters the compose box accepts.
pub const MAX_INPUT_LENGTH: usize = 100;

/// Delay between revealed characters during typing playback.
pub const TYPING_TICK: Duration = Duration::from_millis(15);

/// Response-length cap sent with every completion request.
pub const MAX_TOKENS: u32 = 150;

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f32 = 0.7;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Persona instruction prepended to every request.
pub const SYSTEM_PROMPT: &str = "You are Cutie, a chat assistant who can barely be bothered. \
Answer with as little effort as possible: short, curt, a bit dismissive, full of casual slang. \
Never use exclamation marks and never sound excited. \
Always reply in the same language the user wrote in. \
Never start a reply with the word \"oh\".";

/// Gesture distance, in units, a press must travel before it counts as a drag.
pub const SHEET_DRAG_THRESHOLD: f32 = 5.0;

/// Downward displacement, in units, past which releasing a drag closes the sheet.
pub const SHEET_DISMISS_DISTANCE: f32 = 50.0;

/// Offset the sheet slides to when dismissed.
pub const SHEET_OFFSCREEN_OFFSET: f32 = 1000.0;

pub const SHEET_ANIMATION: Duration = Duration::from_millis(300);

/// Duration reported with compose focus changes.
pub const KEYBOARD_ANIMATION: Duration = Duration::from_millis(250);

/// Height, in rows, of the key-hint panel that stands in for the on-screen keyboard.
pub const KEYBOARD_PANEL_ROWS: f32 = 4.0;

/// Gesture units per terminal row.
pub const ROW_UNITS: f32 = 10.0;

/// Number of starter suggestions shown before the first turn.
pub const SUGGESTION_COUNT: usize = 3;
