use std::time::Instant;

use crate::core::app::{App, AppActionContext, SessionContext, UiState};
use crate::core::suggestions::BUILTIN_SUGGESTIONS;

pub const TERM_WIDTH: u16 = 80;
pub const TERM_HEIGHT: u16 = 24;

pub fn create_test_app() -> App {
    let session = SessionContext::new(
        "test-model".to_string(),
        "test-key".to_string(),
        "https://api.test.com/v1".to_string(),
    );
    let ui = UiState::new(true, BUILTIN_SUGGESTIONS[..3].to_vec());
    App::new(session, ui)
}

pub fn test_context(now: Instant) -> AppActionContext {
    AppActionContext {
        term_width: TERM_WIDTH,
        term_height: TERM_HEIGHT,
        now,
    }
}
