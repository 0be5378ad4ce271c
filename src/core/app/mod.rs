//! Conversation view state and the reducer that drives it.
//!
//! Everything the chat screen shows lives in one [`App`]. Terminal input,
//! completion replies and playback ticks all arrive as [`AppAction`]s and
//! are folded into the state by [`apply_actions`], which returns the
//! background work ([`AppCommand`]) the event loop should start. Nothing in
//! here touches the terminal or the network directly.

pub mod actions;

use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::core::completion::{build_request, CompletionParams};
use crate::core::constants::MAX_INPUT_LENGTH;
use crate::core::keyboard::KeyboardTracker;
use crate::core::message::{Message, MessageLog};
use crate::core::sheet::{SheetController, SheetPhase};
use crate::core::suggestions::Suggestion;
use crate::core::typing::{PlaybackParams, RevealBuffer};
use crate::utils::line_editor::LineEditorState;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};

/// Transcript, compose box and turn progress.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub messages: MessageLog,
    pub compose: LineEditorState,
    pub awaiting_response: bool,
    /// Assistant reply currently being played back; not yet in `messages`.
    pub reveal: Option<RevealBuffer>,
    /// Starter suggestions and logo. Cleared by the first submit.
    pub affordances_visible: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            messages: MessageLog::new(),
            compose: LineEditorState::default(),
            awaiting_response: false,
            reveal: None,
            affordances_visible: true,
        }
    }

    pub fn compose_text(&self) -> &str {
        &self.compose.text
    }

    /// Replace the compose text, moving the cursor to the end.
    ///
    /// Returns `false`, leaving the state untouched, when `candidate` is
    /// longer than [`MAX_INPUT_LENGTH`] characters.
    pub fn set_text(&mut self, candidate: impl Into<String>) -> bool {
        self.accept_compose(LineEditorState::with_text(candidate.into()))
    }

    /// Accept an edited compose state if it fits the length limit.
    pub fn accept_compose(&mut self, candidate: LineEditorState) -> bool {
        if candidate.char_len() > MAX_INPUT_LENGTH {
            return false;
        }
        self.compose = candidate;
        true
    }

    /// A turn is in flight: either awaiting the reply or playing it back.
    pub fn is_busy(&self) -> bool {
        self.awaiting_response || self.reveal.is_some()
    }
}

/// Connection details plus the bookkeeping for in-flight background work.
pub struct SessionContext {
    pub client: reqwest::Client,
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub current_request_id: u64,
    pub request_cancel_token: Option<CancellationToken>,
    pub current_playback_id: u64,
    pub playback_cancel_token: Option<CancellationToken>,
}

impl SessionContext {
    pub fn new(model: String, api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            model,
            api_key,
            base_url,
            current_request_id: 0,
            request_cancel_token: None,
            current_playback_id: 0,
            playback_cancel_token: None,
        }
    }

    /// Prepare a completion request for `new_user_text`, superseding any
    /// earlier request.
    pub fn completion_params(&mut self, history: &[Message], new_user_text: &str) -> CompletionParams {
        if let Some(token) = self.request_cancel_token.take() {
            token.cancel();
        }
        self.current_request_id += 1;
        let cancel_token = CancellationToken::new();
        self.request_cancel_token = Some(cancel_token.clone());

        CompletionParams {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            request: build_request(&self.model, history, new_user_text),
            cancel_token,
            request_id: self.current_request_id,
        }
    }

    /// Prepare a playback ticker for `buffer`, superseding any earlier one.
    pub fn playback_params(&mut self, buffer: &RevealBuffer) -> PlaybackParams {
        if let Some(token) = self.playback_cancel_token.take() {
            token.cancel();
        }
        self.current_playback_id += 1;
        let cancel_token = CancellationToken::new();
        self.playback_cancel_token = Some(cancel_token.clone());

        PlaybackParams {
            playback_id: self.current_playback_id,
            ticks: buffer.ticks_needed(),
            cancel_token,
        }
    }

    pub fn is_current_request(&self, request_id: u64) -> bool {
        self.request_cancel_token.is_some() && request_id == self.current_request_id
    }

    pub fn is_current_playback(&self, playback_id: u64) -> bool {
        self.playback_cancel_token.is_some() && playback_id == self.current_playback_id
    }

    pub fn finish_request(&mut self) {
        self.request_cancel_token = None;
    }

    pub fn finish_playback(&mut self) {
        self.playback_cancel_token = None;
    }

    /// Cancel every background task tied to this session.
    pub fn cancel_all(&mut self) {
        if let Some(token) = self.request_cancel_token.take() {
            token.cancel();
        }
        if let Some(token) = self.playback_cancel_token.take() {
            token.cancel();
        }
    }
}

/// Presentation state that does not affect the conversation.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Dark palette when `true`, light otherwise.
    pub dark_mode: bool,
    pub keyboard: KeyboardTracker,
    pub sheet: SheetController,
    pub suggestions: Vec<Suggestion>,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll_back: u16,
    pub exit_requested: bool,
}

impl UiState {
    pub fn new(dark_mode: bool, suggestions: Vec<Suggestion>) -> Self {
        Self {
            dark_mode,
            keyboard: KeyboardTracker::new(),
            sheet: SheetController::new(),
            suggestions,
            scroll_back: 0,
            exit_requested: false,
        }
    }
}

pub struct App {
    pub conversation: ConversationState,
    pub session: SessionContext,
    pub ui: UiState,
}

impl App {
    pub fn new(session: SessionContext, ui: UiState) -> Self {
        Self {
            conversation: ConversationState::new(),
            session,
            ui,
        }
    }

    /// Whether any time-driven transition still needs frames.
    ///
    /// A dismissing sheet counts until a frame has moved it to closed.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.ui.keyboard.is_animating(now)
            || self.ui.sheet.is_animating(now)
            || self.ui.sheet.phase() == SheetPhase::Dismissing
    }
}

/// Tearing down the view cancels any request or playback still running.
impl Drop for App {
    fn drop(&mut self) {
        self.session.cancel_all();
    }
}
