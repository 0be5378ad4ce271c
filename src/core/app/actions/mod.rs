mod input;
mod turn;
mod view;

use std::time::Instant;

use tokio::sync::mpsc;

use super::App;
use crate::core::completion::{CompletionError, CompletionParams};
use crate::core::keyboard::KeyboardEvent;
use crate::core::typing::PlaybackParams;
use crate::utils::line_editor::LineEditAction;

pub enum AppAction {
    EditCompose {
        edit: LineEditAction,
    },
    SetComposeText {
        text: String,
    },
    PickSuggestion {
        index: usize,
    },
    SubmitMessage,
    CompletionSucceeded {
        text: String,
        request_id: u64,
    },
    CompletionFailed {
        error: CompletionError,
        request_id: u64,
    },
    RevealTick {
        playback_id: u64,
    },
    Keyboard {
        event: KeyboardEvent,
    },
    OpenSheet,
    DismissSheet,
    SheetPointerDown {
        y: f32,
    },
    SheetPointerMove {
        y: f32,
    },
    SheetPointerUp,
    ToggleTheme,
    ScrollTranscript {
        lines: i32,
    },
    AnimationFrame,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
    /// Moment the action is applied; drives animations.
    pub now: Instant,
}

impl Default for AppActionContext {
    fn default() -> Self {
        Self {
            term_width: 0,
            term_height: 0,
            now: Instant::now(),
        }
    }
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

/// Background work requested by the reducer.
pub enum AppCommand {
    SpawnCompletion(CompletionParams),
    StartPlayback(PlaybackParams),
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    match action {
        AppAction::EditCompose { .. }
        | AppAction::SetComposeText { .. }
        | AppAction::PickSuggestion { .. }
        | AppAction::SubmitMessage => input::handle_input_action(app, action, ctx),

        AppAction::CompletionSucceeded { .. }
        | AppAction::CompletionFailed { .. }
        | AppAction::RevealTick { .. } => turn::handle_turn_action(app, action, ctx),

        AppAction::Keyboard { .. }
        | AppAction::OpenSheet
        | AppAction::DismissSheet
        | AppAction::SheetPointerDown { .. }
        | AppAction::SheetPointerMove { .. }
        | AppAction::SheetPointerUp
        | AppAction::ToggleTheme
        | AppAction::ScrollTranscript { .. }
        | AppAction::AnimationFrame
        | AppAction::Quit => view::handle_view_action(app, action, ctx),
    }
}
