use tracing::{debug, warn};

use super::{App, AppAction, AppActionContext, AppCommand};
use crate::core::message::Message;
use crate::core::typing::{RevealBuffer, RevealStep};

pub(super) fn handle_turn_action(
    app: &mut App,
    action: AppAction,
    _ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::CompletionSucceeded { text, request_id } => {
            if !app.session.is_current_request(request_id) {
                debug!(request_id, "dropping reply for superseded request");
                return None;
            }
            app.session.finish_request();
            app.conversation.awaiting_response = false;
            start_playback(app, text)
        }
        AppAction::CompletionFailed { error, request_id } => {
            if !app.session.is_current_request(request_id) {
                return None;
            }
            app.session.finish_request();
            app.conversation.awaiting_response = false;
            warn!(request_id, %error, "completion failed; turn dropped");
            None
        }
        AppAction::RevealTick { playback_id } => {
            if !app.session.is_current_playback(playback_id) {
                return None;
            }
            advance_playback(app);
            None
        }
        _ => unreachable!("non-turn action routed to turn handler"),
    }
}

fn start_playback(app: &mut App, text: String) -> Option<AppCommand> {
    let buffer = RevealBuffer::new(text);
    let params = app.session.playback_params(&buffer);
    app.conversation.reveal = Some(buffer);
    app.ui.scroll_back = 0;
    Some(AppCommand::StartPlayback(params))
}

fn advance_playback(app: &mut App) {
    let Some(buffer) = app.conversation.reveal.as_mut() else {
        return;
    };

    if buffer.advance() == RevealStep::Complete {
        if let Some(buffer) = app.conversation.reveal.take() {
            app.conversation
                .messages
                .append(Message::assistant(buffer.into_text()));
        }
        app.session.finish_playback();
    }
}
