use tracing::debug;

use super::{App, AppAction, AppActionContext, AppCommand};
use crate::core::constants::KEYBOARD_ANIMATION;
use crate::core::keyboard::KeyboardEvent;
use crate::core::message::Message;
use crate::utils::line_editor::preview_edit;

pub(super) fn handle_input_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Option<AppCommand> {
    // The sheet is modal, including for input queued before it opened.
    if app.ui.sheet.is_visible() {
        debug!("compose input ignored while the sheet is visible");
        return None;
    }

    match action {
        AppAction::EditCompose { edit } => {
            let candidate = preview_edit(&app.conversation.compose, &edit);
            if !app.conversation.accept_compose(candidate) {
                debug!("compose edit rejected: over length limit");
            }
            None
        }
        AppAction::SetComposeText { text } => {
            app.conversation.set_text(text);
            None
        }
        AppAction::PickSuggestion { index } => {
            if !app.conversation.affordances_visible {
                return None;
            }
            if let Some(suggestion) = app.ui.suggestions.get(index) {
                app.conversation.set_text(suggestion.prompt());
            }
            None
        }
        AppAction::SubmitMessage => submit_message(app, ctx),
        _ => unreachable!("non-input action routed to input handler"),
    }
}

fn submit_message(app: &mut App, ctx: AppActionContext) -> Option<AppCommand> {
    if app.conversation.compose_text().trim().is_empty() {
        return None;
    }
    if app.conversation.is_busy() {
        debug!("submit ignored: a turn is already in flight");
        return None;
    }

    // The emptiness check trims; the stored turn keeps the text as typed.
    let text = std::mem::take(&mut app.conversation.compose).text;
    let params = app
        .session
        .completion_params(app.conversation.messages.as_slice(), &text);

    app.conversation.messages.append(Message::user(text));
    app.conversation.affordances_visible = false;
    app.conversation.awaiting_response = true;
    app.ui.scroll_back = 0;
    app.ui.keyboard.handle(
        KeyboardEvent::WillHide {
            duration: KEYBOARD_ANIMATION,
        },
        ctx.now,
    );

    debug!(request_id = params.request_id, "submitted turn");
    Some(AppCommand::SpawnCompletion(params))
}
