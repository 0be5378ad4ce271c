//! Event polling, dispatching, and UI rendering loop.
//!
//! The loop owns the [`App`] outright. Terminal input, completion replies
//! and playback ticks are turned into [`AppAction`]s, folded into the state
//! by [`apply_actions`], and any background work the reducer asks for is
//! started here. Background tasks only ever talk back through channels.

pub mod keybindings;
pub mod lifecycle;

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::prelude::Size;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::app::{
    apply_actions, App, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope,
    AppCommand,
};
use crate::core::completion::{CompletionMessage, CompletionService};
use crate::core::typing::TypingPlayback;
use crate::ui::layout::sheet_area;
use crate::ui::renderer::ui;
use crate::utils::line_editor::{sanitize_pasted_text, LineEditAction};

use self::keybindings::{map_key_event, map_mouse_event, KeyContext};
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn try_draw_frame(
    app: &App,
    terminal: &mut ChatTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    terminal.draw(|f| ui(f, app, now))?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

fn current_terminal_size(terminal: &ChatTerminal) -> Size {
    terminal.size().unwrap_or_default()
}

fn action_context(term_size: Size) -> AppActionContext {
    AppActionContext {
        term_width: term_size.width,
        term_height: term_size.height,
        now: Instant::now(),
    }
}

/// Sheet area as it is drawn right now, for mouse hit-testing.
fn visible_sheet_area(app: &App, term_size: Size, now: Instant) -> Option<Rect> {
    if !app.ui.sheet.is_visible() {
        return None;
    }
    let area = Rect::new(0, 0, term_size.width, term_size.height);
    sheet_area(area, app.ui.sheet.offset_at(now))
}

/// Whether an animation frame should be dispatched now. At most one goes
/// out per `frame_duration`, so a running animation lets the loop idle.
fn animation_frame_due(
    animating: bool,
    now: Instant,
    last_frame: &mut Instant,
    frame_duration: Duration,
) -> bool {
    if !animating || now.duration_since(*last_frame) < frame_duration {
        return false;
    }
    *last_frame = now;
    true
}

struct EventProcessingOutcome {
    events_processed: bool,
}

fn process_ui_events(
    app: &App,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
    term_size: Size,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome {
        events_processed: false,
    };

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        let ctx = action_context(term_size);
        let actions = match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let key_context = KeyContext {
                    compose_focused: app.ui.keyboard.is_visible(),
                    sheet_visible: app.ui.sheet.is_visible(),
                    affordances_visible: app.conversation.affordances_visible,
                    term_height: term_size.height,
                };
                map_key_event(&key, &key_context)
            }
            UiEvent::Crossterm(Event::Mouse(mouse)) => {
                map_mouse_event(&mouse, visible_sheet_area(app, term_size, ctx.now))
            }
            UiEvent::Crossterm(Event::Paste(text)) => paste_actions(app, &text),
            UiEvent::Crossterm(_) => Vec::new(),
        };
        dispatcher.dispatch_many(actions, ctx);
    }

    outcome
}

fn paste_actions(app: &App, text: &str) -> Vec<AppAction> {
    let sanitized = sanitize_pasted_text(text);
    if sanitized.is_empty() || app.ui.sheet.is_visible() {
        return Vec::new();
    }
    vec![AppAction::EditCompose {
        edit: LineEditAction::Paste(sanitized),
    }]
}

/// Forward finished requests to the reducer. Stale ids are filtered there.
fn process_completion_updates(
    dispatcher: &AppActionDispatcher,
    rx: &mut mpsc::UnboundedReceiver<(CompletionMessage, u64)>,
    term_size: Size,
) -> bool {
    let mut actions = Vec::new();
    while let Ok((message, request_id)) = rx.try_recv() {
        actions.push(match message {
            CompletionMessage::Reply(text) => AppAction::CompletionSucceeded { text, request_id },
            CompletionMessage::Failed(error) => AppAction::CompletionFailed { error, request_id },
        });
    }

    if actions.is_empty() {
        return false;
    }
    dispatcher.dispatch_many(actions, action_context(term_size));
    true
}

fn drain_action_queue(
    app: &mut App,
    completion_service: &CompletionService,
    playback: &TypingPlayback,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        pending.push(envelope);
    }

    if pending.is_empty() {
        return false;
    }

    for cmd in apply_actions(app, pending) {
        match cmd {
            AppCommand::SpawnCompletion(params) => {
                debug!(request_id = params.request_id, "spawning completion request");
                completion_service.spawn_request(params);
            }
            AppCommand::StartPlayback(params) => {
                debug!(playback_id = params.playback_id, "starting typing playback");
                playback.spawn(params);
            }
        }
    }
    true
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_chat(mut app: App) -> Result<(), Box<dyn Error>> {
    info!(model = %app.session.model, base_url = %app.session.base_url, "starting chat");

    let mut terminal = setup_terminal()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let action_dispatcher = AppActionDispatcher::new(action_tx);
    let playback = TypingPlayback::new(action_dispatcher.clone());
    let (completion_service, mut completion_rx) = CompletionService::new();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    const MAX_FPS: u64 = 60;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut last_animation_frame = last_draw;
    let mut request_redraw = true;

    let result = loop {
        if app.ui.exit_requested {
            break Ok(());
        }

        if let Err(err) = try_draw_frame(
            &app,
            &mut terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        ) {
            break Err(err.into());
        }

        let term_size = current_terminal_size(&terminal);

        let event_outcome =
            process_ui_events(&app, &mut event_rx, &action_dispatcher, term_size);
        let received_any =
            process_completion_updates(&action_dispatcher, &mut completion_rx, term_size);

        let now = Instant::now();
        if animation_frame_due(
            app.is_animating(now),
            now,
            &mut last_animation_frame,
            frame_duration,
        ) {
            action_dispatcher.dispatch_many([AppAction::AnimationFrame], action_context(term_size));
        }

        let actions_applied =
            drain_action_queue(&mut app, &completion_service, &playback, &mut action_rx);

        if event_outcome.events_processed || received_any || actions_applied {
            request_redraw = true;
        }

        let idle = !event_outcome.events_processed && !received_any && !actions_applied;
        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await;
        } else {
            tokio::task::yield_now().await;
        }
    };

    event_reader_handle.abort();
    restore_terminal(&mut terminal)?;
    drop(app);

    info!("chat closed");
    result
}
