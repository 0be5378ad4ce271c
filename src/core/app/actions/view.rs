use ratatui::layout::Rect;

use super::{App, AppAction, AppActionContext, AppCommand};
use crate::core::keyboard::KeyboardEvent;
use crate::ui::renderer::max_scroll_back;

pub(super) fn handle_view_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::Keyboard {
            event: KeyboardEvent::WillShow { .. },
        } if app.ui.sheet.is_visible() => {}
        AppAction::Keyboard { event } => app.ui.keyboard.handle(event, ctx.now),
        AppAction::OpenSheet => app.ui.sheet.open(),
        AppAction::DismissSheet => app.ui.sheet.dismiss(ctx.now),
        AppAction::SheetPointerDown { y } => app.ui.sheet.pointer_down(y),
        AppAction::SheetPointerMove { y } => app.ui.sheet.pointer_move(y),
        AppAction::SheetPointerUp => app.ui.sheet.pointer_up(ctx.now),
        AppAction::ToggleTheme => app.ui.dark_mode = !app.ui.dark_mode,
        AppAction::ScrollTranscript { lines } => {
            let area = Rect::new(0, 0, ctx.term_width, ctx.term_height);
            let max = max_scroll_back(app, area, ctx.now);
            let current = i32::from(app.ui.scroll_back.min(max));
            app.ui.scroll_back = (current + lines).clamp(0, i32::from(max)) as u16;
        }
        AppAction::AnimationFrame => {
            app.ui.keyboard.settle(ctx.now);
            app.ui.sheet.tick(ctx.now);
        }
        AppAction::Quit => app.ui.exit_requested = true,
        _ => unreachable!("non-view action routed to view handler"),
    }
    None
}
