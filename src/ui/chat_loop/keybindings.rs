//! Terminal input to reducer actions.
//!
//! Key and mouse events are resolved against a small snapshot of view state
//! ([`KeyContext`]) so the mapping stays a pure function that can be tested
//! without a terminal.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::core::app::AppAction;
use crate::core::constants::{KEYBOARD_ANIMATION, KEYBOARD_PANEL_ROWS};
use crate::core::keyboard::KeyboardEvent;
use crate::ui::layout::{contains, row_to_units};
use crate::utils::line_editor::map_key_event_to_action;

const MOUSE_SCROLL_LINES: i32 = 3;

/// View state consulted when resolving a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    pub compose_focused: bool,
    pub sheet_visible: bool,
    pub affordances_visible: bool,
    pub term_height: u16,
}

fn show_keyboard() -> AppAction {
    AppAction::Keyboard {
        event: KeyboardEvent::WillShow {
            height: KEYBOARD_PANEL_ROWS,
            duration: KEYBOARD_ANIMATION,
        },
    }
}

fn hide_keyboard() -> AppAction {
    AppAction::Keyboard {
        event: KeyboardEvent::WillHide {
            duration: KEYBOARD_ANIMATION,
        },
    }
}

pub fn map_key_event(key: &KeyEvent, ctx: &KeyContext) -> Vec<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return vec![AppAction::Quit];
    }

    // The sheet is modal.
    if ctx.sheet_visible {
        return match key.code {
            KeyCode::Esc => vec![AppAction::DismissSheet],
            _ => Vec::new(),
        };
    }

    let page = i32::from(ctx.term_height / 2).max(1);
    match key.code {
        KeyCode::Char('t') if ctrl => return vec![AppAction::ToggleTheme],
        KeyCode::Char('o') if ctrl => {
            let mut actions = Vec::new();
            if ctx.compose_focused {
                actions.push(hide_keyboard());
            }
            actions.push(AppAction::OpenSheet);
            return actions;
        }
        KeyCode::PageUp => return vec![AppAction::ScrollTranscript { lines: page }],
        KeyCode::PageDown => return vec![AppAction::ScrollTranscript { lines: -page }],
        KeyCode::Up => return vec![AppAction::ScrollTranscript { lines: 1 }],
        KeyCode::Down => return vec![AppAction::ScrollTranscript { lines: -1 }],
        KeyCode::Enter => return vec![AppAction::SubmitMessage],
        KeyCode::Tab => {
            return vec![if ctx.compose_focused {
                hide_keyboard()
            } else {
                show_keyboard()
            }];
        }
        KeyCode::Esc => {
            return if ctx.compose_focused {
                vec![hide_keyboard()]
            } else {
                Vec::new()
            };
        }
        KeyCode::Char(c @ '1'..='3')
            if !ctrl && !ctx.compose_focused && ctx.affordances_visible =>
        {
            let index = c as usize - '1' as usize;
            return vec![AppAction::PickSuggestion { index }];
        }
        _ => {}
    }

    let Some(edit) = map_key_event_to_action(key) else {
        return Vec::new();
    };

    let mut actions = Vec::with_capacity(2);
    if !ctx.compose_focused {
        actions.push(show_keyboard());
    }
    actions.push(AppAction::EditCompose { edit });
    actions
}

/// Resolve a mouse event. `sheet` is the sheet area as last drawn.
pub fn map_mouse_event(mouse: &MouseEvent, sheet: Option<Rect>) -> Vec<AppAction> {
    let y = row_to_units(mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollUp if sheet.is_none() => vec![AppAction::ScrollTranscript {
            lines: MOUSE_SCROLL_LINES,
        }],
        MouseEventKind::ScrollDown if sheet.is_none() => vec![AppAction::ScrollTranscript {
            lines: -MOUSE_SCROLL_LINES,
        }],
        MouseEventKind::Down(MouseButton::Left) => match sheet {
            Some(rect) if contains(rect, mouse.column, mouse.row) => {
                vec![AppAction::SheetPointerDown { y }]
            }
            _ => Vec::new(),
        },
        MouseEventKind::Drag(MouseButton::Left) if sheet.is_some() => {
            vec![AppAction::SheetPointerMove { y }]
        }
        MouseEventKind::Up(MouseButton::Left) if sheet.is_some() => {
            vec![AppAction::SheetPointerUp]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::line_editor::LineEditAction;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn ctx() -> KeyContext {
        KeyContext {
            compose_focused: false,
            sheet_visible: false,
            affordances_visible: true,
            term_height: 24,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn ctrl_c_quits_even_with_sheet_open() {
        let context = KeyContext {
            sheet_visible: true,
            ..ctx()
        };
        assert!(matches!(
            map_key_event(&ctrl('c'), &context).as_slice(),
            [AppAction::Quit]
        ));
    }

    #[test]
    fn sheet_swallows_keys_except_escape() {
        let context = KeyContext {
            sheet_visible: true,
            ..ctx()
        };
        assert!(map_key_event(&key(KeyCode::Char('x')), &context).is_empty());
        assert!(map_key_event(&key(KeyCode::Enter), &context).is_empty());
        assert!(matches!(
            map_key_event(&key(KeyCode::Esc), &context).as_slice(),
            [AppAction::DismissSheet]
        ));
    }

    #[test]
    fn typing_while_unfocused_raises_keyboard_first() {
        let actions = map_key_event(&key(KeyCode::Char('h')), &ctx());
        assert!(matches!(
            actions.as_slice(),
            [
                AppAction::Keyboard {
                    event: KeyboardEvent::WillShow { .. }
                },
                AppAction::EditCompose {
                    edit: LineEditAction::Insert('h')
                }
            ]
        ));

        let focused = KeyContext {
            compose_focused: true,
            ..ctx()
        };
        let actions = map_key_event(&key(KeyCode::Char('h')), &focused);
        assert!(matches!(
            actions.as_slice(),
            [AppAction::EditCompose {
                edit: LineEditAction::Insert('h')
            }]
        ));
    }

    #[test]
    fn digits_pick_suggestions_only_when_unfocused() {
        assert!(matches!(
            map_key_event(&key(KeyCode::Char('2')), &ctx()).as_slice(),
            [AppAction::PickSuggestion { index: 1 }]
        ));

        let focused = KeyContext {
            compose_focused: true,
            ..ctx()
        };
        assert!(matches!(
            map_key_event(&key(KeyCode::Char('2')), &focused).as_slice(),
            [AppAction::EditCompose {
                edit: LineEditAction::Insert('2')
            }]
        ));

        let no_cards = KeyContext {
            affordances_visible: false,
            ..ctx()
        };
        assert!(matches!(
            map_key_event(&key(KeyCode::Char('4')), &no_cards).as_slice(),
            [_, AppAction::EditCompose { .. }]
        ));
    }

    #[test]
    fn tab_and_escape_toggle_focus() {
        assert!(matches!(
            map_key_event(&key(KeyCode::Tab), &ctx()).as_slice(),
            [AppAction::Keyboard {
                event: KeyboardEvent::WillShow { .. }
            }]
        ));

        let focused = KeyContext {
            compose_focused: true,
            ..ctx()
        };
        assert!(matches!(
            map_key_event(&key(KeyCode::Esc), &focused).as_slice(),
            [AppAction::Keyboard {
                event: KeyboardEvent::WillHide { .. }
            }]
        ));
        assert!(map_key_event(&key(KeyCode::Esc), &ctx()).is_empty());
    }

    #[test]
    fn header_shortcuts() {
        assert!(matches!(
            map_key_event(&ctrl('t'), &ctx()).as_slice(),
            [AppAction::ToggleTheme]
        ));
        assert!(matches!(
            map_key_event(&ctrl('o'), &ctx()).as_slice(),
            [AppAction::OpenSheet]
        ));
        assert!(matches!(
            map_key_event(&key(KeyCode::PageUp), &ctx()).as_slice(),
            [AppAction::ScrollTranscript { lines: 12 }]
        ));
    }

    #[test]
    fn mouse_press_outside_sheet_is_ignored() {
        let sheet = Rect::new(0, 8, 80, 16);
        assert!(map_mouse_event(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 2), Some(sheet))
            .is_empty());
        assert!(matches!(
            map_mouse_event(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 10), Some(sheet))
                .as_slice(),
            [AppAction::SheetPointerDown { y }] if *y == 100.0
        ));
    }

    #[test]
    fn drag_and_release_reach_the_sheet() {
        let sheet = Some(Rect::new(0, 8, 80, 16));
        assert!(matches!(
            map_mouse_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 14), sheet)
                .as_slice(),
            [AppAction::SheetPointerMove { y }] if *y == 140.0
        ));
        assert!(matches!(
            map_mouse_event(&mouse(MouseEventKind::Up(MouseButton::Left), 5, 14), sheet).as_slice(),
            [AppAction::SheetPointerUp]
        ));
    }

    #[test]
    fn wheel_scrolls_transcript_when_sheet_closed() {
        assert!(matches!(
            map_mouse_event(&mouse(MouseEventKind::ScrollUp, 0, 0), None).as_slice(),
            [AppAction::ScrollTranscript { lines: 3 }]
        ));
        assert!(map_mouse_event(
            &mouse(MouseEventKind::ScrollUp, 0, 0),
            Some(Rect::new(0, 8, 80, 16))
        )
        .is_empty());
    }
}
