use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::App;
use crate::core::constants::MAX_INPUT_LENGTH;
use crate::core::message::Message;
use crate::ui::layout::{input_window, max_line_width, sheet_area, wrap_text, ScreenLayout};
use crate::ui::theme::Theme;

const LOGO: [&str; 3] = ["╭───────────╮", "│   cutie   │", "╰───────────╯"];

const KEY_HINTS: [&str; 4] = [
    "Enter send · Esc hide keys · Tab focus",
    "Ctrl+A/E start/end · Ctrl+W word · Ctrl+U clear",
    "Ctrl+T theme · Ctrl+O model · Ctrl+C quit",
    "PgUp/PgDn scroll",
];

const SHEET_TEXT: &str = "This is the model file content.";
const TYPING_INDICATOR: &str = "● ● ●";

pub fn ui(f: &mut Frame, app: &App, now: Instant) {
    let theme = Theme::for_mode(app.ui.dark_mode);
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        area,
    );

    let layout = screen_layout(app, area, now);

    render_header(f, layout.header, &theme);
    render_transcript(f, layout.transcript, app, &theme);
    if let Some(rect) = layout.suggestions {
        render_suggestions(f, rect, app, &theme);
    }
    render_input(f, layout.input, app, &theme);
    if let Some(rect) = layout.key_hints {
        let hints: Vec<Line> = KEY_HINTS.iter().map(|hint| Line::from(*hint)).collect();
        f.render_widget(
            Paragraph::new(hints)
                .style(theme.key_hint_style)
                .alignment(Alignment::Center),
            rect,
        );
    }

    if app.ui.sheet.is_visible() {
        if let Some(rect) = sheet_area(area, app.ui.sheet.offset_at(now)) {
            render_sheet(f, rect, &theme);
        }
    }
}

fn screen_layout(app: &App, area: Rect, now: Instant) -> ScreenLayout {
    let keyboard_rows = app.ui.keyboard.offset_at(now).round().max(0.0) as u16;
    let show_suggestions = app.conversation.affordances_visible && !app.ui.suggestions.is_empty();
    ScreenLayout::compute(area, keyboard_rows, show_suggestions)
}

/// Rows the transcript can scroll back before its first line reaches the top.
pub fn max_scroll_back(app: &App, area: Rect, now: Instant) -> u16 {
    let transcript = screen_layout(app, area, now).transcript;
    if transcript.width == 0 {
        return 0;
    }
    let theme = Theme::for_mode(app.ui.dark_mode);
    let total = build_transcript_lines(app, &theme, transcript.width).len();
    u16::try_from(total)
        .unwrap_or(u16::MAX)
        .saturating_sub(transcript.height)
}

fn render_header(f: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.divider_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    f.render_widget(
        Paragraph::new(Span::styled("cutie", theme.title_style)).alignment(Alignment::Center),
        inner,
    );
    f.render_widget(
        Paragraph::new(Span::styled("^O model  ^T theme ", theme.header_hint_style))
            .alignment(Alignment::Right),
        inner,
    );
}

fn render_transcript(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let conversation = &app.conversation;
    if conversation.affordances_visible && conversation.messages.is_empty() {
        let top_pad = area.height.saturating_sub(LOGO.len() as u16) / 2;
        let mut lines = vec![Line::default(); top_pad as usize];
        lines.extend(LOGO.iter().map(|row| Line::styled(*row, theme.logo_style)));
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        return;
    }

    let lines = build_transcript_lines(app, theme, area.width);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_back = total.saturating_sub(area.height);
    let back = app.ui.scroll_back.min(max_back);
    let top = max_back - back;

    f.render_widget(Paragraph::new(lines).scroll((top, 0)), area);
}

/// Pre-wrapped transcript lines: user turns right-aligned in a bubble,
/// assistant turns left-aligned, followed by any reply being revealed.
pub fn build_transcript_lines(app: &App, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let usable = usize::from(width.saturating_sub(2)).max(1);
    let bubble_width = (usable * 3 / 4).max(1);
    let mut lines = Vec::new();

    for message in &app.conversation.messages {
        push_message_lines(&mut lines, message, theme, usable, bubble_width);
    }

    if let Some(reveal) = app.conversation.reveal.as_ref() {
        let reply = Message::assistant(reveal.visible());
        push_message_lines(&mut lines, &reply, theme, usable, bubble_width);
    } else if app.conversation.awaiting_response {
        lines.push(Line::styled(
            format!(" {TYPING_INDICATOR}"),
            theme.typing_indicator_style,
        ));
    }

    lines
}

fn push_message_lines(
    lines: &mut Vec<Line<'static>>,
    message: &Message,
    theme: &Theme,
    usable: usize,
    bubble_width: usize,
) {
    if message.sender.is_user() {
        let wrapped = wrap_text(&message.text, bubble_width);
        let inner = max_line_width(&wrapped);
        for row in wrapped {
            let pad = inner.saturating_sub(row.width());
            let bubble = format!(" {row}{} ", " ".repeat(pad));
            let style = theme.user_bubble_style.patch(theme.user_text_style);
            lines.push(Line::from(Span::styled(bubble, style)).alignment(Alignment::Right));
        }
    } else {
        for row in wrap_text(&message.text, usable) {
            lines.push(Line::styled(format!(" {row}"), theme.assistant_text_style));
        }
    }
    lines.push(Line::default());
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let count = app.ui.suggestions.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (index, (suggestion, rect)) in app.ui.suggestions.iter().zip(columns.iter()).enumerate() {
        let card = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.divider_style)
            .style(theme.card_style);
        let inner = card.inner(*rect);
        f.render_widget(card, *rect);

        let width = usize::from(inner.width).max(1);
        let mut lines = vec![Line::from(vec![
            Span::styled(format!("{} ", index + 1), theme.card_subtitle_style),
            Span::styled(suggestion.title.to_string(), theme.card_title_style),
        ])];
        lines.extend(
            wrap_text(suggestion.subtitle, width)
                .into_iter()
                .take(2)
                .map(|row| Line::styled(row, theme.card_subtitle_style)),
        );
        f.render_widget(Paragraph::new(lines), inner);
    }
}

fn render_input(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.ui.keyboard.is_visible();
    let compose = &app.conversation.compose;
    let counter = format!(" {}/{} ", compose.char_len(), MAX_INPUT_LENGTH);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme.input_border_focused_style
        } else {
            theme.input_border_style
        })
        .title(Line::styled(counter, theme.counter_style).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if compose.text.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("Message", theme.input_placeholder_style)),
            inner,
        );
        if focused && inner.height > 0 {
            f.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let (visible, cursor_x) = input_window(&compose.text, compose.cursor, usize::from(inner.width));
    f.render_widget(
        Paragraph::new(Span::styled(visible, theme.input_text_style)),
        inner,
    );
    if focused && inner.height > 0 {
        f.set_cursor_position((inner.x + cursor_x, inner.y));
    }
}

fn render_sheet(f: &mut Frame, area: Rect, theme: &Theme) {
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_type(BorderType::Rounded)
        .border_style(theme.sheet_border_style)
        .title(Line::from("━━━━").centered())
        .style(theme.sheet_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::default(),
        Line::from(format!(" {SHEET_TEXT}")),
        Line::default(),
        Line::styled(" Drag down or press Esc to close", theme.header_hint_style),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}
