use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    pub divider_style: Style,

    // Header
    pub title_style: Style,
    pub header_hint_style: Style,

    // Transcript
    pub user_text_style: Style,
    pub user_bubble_style: Style,
    pub assistant_text_style: Style,
    pub typing_indicator_style: Style,
    pub logo_style: Style,

    // Suggestion cards
    pub card_style: Style,
    pub card_title_style: Style,
    pub card_subtitle_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_placeholder_style: Style,
    pub input_border_style: Style,
    pub input_border_focused_style: Style,
    pub counter_style: Style,
    pub key_hint_style: Style,

    // Sheet overlay
    pub sheet_style: Style,
    pub sheet_border_style: Style,
}

impl Theme {
    pub fn light() -> Self {
        let background = Color::Rgb(0xff, 0xff, 0xff);
        let ink = Color::Rgb(0x00, 0x00, 0x00);
        let muted = Color::Rgb(0x66, 0x66, 0x66);
        let faint = Color::Rgb(0x99, 0x99, 0x99);
        let rule = Color::Rgb(0xf0, 0xf0, 0xf0);
        let card = Color::Rgb(0xf8, 0xf8, 0xf8);

        Theme {
            background_color: background,
            divider_style: Style::default().fg(rule),

            title_style: Style::default().fg(ink).add_modifier(Modifier::BOLD),
            header_hint_style: Style::default().fg(faint),

            user_text_style: Style::default().fg(ink),
            user_bubble_style: Style::default().bg(rule),
            assistant_text_style: Style::default().fg(ink),
            typing_indicator_style: Style::default().fg(muted),
            logo_style: Style::default().fg(ink),

            card_style: Style::default().bg(card),
            card_title_style: Style::default().fg(ink).add_modifier(Modifier::BOLD),
            card_subtitle_style: Style::default().fg(muted),

            input_text_style: Style::default().fg(ink),
            input_placeholder_style: Style::default().fg(faint),
            input_border_style: Style::default().fg(rule),
            input_border_focused_style: Style::default().fg(muted),
            counter_style: Style::default().fg(faint),
            key_hint_style: Style::default().fg(muted).bg(card),

            sheet_style: Style::default().fg(ink).bg(background),
            sheet_border_style: Style::default().fg(muted),
        }
    }

    pub fn dark() -> Self {
        let background = Color::Rgb(0x12, 0x12, 0x12);
        let ink = Color::Rgb(0xf2, 0xf2, 0xf2);
        let muted = Color::Rgb(0xa0, 0xa0, 0xa0);
        let faint = Color::Rgb(0x70, 0x70, 0x70);
        let rule = Color::Rgb(0x2a, 0x2a, 0x2a);
        let card = Color::Rgb(0x1e, 0x1e, 0x1e);

        Theme {
            background_color: background,
            divider_style: Style::default().fg(rule),

            title_style: Style::default().fg(ink).add_modifier(Modifier::BOLD),
            header_hint_style: Style::default().fg(faint),

            user_text_style: Style::default().fg(ink),
            user_bubble_style: Style::default().bg(rule),
            assistant_text_style: Style::default().fg(ink),
            typing_indicator_style: Style::default().fg(muted),
            logo_style: Style::default().fg(ink),

            card_style: Style::default().bg(card),
            card_title_style: Style::default().fg(ink).add_modifier(Modifier::BOLD),
            card_subtitle_style: Style::default().fg(muted),

            input_text_style: Style::default().fg(ink),
            input_placeholder_style: Style::default().fg(faint),
            input_border_style: Style::default().fg(rule),
            input_border_focused_style: Style::default().fg(muted),
            counter_style: Style::default().fg(faint),
            key_hint_style: Style::default().fg(muted).bg(card),

            sheet_style: Style::default().fg(ink).bg(card),
            sheet_border_style: Style::default().fg(muted),
        }
    }

    /// Palette for the current theme flag.
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}
