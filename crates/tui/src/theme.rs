//! Colors and styles shared by every jitpages widget.
//!
//! Dark background, light text, one accent for focus and selection. Widgets
//! should reach for the helpers below instead of building `Style`s inline so
//! that the palette stays in one place.

use ratatui::style::{Color, Modifier, Style};

/// Accent used for focus borders, the selected page, and the spinner.
pub const ACCENT: Color = Color::Rgb(94, 178, 255);

/// Primary text.
pub const FG: Color = Color::Rgb(224, 224, 230);

/// Secondary text: hints, labels, pagination.
pub const FG_MUTED: Color = Color::Rgb(150, 150, 160);

/// Unfocused borders.
pub const BORDER: Color = Color::Rgb(72, 72, 80);

pub const BORDER_FOCUS: Color = ACCENT;

/// Panel background.
pub const BG_PANEL: Color = Color::Rgb(18, 18, 24);

/// Background behind the focused input row.
pub const BG_HIGHLIGHT: Color = Color::Rgb(24, 36, 50);

/// Validation errors and failed fetches.
pub const WARN: Color = Color::Rgb(220, 96, 110);

/// Non-blocking notices such as a URL that looks malformed.
pub const CAUTION: Color = Color::Rgb(230, 180, 80);

/// Border style for a block, accented when it has focus.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

/// Block titles and table headers.
pub fn title_style() -> Style {
    Style::default().fg(FG_MUTED).add_modifier(Modifier::BOLD)
}

pub fn text_style() -> Style {
    Style::default().fg(FG)
}

pub fn text_muted() -> Style {
    Style::default().fg(FG_MUTED)
}

/// The input row that currently receives keystrokes.
pub fn highlight_style() -> Style {
    Style::default().fg(FG).bg(BG_HIGHLIGHT)
}

/// Selected list and table rows: accent and bold, no fill.
pub fn list_highlight_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(WARN)
}

pub fn caution_style() -> Style {
    Style::default().fg(CAUTION)
}

/// Page title in the header.
pub fn heading_style() -> Style {
    Style::default().fg(FG).add_modifier(Modifier::BOLD)
}

/// Key labels inside the hint bar.
pub fn key_hint_style() -> Style {
    Style::default().fg(ACCENT)
}
