//! Status and key hint strip at the bottom of the screen.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::component::Component;
use crate::app::{App, StatusKind};
use crate::theme;

const BROWSE_HINTS: &[(&str, &str)] = &[
    ("j/k", "select"),
    ("n", "new"),
    ("e", "edit"),
    ("r", "refresh"),
    ("f", "fields"),
    ("s", "page size"),
    ("[ ]", "page"),
    ("d", "delete"),
    ("q", "quit"),
];

const EDITOR_HINTS: &[(&str, &str)] = &[
    ("tab", "next field"),
    ("space", "toggle"),
    ("enter", "save"),
    ("ctrl+g", "fetch"),
    ("esc", "close"),
];

#[derive(Debug, Default)]
pub struct HintBarComponent;

impl Component for HintBarComponent {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let line = match &app.status {
            Some(status) => {
                let style = match status.kind {
                    StatusKind::Info => theme::text_muted(),
                    StatusKind::Error => theme::error_style(),
                };
                Line::from(Span::styled(status.text.clone(), style))
            }
            None => hint_line(hints_for(app)),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn hints_for(app: &App) -> &'static [(&'static str, &'static str)] {
    match (&app.modal, &app.editor) {
        (Some(_), _) => &[],
        (None, Some(_)) => EDITOR_HINTS,
        (None, None) => BROWSE_HINTS,
    }
}

fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key}"), theme::key_hint_style()));
        spans.push(Span::styled(format!(" {action} "), theme::text_muted()));
    }
    Line::from(spans)
}
