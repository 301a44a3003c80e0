//! "New page" dialog: asks for a unique name.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::component::Component;
use super::page_editor::form_key;
use super::text_input::{FormKey, TextInputState};
use crate::app::{App, Modal, Msg};
use crate::theme;
use crate::ui::utils::centered_rect;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPageState {
    pub name: TextInputState,
    pub error: Option<String>,
}

impl NewPageState {
    pub fn apply(&mut self, key: FormKey) {
        if self.name.apply(key) {
            self.error = None;
        }
    }
}

#[derive(Debug, Default)]
pub struct NewPageComponent;

impl Component for NewPageComponent {
    fn handle_key_events(&self, _app: &App, key: KeyEvent) -> Option<Msg> {
        match key.code {
            KeyCode::Esc => Some(Msg::CloseModal),
            _ => form_key(key).map(Msg::NewPageKey),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let Some(Modal::NewPage(dialog)) = app.modal.as_ref() else {
            return;
        };
        let area = centered_rect(50, 7, area);
        let mut lines = vec![dialog.name.line("Name", true), Line::default()];
        match &dialog.error {
            Some(error) => lines.push(Line::from(Span::styled(error.clone(), theme::error_style()))),
            None => lines.push(Line::from(Span::styled("Enter to create, Esc to cancel", theme::text_muted()))),
        }

        let block = Block::default()
            .title(Span::styled("New page", theme::title_style()))
            .borders(Borders::ALL)
            .border_style(theme::border_style(true))
            .style(ratatui::style::Style::default().bg(theme::BG_PANEL));
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
