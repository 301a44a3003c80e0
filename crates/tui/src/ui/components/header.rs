//! Page title with a spinner while a fetch is in flight.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::component::Component;
use crate::app::App;
use crate::theme;

pub(crate) const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Default)]
pub struct HeaderComponent;

impl Component for HeaderComponent {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let mut spans = Vec::with_capacity(4);
        match app.store.selected_page() {
            Some(page) => {
                spans.push(Span::styled(page.title().to_string(), theme::heading_style()));
                if !page.url.is_empty() {
                    spans.push(Span::styled(format!("  {}", page.url), theme::text_muted()));
                }
            }
            None => spans.push(Span::styled("No page selected", theme::text_muted())),
        }
        if app.store.is_fetching_page() {
            let frame_symbol = SPINNER_FRAMES[app.throbber_idx % SPINNER_FRAMES.len()];
            spans.push(Span::styled(format!("  {frame_symbol} fetching"), theme::key_hint_style()));
        }
        let block = Block::default().borders(Borders::BOTTOM).border_style(theme::border_style(false));
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
