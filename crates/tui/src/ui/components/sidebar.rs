//! Page list. Each entry carries a delete mark at its right edge; a click on
//! the mark deletes that entry, a click elsewhere on it selects it.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use jitpages_types::PageId;
use jitpages_util::{display_width, truncate_to_width};
use ratatui::{
    Frame,
    layout::{Margin, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState},
};

use super::component::Component;
use crate::app::{App, Msg};
use crate::theme;

const HIGHLIGHT_SYMBOL: &str = "> ";
const DELETE_MARK: &str = "✕";
/// Columns at the right edge of an entry that count as a click on its mark
const DELETE_MARK_WIDTH: u16 = 2;

#[derive(Debug, Default)]
pub struct SidebarComponent;

impl Component for SidebarComponent {
    fn handle_key_events(&self, _app: &App, key: KeyEvent) -> Option<Msg> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(Msg::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(Msg::SelectPrevious),
            _ => None,
        }
    }

    fn handle_mouse_events(&self, app: &App, mouse: MouseEvent, area: Rect) -> Option<Msg> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let (page_id, on_delete) = hit_test(app, area, Position::new(mouse.column, mouse.row))?;
        Some(if on_delete { Msg::DeletePage(page_id) } else { Msg::SelectPage(page_id) })
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let inner = list_area(area);
        let text_width = usize::from(inner.width).saturating_sub(display_width(HIGHLIGHT_SYMBOL) + display_width(DELETE_MARK) + 1);
        let items: Vec<ListItem> = app
            .store
            .pages()
            .iter()
            .map(|page| {
                let title = truncate_to_width(page.title(), text_width);
                let padding = " ".repeat(text_width.saturating_sub(display_width(&title)) + 1);
                ListItem::new(Line::from(vec![
                    Span::styled(title, theme::text_style()),
                    Span::raw(padding),
                    Span::styled(DELETE_MARK, theme::text_muted()),
                ]))
            })
            .collect();
        let focused = app.modal.is_none() && app.editor.is_none();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(Span::styled("Pages", theme::title_style()))
                    .borders(Borders::ALL)
                    .border_style(theme::border_style(focused)),
            )
            .highlight_style(theme::list_highlight_style())
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .highlight_spacing(HighlightSpacing::Always);
        let selected = app.store.selected_index();
        let mut state = ListState::default()
            .with_offset(list_offset(selected, usize::from(inner.height)))
            .with_selected(selected);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn list_area(area: Rect) -> Rect {
    area.inner(Margin::new(1, 1))
}

/// First visible entry: scrolled only as far as needed to show the selection.
fn list_offset(selected: Option<usize>, height: usize) -> usize {
    match selected {
        Some(index) if height > 0 && index >= height => index + 1 - height,
        _ => 0,
    }
}

/// Page under `position` in a sidebar drawn into `area`, and whether the
/// position is on that entry's delete mark.
fn hit_test(app: &App, area: Rect, position: Position) -> Option<(PageId, bool)> {
    let inner = list_area(area);
    if !inner.contains(position) {
        return None;
    }
    let offset = list_offset(app.store.selected_index(), usize::from(inner.height));
    let page = app.store.pages().get(offset + usize::from(position.y - inner.y))?;
    let on_delete = position.x >= inner.right().saturating_sub(DELETE_MARK_WIDTH);
    Some((page.id, on_delete))
}
