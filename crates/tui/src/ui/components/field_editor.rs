//! Field formatting dialog: choose which of the page's fields are shown.
//!
//! Lists the selected page's fields ten at a time with a visibility checkbox.
//! Every toggle is written straight to the store through
//! `PageStore::update_page_fields`, so the renderer behind the dialog updates
//! as the user works.

use crossterm::event::{KeyCode, KeyEvent};
use jitpages_types::{FieldProperty, PageId};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

use super::component::Component;
use crate::app::{App, Modal, Msg};
use crate::theme;
use crate::ui::utils::centered_rect;

pub const FIELDS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEditorKey {
    Up,
    Down,
    PreviousPage,
    NextPage,
    ToggleVisible,
    ToggleAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEditorState {
    pub page_id: PageId,
    /// Index into the page's fields
    pub cursor: usize,
}

impl FieldEditorState {
    pub fn new(page_id: PageId) -> Self {
        Self { page_id, cursor: 0 }
    }

    pub fn page_index(&self) -> usize {
        self.cursor / FIELDS_PER_PAGE
    }

    pub fn page_count(field_count: usize) -> usize {
        field_count.div_ceil(FIELDS_PER_PAGE).max(1)
    }

    /// Move the cursor for a navigation key. Toggle keys are ignored here.
    pub fn navigate(&mut self, key: FieldEditorKey, field_count: usize) {
        let last = field_count.saturating_sub(1);
        self.cursor = match key {
            FieldEditorKey::Up => self.cursor.saturating_sub(1),
            FieldEditorKey::Down => (self.cursor + 1).min(last),
            FieldEditorKey::PreviousPage => (self.page_index().saturating_sub(1)) * FIELDS_PER_PAGE,
            FieldEditorKey::NextPage => {
                let next = (self.page_index() + 1) * FIELDS_PER_PAGE;
                if next < field_count { next } else { self.cursor }
            }
            FieldEditorKey::ToggleVisible | FieldEditorKey::ToggleAll => self.cursor,
        }
        .min(last);
    }
}

/// `fields` with the entry at `index` flipped.
pub fn toggle_field(fields: &[FieldProperty], index: usize) -> Vec<FieldProperty> {
    let mut fields = fields.to_vec();
    if let Some(field) = fields.get_mut(index) {
        field.visible = !field.visible;
    }
    fields
}

/// Show every field, or hide every field when all are already shown.
pub fn toggle_all_fields(fields: &[FieldProperty]) -> Vec<FieldProperty> {
    let visible = !fields.iter().all(|field| field.visible);
    fields
        .iter()
        .map(|field| FieldProperty {
            key: field.key.clone(),
            visible,
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct FieldEditorComponent;

impl Component for FieldEditorComponent {
    fn handle_key_events(&self, _app: &App, key: KeyEvent) -> Option<Msg> {
        let editor_key = match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('f') | KeyCode::Char('q') => return Some(Msg::CloseModal),
            KeyCode::Up | KeyCode::Char('k') => FieldEditorKey::Up,
            KeyCode::Down | KeyCode::Char('j') => FieldEditorKey::Down,
            KeyCode::Left | KeyCode::Char('[') => FieldEditorKey::PreviousPage,
            KeyCode::Right | KeyCode::Char(']') => FieldEditorKey::NextPage,
            KeyCode::Char(' ') => FieldEditorKey::ToggleVisible,
            KeyCode::Char('a') => FieldEditorKey::ToggleAll,
            _ => return None,
        };
        Some(Msg::FieldEditor(editor_key))
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let Some(Modal::FieldEditor(editor)) = app.modal.as_ref() else {
            return;
        };
        let fields = app.store.page(editor.page_id).map(|page| page.fields.as_slice()).unwrap_or_default();
        let area = centered_rect(60, FIELDS_PER_PAGE as u16 + 6, area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Span::styled("Format fields", theme::title_style()))
            .borders(Borders::ALL)
            .border_style(theme::border_style(true))
            .style(Style::default().bg(theme::BG_PANEL));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let [table_area, footer_area] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let all_visible = !fields.is_empty() && fields.iter().all(|field| field.visible);
        let header = Row::new(vec![
            Cell::from("Field").style(theme::title_style()),
            Cell::from(format!("Visible {}", checkbox(all_visible))).style(theme::title_style()),
        ]);
        let start = editor.page_index() * FIELDS_PER_PAGE;
        let rows: Vec<Row> = fields
            .iter()
            .skip(start)
            .take(FIELDS_PER_PAGE)
            .map(|field| {
                Row::new(vec![
                    Cell::from(field.key.clone()).style(theme::text_style()),
                    Cell::from(checkbox(field.visible)).style(theme::text_style()),
                ])
            })
            .collect();
        let table = Table::new(rows, [Constraint::Percentage(70), Constraint::Percentage(30)])
            .header(header)
            .row_highlight_style(theme::list_highlight_style());
        let mut state = TableState::default().with_selected(Some(editor.cursor - start));
        frame.render_stateful_widget(table, table_area, &mut state);

        let footer = Line::from(vec![
            Span::styled(
                format!("Page {} of {}", editor.page_index() + 1, FieldEditorState::page_count(fields.len())),
                theme::text_muted(),
            ),
            Span::styled("  space toggle  a all  [ ] page  esc close", theme::text_muted()),
        ]);
        frame.render_widget(Paragraph::new(footer), footer_area);
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}
