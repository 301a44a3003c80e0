//! Draws the selected page's data using the strategy the engine picks.

use crossterm::event::{KeyCode, KeyEvent};
use jitpages_engine::{KeyValueEntry, RenderPlan, TablePlan, plan_page};
use jitpages_util::single_line;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use super::component::Component;
use crate::app::{App, Msg};
use crate::theme;
use crate::ui::utils::column_widths;

const MAX_COLUMN_WIDTH: u16 = 40;

#[derive(Debug, Default)]
pub struct RendererComponent;

impl Component for RendererComponent {
    fn handle_key_events(&self, _app: &App, key: KeyEvent) -> Option<Msg> {
        match key.code {
            KeyCode::Char('s') => Some(Msg::CyclePageSize),
            KeyCode::Char('[') | KeyCode::Left => Some(Msg::PreviousTablePage),
            KeyCode::Char(']') | KeyCode::Right => Some(Msg::NextTablePage),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let block = Block::default()
            .title(Span::styled("Data", theme::title_style()))
            .borders(Borders::ALL)
            .border_style(theme::border_style(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(page) = app.store.selected_page() else {
            draw_muted(frame, inner, "Select a page, or press n to create one.");
            return;
        };
        match plan_page(page, app.page_size, app.page_index) {
            RenderPlan::Nothing => draw_muted(frame, inner, "No data yet. Press r to fetch."),
            RenderPlan::Table(plan) => draw_table(frame, inner, &plan),
            RenderPlan::KeyValue(entries) => draw_key_values(frame, inner, &entries),
            RenderPlan::Scalar(text) => {
                let paragraph = Paragraph::new(text).style(theme::text_style()).wrap(Wrap { trim: false });
                frame.render_widget(paragraph, inner);
            }
        }
    }
}

fn draw_muted(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(Paragraph::new(text.to_string()).style(theme::text_muted()), area);
}

fn draw_table(frame: &mut Frame, area: Rect, plan: &TablePlan) {
    let [table_area, footer_area] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    if plan.pagination.total_rows() == 0 {
        draw_muted(frame, table_area, "No rows");
    } else {
        let rows: Vec<Vec<String>> = plan
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| single_line(cell)).collect())
            .collect();
        let widths = column_widths(&plan.columns, &rows, MAX_COLUMN_WIDTH);
        let header = Row::new(plan.columns.iter().map(|column| Cell::from(column.clone()).style(theme::title_style())));
        let body = rows
            .into_iter()
            .map(|row| Row::new(row.into_iter().map(|cell| Cell::from(cell).style(theme::text_style()))));
        let table = Table::new(body, widths).header(header).column_spacing(2);
        frame.render_widget(table, table_area);
    }

    let pagination = &plan.pagination;
    let mut footer = vec![
        Span::styled(pagination.label(), theme::text_style()),
        Span::styled(
            format!("  {} rows, {} per page", pagination.total_rows(), pagination.page_size()),
            theme::text_muted(),
        ),
    ];
    if !plan.hidden_columns.is_empty() {
        footer.push(Span::styled(format!("  {} hidden", plan.hidden_columns.len()), theme::text_muted()));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)), footer_area);
}

fn draw_key_values(frame: &mut Frame, area: Rect, entries: &[KeyValueEntry]) {
    if entries.is_empty() {
        draw_muted(frame, area, "All fields are hidden.");
        return;
    }
    let key_width = entries
        .iter()
        .map(|entry| jitpages_util::display_width(&entry.key))
        .max()
        .unwrap_or(0)
        .min(MAX_COLUMN_WIDTH as usize) as u16;
    let rows = entries.iter().map(|entry| {
        Row::new(vec![
            Cell::from(entry.key.clone()).style(theme::title_style()),
            Cell::from(single_line(&entry.value)).style(theme::text_style()),
        ])
    });
    let table = Table::new(rows, [Constraint::Length(key_width), Constraint::Fill(1)]).column_spacing(2);
    frame.render_widget(table, area);
}
