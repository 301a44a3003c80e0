//! Inline editor for the selected page's name, URL and fetch-on-load flag.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jitpages_types::{Page, PageId};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::component::Component;
use super::text_input::{FormKey, TextInputState};
use crate::app::{App, Msg};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorField {
    #[default]
    Name,
    Url,
    FetchOnLoad,
}

impl EditorField {
    fn next(self) -> Self {
        match self {
            EditorField::Name => EditorField::Url,
            EditorField::Url => EditorField::FetchOnLoad,
            EditorField::FetchOnLoad => EditorField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            EditorField::Name => EditorField::FetchOnLoad,
            EditorField::Url => EditorField::Name,
            EditorField::FetchOnLoad => EditorField::Url,
        }
    }
}

/// Form values for the page being edited. Seeded from the stored page when
/// the editor opens; nothing reaches the store until submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageEditorState {
    pub page_id: PageId,
    pub name: TextInputState,
    pub url: TextInputState,
    pub fetch_data_on_load: bool,
    pub focus: EditorField,
    /// Validation failure from the last submit
    pub error: Option<String>,
    /// Accepted-with-warning note from the last submit
    pub notice: Option<String>,
}

impl PageEditorState {
    pub fn for_page(page: &Page) -> Self {
        Self {
            page_id: page.id,
            name: TextInputState::with_text(page.name.clone()),
            url: TextInputState::with_text(page.url.clone()),
            fetch_data_on_load: page.fetch_data_on_load,
            ..Self::default()
        }
    }

    /// Apply any key other than [`FormKey::Submit`].
    pub fn apply(&mut self, key: FormKey) {
        match key {
            FormKey::NextField => self.focus = self.focus.next(),
            FormKey::PreviousField => self.focus = self.focus.previous(),
            FormKey::Submit => {}
            FormKey::Char(' ') if self.focus == EditorField::FetchOnLoad => {
                self.fetch_data_on_load = !self.fetch_data_on_load;
            }
            other => {
                let edited = match self.focus {
                    EditorField::Name => self.name.apply(other),
                    EditorField::Url => self.url.apply(other),
                    EditorField::FetchOnLoad => false,
                };
                if edited {
                    self.error = None;
                }
            }
        }
    }
}

/// Map a key to a form key. Shared with the new page dialog.
pub(crate) fn form_key(key: KeyEvent) -> Option<FormKey> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Enter => Some(FormKey::Submit),
        KeyCode::Tab | KeyCode::Down => Some(FormKey::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(FormKey::PreviousField),
        KeyCode::Backspace => Some(FormKey::Backspace),
        KeyCode::Left => Some(FormKey::Left),
        KeyCode::Right => Some(FormKey::Right),
        KeyCode::Char(c) => Some(FormKey::Char(c)),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct PageEditorComponent;

impl Component for PageEditorComponent {
    fn handle_key_events(&self, _app: &App, key: KeyEvent) -> Option<Msg> {
        match key.code {
            KeyCode::Esc => Some(Msg::ToggleEditor),
            KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Msg::Refresh),
            _ => form_key(key).map(Msg::EditorKey),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let Some(editor) = app.editor.as_ref() else {
            return;
        };
        let checkbox = if editor.fetch_data_on_load { "[x]" } else { "[ ]" };
        let checkbox_style = if editor.focus == EditorField::FetchOnLoad {
            theme::highlight_style()
        } else {
            theme::text_style()
        };

        let mut lines = vec![
            editor.name.line("Name", editor.focus == EditorField::Name),
            editor.url.line("URL", editor.focus == EditorField::Url),
            Line::from(vec![
                Span::styled("Fetch data on load: ", theme::title_style()),
                Span::styled(checkbox, checkbox_style),
            ]),
        ];
        if let Some(error) = &editor.error {
            lines.push(Line::from(Span::styled(error.clone(), theme::error_style())));
        } else if let Some(notice) = &editor.notice {
            lines.push(Line::from(Span::styled(notice.clone(), theme::caution_style())));
        }

        let block = Block::default()
            .title(Span::styled("Edit page", theme::title_style()))
            .borders(Borders::ALL)
            .border_style(theme::border_style(true));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page {
            id: 7,
            name: "Repos".into(),
            url: "https://example.com".into(),
            fetch_data_on_load: true,
            ..Page::default()
        }
    }

    #[test]
    fn opens_with_stored_values() {
        let editor = PageEditorState::for_page(&page());
        assert_eq!(editor.page_id, 7);
        assert_eq!(editor.name.text(), "Repos");
        assert_eq!(editor.url.text(), "https://example.com");
        assert!(editor.fetch_data_on_load);
        assert_eq!(editor.focus, EditorField::Name);
    }

    #[test]
    fn keys_edit_the_focused_field() {
        let mut editor = PageEditorState::for_page(&page());
        editor.apply(FormKey::Char('!'));
        editor.apply(FormKey::NextField);
        editor.apply(FormKey::Backspace);
        editor.apply(FormKey::NextField);
        editor.apply(FormKey::Char(' '));

        assert_eq!(editor.name.text(), "Repos!");
        assert_eq!(editor.url.text(), "https://example.co");
        assert!(!editor.fetch_data_on_load);
    }

    #[test]
    fn typing_clears_a_stale_error() {
        let mut editor = PageEditorState::for_page(&page());
        editor.error = Some("Name is required.".into());
        editor.apply(FormKey::Char('x'));
        assert_eq!(editor.error, None);
    }
}
