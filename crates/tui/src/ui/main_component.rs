//! Top-level view: lays out the regions and routes keys to whichever one has
//! focus. Focus is derived from state rather than tracked: an open dialog
//! wins, then the page editor, then the browse view (sidebar and renderer).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use super::components::{
    Component, FieldEditorComponent, HeaderComponent, HintBarComponent, NewPageComponent, PageEditorComponent, RendererComponent,
    SidebarComponent,
};
use crate::app::{App, Modal, Msg};

const SIDEBAR_WIDTH: u16 = 28;
const EDITOR_HEIGHT: u16 = 6;

/// Where each region lands for a given frame area.
struct Regions {
    sidebar: Rect,
    header: Rect,
    editor: Rect,
    renderer: Rect,
    hints: Rect,
}

impl Regions {
    fn new(area: Rect, app: &App) -> Self {
        let [body, hints] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
        let [sidebar, content] = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)]).areas(body);

        let editor_height = if app.editor.is_some() { EDITOR_HEIGHT } else { 0 };
        let [header, editor, renderer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(editor_height),
            Constraint::Min(3),
        ])
        .areas(content);
        Self {
            sidebar,
            header,
            editor,
            renderer,
            hints,
        }
    }
}

#[derive(Debug, Default)]
pub struct MainView {
    sidebar: SidebarComponent,
    header: HeaderComponent,
    editor: PageEditorComponent,
    renderer: RendererComponent,
    hints: HintBarComponent,
    new_page: NewPageComponent,
    field_editor: FieldEditorComponent,
}

impl MainView {
    /// Translate a key press into a message for the reducer.
    pub fn handle_key_events(&self, app: &App, key: KeyEvent) -> Option<Msg> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match &app.modal {
            Some(Modal::NewPage(_)) => return self.new_page.handle_key_events(app, key),
            Some(Modal::FieldEditor(_)) => return self.field_editor.handle_key_events(app, key),
            None => {}
        }
        if app.editor.is_some() {
            return self.editor.handle_key_events(app, key);
        }

        let global = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Msg::Quit),
            KeyCode::Char('r') => Some(Msg::Refresh),
            KeyCode::Char('d') => Some(Msg::DeleteSelected),
            KeyCode::Char('e') => Some(Msg::ToggleEditor),
            KeyCode::Char('n') => Some(Msg::OpenNewPage),
            KeyCode::Char('f') => Some(Msg::OpenFieldEditor),
            _ => None,
        };
        global
            .or_else(|| self.sidebar.handle_key_events(app, key))
            .or_else(|| self.renderer.handle_key_events(app, key))
    }

    /// Translate a mouse event over a frame of size `area`. Only the browse
    /// view takes clicks.
    pub fn handle_mouse_events(&self, app: &App, mouse: MouseEvent, area: Rect) -> Option<Msg> {
        if app.modal.is_some() || app.editor.is_some() {
            return None;
        }
        self.sidebar.handle_mouse_events(app, mouse, Regions::new(area, app).sidebar)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let regions = Regions::new(area, app);
        self.sidebar.render(frame, regions.sidebar, app);
        self.header.render(frame, regions.header, app);
        if app.editor.is_some() {
            self.editor.render(frame, regions.editor, app);
        }
        self.renderer.render(frame, regions.renderer, app);
        self.hints.render(frame, regions.hints, app);

        match &app.modal {
            Some(Modal::NewPage(_)) => self.new_page.render(frame, area, app),
            Some(Modal::FieldEditor(_)) => self.field_editor.render(frame, area, app),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use jitpages_engine::PageStore;
    use jitpages_types::PageSize;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render_to_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        let view = MainView::default();
        terminal.draw(|frame| view.render(frame, frame.area(), app)).expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_pages_title_and_table() {
        let mut app = App::new(PageStore::seeded(), PageSize::default());
        app.store.commit_page_data(1, json!([{"id": 1, "name": "alpha"}, {"id": 2, "name": "beta"}]));

        let screen = render_to_text(&app, 100, 20);

        assert!(screen.contains("Pages"));
        assert!(screen.contains("Random Repo"));
        assert!(screen.contains("My Repos"));
        assert!(screen.contains("alpha"));
        assert!(screen.contains("beta"));
        assert!(screen.contains("Page 1 of 1"));
    }

    #[test]
    fn renders_key_values_scalar_and_untitled_pages() {
        let mut app = App::new(PageStore::seeded(), PageSize::default());
        app.store.commit_page_data(1, json!({"full_name": "x/y", "private": false}));
        let screen = render_to_text(&app, 100, 20);
        assert!(screen.contains("full_name"));
        assert!(screen.contains("x/y"));

        let mut page = app.store.page(1).cloned().expect("page");
        page.name.clear();
        page.data = json!("invalid url").into();
        app.store.update_page(page);
        let screen = render_to_text(&app, 100, 20);
        assert!(screen.contains("Untitled Page"));
        assert!(screen.contains("\"invalid url\""));
    }

    #[test]
    fn renders_dialogs_over_the_layout() {
        let mut app = App::new(PageStore::seeded(), PageSize::default());
        app.update(Msg::OpenNewPage);
        assert!(render_to_text(&app, 100, 24).contains("New page"));

        app.update(Msg::CloseModal);
        app.store.commit_page_data(1, json!({"a": 1}));
        app.update(Msg::OpenFieldEditor);
        let screen = render_to_text(&app, 100, 24);
        assert!(screen.contains("Format fields"));
        assert!(screen.contains("[x]"));
    }

    #[test]
    fn sidebar_clicks_reach_the_reducer_only_while_browsing() {
        use crossterm::event::{MouseButton, MouseEventKind};

        let mut app = App::new(PageStore::seeded(), PageSize::default());
        let view = MainView::default();
        let area = Rect::new(0, 0, 100, 20);
        let delete_second = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: SIDEBAR_WIDTH - 2,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(view.handle_mouse_events(&app, delete_second, area), Some(Msg::DeletePage(2)));
        app.update(Msg::DeletePage(2));
        assert_eq!(app.store.selected_page_id(), Some(1));
        assert!(render_to_text(&app, 100, 20).contains("My Repos"));

        app.update(Msg::OpenNewPage);
        assert_eq!(view.handle_mouse_events(&app, delete_second, area), None);
    }

    #[test]
    fn keys_route_to_the_focused_region() {
        let mut app = App::new(PageStore::seeded(), PageSize::default());
        let view = MainView::default();

        assert_eq!(view.handle_key_events(&app, key(KeyCode::Char('j'))), Some(Msg::SelectNext));
        assert_eq!(view.handle_key_events(&app, key(KeyCode::Char('s'))), Some(Msg::CyclePageSize));
        assert_eq!(view.handle_key_events(&app, key(KeyCode::Char('q'))), Some(Msg::Quit));

        app.update(Msg::ToggleEditor);
        assert_eq!(
            view.handle_key_events(&app, key(KeyCode::Char('q'))),
            Some(Msg::EditorKey(crate::ui::components::text_input::FormKey::Char('q')))
        );
        assert_eq!(view.handle_key_events(&app, key(KeyCode::Esc)), Some(Msg::ToggleEditor));
        assert_eq!(
            view.handle_key_events(&app, KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL)),
            Some(Msg::Refresh)
        );

        app.update(Msg::ToggleEditor);
        app.update(Msg::OpenNewPage);
        assert_eq!(view.handle_key_events(&app, key(KeyCode::Esc)), Some(Msg::CloseModal));
    }
}
