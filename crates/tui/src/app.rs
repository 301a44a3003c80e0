//! Application state and the reducer that drives it.
//!
//! [`App::update`] is the only place the page store and the UI state change.
//! It never performs I/O: a fetch is requested by returning
//! [`Effect::Fetch`], and its result comes back later as
//! [`Msg::FetchCompleted`].

use jitpages_engine::{FetchTicket, PageStore, Pagination, apply_fetch_outcome, validate_new_page_name, validate_page_edit};
use jitpages_types::{NewPage, PageData, PageId, PageSize};
use jitpages_util::Settings;
use tracing::{debug, info};

use crate::ui::components::field_editor::{FieldEditorKey, FieldEditorState, toggle_all_fields, toggle_field};
use crate::ui::components::header::SPINNER_FRAMES;
use crate::ui::components::new_page::NewPageState;
use crate::ui::components::page_editor::{EditorField, PageEditorState};
use crate::ui::components::text_input::FormKey;

/// Everything that can happen to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Animation tick from the runtime
    Tick,
    Quit,
    SelectNext,
    SelectPrevious,
    /// Select a page by id, e.g. from a sidebar click
    SelectPage(PageId),
    /// Fetch the selected page's data
    Refresh,
    DeleteSelected,
    /// Delete any page, selected or not
    DeletePage(PageId),
    ToggleEditor,
    EditorKey(FormKey),
    OpenNewPage,
    NewPageKey(FormKey),
    OpenFieldEditor,
    FieldEditor(FieldEditorKey),
    CloseModal,
    CyclePageSize,
    PreviousTablePage,
    NextTablePage,
    /// A fetch started by [`Effect::Fetch`] finished
    FetchCompleted { page_id: PageId, result: Result<PageData, String> },
}

/// Side effects requested by the reducer, performed by [`crate::cmd`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchTicket),
}

/// Dialogs drawn over the main layout. At most one is open.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    NewPage(NewPageState),
    FieldEditor(FieldEditorState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message shown in place of the key hints until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusLine {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub store: PageStore,
    /// Rows per table page
    pub page_size: PageSize,
    /// Zero-based table page of the selected page
    pub page_index: usize,
    /// Open page editor; mirrors `store.is_editing_page()`
    pub editor: Option<PageEditorState>,
    pub modal: Option<Modal>,
    pub status: Option<StatusLine>,
    pub throbber_idx: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: PageStore, page_size: PageSize) -> Self {
        Self {
            store,
            page_size,
            page_index: 0,
            editor: None,
            modal: None,
            status: None,
            throbber_idx: 0,
            should_quit: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let store = if settings.seed_pages { PageStore::seeded() } else { PageStore::new() };
        Self::new(store, settings.initial_page_size)
    }

    /// Apply `msg` and return the effects it asks for.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        if !matches!(msg, Msg::Tick | Msg::FetchCompleted { .. }) {
            self.status = None;
        }
        match msg {
            Msg::Tick => {
                if self.store.is_fetching_page() {
                    self.throbber_idx = (self.throbber_idx + 1) % SPINNER_FRAMES.len();
                }
                Vec::new()
            }
            Msg::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Msg::SelectNext => self.select_relative(1),
            Msg::SelectPrevious => self.select_relative(-1),
            Msg::SelectPage(page_id) => self.select(page_id),
            Msg::Refresh => self.request_fetch(),
            Msg::DeleteSelected => {
                if let Some(page_id) = self.store.selected_page_id() {
                    self.delete_page(page_id);
                }
                Vec::new()
            }
            Msg::DeletePage(page_id) => {
                self.delete_page(page_id);
                Vec::new()
            }
            Msg::ToggleEditor => {
                self.toggle_editor();
                Vec::new()
            }
            Msg::EditorKey(key) => {
                self.editor_key(key);
                Vec::new()
            }
            Msg::OpenNewPage => {
                self.modal = Some(Modal::NewPage(NewPageState::default()));
                Vec::new()
            }
            Msg::NewPageKey(key) => {
                self.new_page_key(key);
                Vec::new()
            }
            Msg::OpenFieldEditor => {
                self.open_field_editor();
                Vec::new()
            }
            Msg::FieldEditor(key) => {
                self.field_editor_key(key);
                Vec::new()
            }
            Msg::CloseModal => {
                self.modal = None;
                Vec::new()
            }
            Msg::CyclePageSize => {
                self.page_size = self.page_size.next();
                self.page_index = 0;
                Vec::new()
            }
            Msg::PreviousTablePage => {
                self.page_index = self.page_index.saturating_sub(1);
                Vec::new()
            }
            Msg::NextTablePage => {
                let has_next = self
                    .table_row_count()
                    .is_some_and(|rows| Pagination::new(rows, self.page_size, self.page_index).can_next());
                if has_next {
                    self.page_index += 1;
                }
                Vec::new()
            }
            Msg::FetchCompleted { page_id, result } => {
                self.fetch_completed(page_id, result);
                Vec::new()
            }
        }
    }

    /// Rows in the selected page's table, if its data is an array.
    fn table_row_count(&self) -> Option<usize> {
        match &self.store.selected_page()?.data {
            PageData::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    fn select_relative(&mut self, step: isize) -> Vec<Effect> {
        let pages = self.store.pages();
        if pages.is_empty() {
            return Vec::new();
        }
        let target = match self.store.selected_index() {
            Some(index) => index.saturating_add_signed(step).min(pages.len() - 1),
            None if step < 0 => pages.len() - 1,
            None => 0,
        };
        self.select(pages[target].id)
    }

    fn select(&mut self, page_id: PageId) -> Vec<Effect> {
        if self.store.selected_page_id() == Some(page_id) || self.store.page(page_id).is_none() {
            return Vec::new();
        }
        let fetch_on_load = self.store.select_page(page_id);
        self.page_index = 0;
        debug!(page_id, "selected page");
        if fetch_on_load { self.request_fetch() } else { Vec::new() }
    }

    fn request_fetch(&mut self) -> Vec<Effect> {
        let Some(ticket) = FetchTicket::for_selected(&self.store) else {
            self.status = Some(StatusLine::info("No page selected."));
            return Vec::new();
        };
        self.store.set_fetching_page(true);
        vec![Effect::Fetch(ticket)]
    }

    fn fetch_completed(&mut self, page_id: PageId, result: Result<PageData, String>) {
        if let Err(error) = &result {
            self.status = Some(StatusLine::error(format!("Fetch failed: {error}")));
        }
        let committed = apply_fetch_outcome(&mut self.store, page_id, result);
        if committed && self.store.selected_page_id() == Some(page_id) {
            self.page_index = 0;
        }
        if committed {
            self.clamp_field_editor(page_id);
        }
        self.throbber_idx = 0;
    }

    /// Keep an open field dialog inside the page's current field list, which
    /// a fetch may have shrunk or emptied.
    fn clamp_field_editor(&mut self, page_id: PageId) {
        let Some(Modal::FieldEditor(editor)) = self.modal.as_mut() else {
            return;
        };
        if editor.page_id != page_id {
            return;
        }
        let field_count = self.store.page(page_id).map_or(0, |page| page.fields.len());
        if field_count == 0 {
            self.modal = None;
            self.status = Some(StatusLine::info("This page has no fields to format."));
            return;
        }
        editor.cursor = editor.cursor.min(field_count - 1);
    }

    fn delete_page(&mut self, page_id: PageId) {
        let was_selected = self.store.selected_page_id() == Some(page_id);
        if was_selected && self.store.is_editing_page() {
            self.toggle_editor();
        }
        if matches!(&self.modal, Some(Modal::FieldEditor(editor)) if editor.page_id == page_id) {
            self.modal = None;
        }
        if let Some(removed) = self.store.delete_page(page_id) {
            info!(page_id, "deleted page");
            self.status = Some(StatusLine::info(format!("Deleted {}", removed.title())));
            if was_selected {
                self.page_index = 0;
            }
        }
    }

    fn toggle_editor(&mut self) {
        if self.store.is_editing_page() {
            self.store.toggle_is_editing_page();
            self.editor = None;
            return;
        }
        let Some(page) = self.store.selected_page() else {
            self.status = Some(StatusLine::info("No page selected."));
            return;
        };
        self.editor = Some(PageEditorState::for_page(page));
        self.store.toggle_is_editing_page();
    }

    fn editor_key(&mut self, key: FormKey) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if key != FormKey::Submit {
            editor.apply(key);
            return;
        }

        let warning = match validate_page_edit(editor.name.text(), editor.url.text()) {
            Ok(warning) => warning,
            Err(error) => {
                editor.error = Some(error.to_string());
                return;
            }
        };
        let Some(mut page) = self.store.page(editor.page_id).cloned() else {
            return;
        };
        page.name = editor.name.text().trim().to_string();
        page.url = editor.url.text().trim().to_string();
        page.fetch_data_on_load = editor.fetch_data_on_load;
        editor.error = None;
        editor.notice = warning;

        let title = page.title().to_string();
        if self.store.update_page(page) {
            self.status = Some(StatusLine::info(format!("Saved {title}")));
        }
    }

    fn new_page_key(&mut self, key: FormKey) {
        let Some(Modal::NewPage(dialog)) = self.modal.as_mut() else {
            return;
        };
        if key != FormKey::Submit {
            dialog.apply(key);
            return;
        }
        let name = match validate_new_page_name(self.store.pages(), dialog.name.text()) {
            Ok(name) => name,
            Err(error) => {
                dialog.error = Some(error.to_string());
                return;
            }
        };

        self.modal = None;
        let page_id = self.store.create_page(NewPage::named(name));
        info!(page_id, "created page");
        self.page_index = 0;
        // A new page has no URL yet, so land in the editor.
        if self.store.is_editing_page() {
            self.toggle_editor();
        }
        self.toggle_editor();
        if let Some(editor) = self.editor.as_mut() {
            editor.focus = EditorField::Url;
        }
    }

    fn open_field_editor(&mut self) {
        let Some(page) = self.store.selected_page() else {
            self.status = Some(StatusLine::info("No page selected."));
            return;
        };
        if page.fields.is_empty() {
            self.status = Some(StatusLine::info("This page has no fields to format."));
            return;
        }
        self.modal = Some(Modal::FieldEditor(FieldEditorState::new(page.id)));
    }

    fn field_editor_key(&mut self, key: FieldEditorKey) {
        let Some(Modal::FieldEditor(editor)) = self.modal.as_mut() else {
            return;
        };
        let Some(page) = self.store.page(editor.page_id) else {
            self.modal = None;
            return;
        };
        editor.cursor = editor.cursor.min(page.fields.len().saturating_sub(1));
        let fields = match key {
            FieldEditorKey::ToggleVisible => toggle_field(&page.fields, editor.cursor),
            FieldEditorKey::ToggleAll => toggle_all_fields(&page.fields),
            navigation => {
                editor.navigate(navigation, page.fields.len());
                return;
            }
        };
        let page_id = editor.page_id;
        self.store.update_page_fields(page_id, fields);
        self.page_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jitpages_engine::RenderPlan;
    use jitpages_engine::plan_page;
    use jitpages_types::{FieldProperty, Page};
    use serde_json::json;

    fn seeded() -> App {
        App::new(PageStore::seeded(), PageSize::default())
    }

    fn type_text(app: &mut App, text: &str, wrap: fn(FormKey) -> Msg) {
        for c in text.chars() {
            app.update(wrap(FormKey::Char(c)));
        }
    }

    #[test]
    fn refresh_marks_fetching_and_requests_a_fetch() {
        let mut app = seeded();
        let effects = app.update(Msg::Refresh);
        assert_eq!(
            effects,
            vec![Effect::Fetch(FetchTicket::Request {
                page_id: 1,
                url: "https://api.github.com/users/xtrumanx/repos".into()
            })]
        );
        assert!(app.store.is_fetching_page());
    }

    #[test]
    fn refresh_without_selection_only_reports() {
        let mut app = App::new(PageStore::new(), PageSize::default());
        assert!(app.update(Msg::Refresh).is_empty());
        assert!(!app.store.is_fetching_page());
        assert!(app.status.is_some());
    }

    #[test]
    fn completion_commits_data_and_stops_spinner() {
        let mut app = seeded();
        app.update(Msg::Refresh);
        app.update(Msg::Tick);
        assert_eq!(app.throbber_idx, 1);

        app.update(Msg::FetchCompleted {
            page_id: 1,
            result: Ok(PageData::from(json!([{"id": 1, "name": "r1"}]))),
        });

        assert!(!app.store.is_fetching_page());
        assert_eq!(app.throbber_idx, 0);
        let page = app.store.selected_page().expect("page");
        assert_eq!(page.fields, vec![FieldProperty::visible("id"), FieldProperty::visible("name")]);
    }

    #[test]
    fn failed_completion_shows_error_and_keeps_data() {
        let mut app = seeded();
        app.update(Msg::Refresh);
        app.update(Msg::FetchCompleted {
            page_id: 1,
            result: Err("connection refused".into()),
        });
        assert!(!app.store.is_fetching_page());
        let status = app.status.as_ref().expect("status");
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("connection refused"));
        assert!(app.store.selected_page().expect("page").data.is_empty());
    }

    #[test]
    fn selection_moves_and_clamps() {
        let mut app = seeded();
        app.update(Msg::SelectNext);
        assert_eq!(app.store.selected_page_id(), Some(2));
        app.update(Msg::SelectNext);
        assert_eq!(app.store.selected_page_id(), Some(2));
        app.update(Msg::SelectPrevious);
        app.update(Msg::SelectPrevious);
        assert_eq!(app.store.selected_page_id(), Some(1));
    }

    #[test]
    fn selecting_a_fetch_on_load_page_requests_a_fetch() {
        let mut store = PageStore::seeded();
        let mut second = store.page(2).cloned().expect("page 2");
        second.fetch_data_on_load = true;
        store.update_page(second);
        let mut app = App::new(store, PageSize::default());

        let effects = app.update(Msg::SelectNext);
        assert!(matches!(effects.as_slice(), [Effect::Fetch(ticket)] if ticket.page_id() == 2));
    }

    #[test]
    fn delete_clears_selection_and_closes_editor() {
        let mut app = seeded();
        app.update(Msg::ToggleEditor);
        assert!(app.store.is_editing_page());

        app.update(Msg::DeleteSelected);

        assert_eq!(app.store.pages().iter().map(|page| page.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(app.store.selected_page_id(), None);
        assert!(app.editor.is_none());
        assert!(!app.store.is_editing_page());
    }

    #[test]
    fn new_page_dialog_validates_then_creates_and_opens_editor() {
        let mut app = seeded();
        app.update(Msg::OpenNewPage);
        app.update(Msg::NewPageKey(FormKey::Submit));
        match &app.modal {
            Some(Modal::NewPage(dialog)) => assert_eq!(dialog.error.as_deref(), Some("Name is required.")),
            other => panic!("expected new page dialog, got {other:?}"),
        }

        type_text(&mut app, "My Repos", Msg::NewPageKey);
        app.update(Msg::NewPageKey(FormKey::Submit));
        match &app.modal {
            Some(Modal::NewPage(dialog)) => assert_eq!(dialog.error.as_deref(), Some("Page name must be unique.")),
            other => panic!("expected new page dialog, got {other:?}"),
        }

        for _ in 0.."My Repos".len() {
            app.update(Msg::NewPageKey(FormKey::Backspace));
        }
        type_text(&mut app, "Issues", Msg::NewPageKey);
        app.update(Msg::NewPageKey(FormKey::Submit));

        assert!(app.modal.is_none());
        let page = app.store.selected_page().expect("new page");
        assert_eq!((page.id, page.name.as_str()), (3, "Issues"));
        assert!(app.store.is_editing_page());
        assert_eq!(app.editor.as_ref().map(|editor| editor.page_id), Some(3));
    }

    #[test]
    fn editor_submit_updates_page_and_resets_fields() {
        let mut app = seeded();
        app.store.commit_page_data(1, json!({"a": 1, "b": 2}));
        app.store.update_page_fields(1, vec![FieldProperty::hidden("a"), FieldProperty::visible("b")]);

        app.update(Msg::ToggleEditor);
        type_text(&mut app, " 2", Msg::EditorKey);
        app.update(Msg::EditorKey(FormKey::Submit));

        let page = app.store.selected_page().expect("page");
        assert_eq!(page.name, "My Repos 2");
        assert_eq!(page.data, PageData::from(json!({"a": 1, "b": 2})));
        assert_eq!(page.fields, vec![FieldProperty::visible("a"), FieldProperty::visible("b")]);
        assert!(app.store.is_editing_page());
    }

    #[test]
    fn editor_submit_rejects_missing_url() {
        let mut app = App::new(
            PageStore::with_pages(
                vec![Page {
                    id: 1,
                    name: "A".into(),
                    ..Page::default()
                }],
                Some(1),
            ),
            PageSize::default(),
        );
        app.update(Msg::ToggleEditor);
        app.update(Msg::EditorKey(FormKey::Submit));
        assert_eq!(
            app.editor.as_ref().and_then(|editor| editor.error.as_deref()),
            Some("URL is required.")
        );
    }

    #[test]
    fn field_editor_toggles_apply_immediately() {
        let mut app = seeded();
        app.store.commit_page_data(1, json!([{"id": 1, "name": "r1"}, {"id": 2, "name": "r2"}]));
        app.update(Msg::OpenFieldEditor);
        app.update(Msg::FieldEditor(FieldEditorKey::Down));
        app.update(Msg::FieldEditor(FieldEditorKey::ToggleVisible));

        let page = app.store.selected_page().expect("page");
        assert_eq!(page.fields, vec![FieldProperty::visible("id"), FieldProperty::hidden("name")]);
        match plan_page(page, app.page_size, app.page_index) {
            RenderPlan::Table(plan) => assert_eq!(plan.column_keys(), vec!["id"]),
            other => panic!("expected table, got {other:?}"),
        }

        app.update(Msg::FieldEditor(FieldEditorKey::ToggleAll));
        assert!(app.store.selected_page().expect("page").fields.iter().all(|field| field.visible));
    }

    #[test]
    fn field_editor_needs_fields() {
        let mut app = seeded();
        app.update(Msg::OpenFieldEditor);
        assert!(app.modal.is_none());
        assert!(app.status.is_some());
    }

    #[test]
    fn refetch_with_fewer_fields_pulls_the_field_cursor_back() {
        let mut app = seeded();
        let wide: serde_json::Map<String, serde_json::Value> = (0..15).map(|n| (format!("k{n}"), json!(n))).collect();
        app.store.commit_page_data(1, serde_json::Value::Object(wide));
        app.update(Msg::OpenFieldEditor);
        for _ in 0..14 {
            app.update(Msg::FieldEditor(FieldEditorKey::Down));
        }

        app.update(Msg::Refresh);
        app.update(Msg::FetchCompleted {
            page_id: 1,
            result: Ok(PageData::from(json!({"a": 1, "b": 2}))),
        });
        match &app.modal {
            Some(Modal::FieldEditor(editor)) => assert_eq!((editor.cursor, editor.page_index()), (1, 0)),
            other => panic!("expected field editor, got {other:?}"),
        }

        app.update(Msg::FieldEditor(FieldEditorKey::ToggleVisible));
        let page = app.store.selected_page().expect("page");
        assert_eq!(page.fields, vec![FieldProperty::visible("a"), FieldProperty::hidden("b")]);
    }

    #[test]
    fn refetch_without_fields_closes_the_field_dialog() {
        let mut app = seeded();
        app.store.commit_page_data(1, json!({"a": 1}));
        app.update(Msg::OpenFieldEditor);
        app.update(Msg::Refresh);
        app.update(Msg::FetchCompleted {
            page_id: 1,
            result: Ok(PageData::from(json!([]))),
        });
        assert!(app.modal.is_none());
        assert!(app.status.is_some());
    }

    #[test]
    fn deleting_another_page_keeps_selection_and_editor() {
        let mut app = seeded();
        app.update(Msg::ToggleEditor);

        app.update(Msg::DeletePage(2));

        assert_eq!(app.store.pages().iter().map(|page| page.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(app.store.selected_page_id(), Some(1));
        assert!(app.editor.is_some());
        assert!(app.store.is_editing_page());
    }

    #[test]
    fn select_page_by_id_ignores_unknown_ids() {
        let mut app = seeded();
        app.update(Msg::SelectPage(2));
        assert_eq!(app.store.selected_page_id(), Some(2));
        app.update(Msg::SelectPage(99));
        assert_eq!(app.store.selected_page_id(), Some(2));
    }

    #[test]
    fn table_paging_stops_at_the_last_page() {
        let mut app = seeded();
        let rows: Vec<_> = (0..12).map(|id| json!({ "id": id })).collect();
        app.store.commit_page_data(1, serde_json::Value::Array(rows));

        app.update(Msg::NextTablePage);
        app.update(Msg::NextTablePage);
        app.update(Msg::NextTablePage);
        assert_eq!(app.page_index, 2);

        app.update(Msg::CyclePageSize);
        assert_eq!((app.page_size, app.page_index), (PageSize::Rows(20), 0));
        app.update(Msg::NextTablePage);
        assert_eq!(app.page_index, 0);
        app.update(Msg::PreviousTablePage);
        assert_eq!(app.page_index, 0);
    }
}
