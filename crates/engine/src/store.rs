//! Page store: the single source of truth for pages and selection.
//!
//! Every operation is a synchronous state transition; network access lives in
//! [`crate::fetch`], which captures what to fetch and later applies the result
//! through [`PageStore::commit_page_data`]. Operations addressed to an id that
//! no longer exists are silent no-ops, so late fetch completions for deleted
//! pages are dropped instead of resurrecting them.

use jitpages_types::{FieldProperty, NewPage, Page, PageData, PageId};
use tracing::debug;

use crate::schema::derive_fields;

/// Pages with their selection and UI-mode flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageStore {
    pages: Vec<Page>,
    selected_page_id: Option<PageId>,
    fetching_page: bool,
    is_editing_page: bool,
    last_assigned_id: PageId,
}

/// The two pages available at startup, ids 1 and 2.
pub fn seed_pages() -> Vec<Page> {
    vec![
        Page {
            id: 1,
            name: "My Repos".to_string(),
            url: "https://api.github.com/users/xtrumanx/repos".to_string(),
            ..Page::default()
        },
        Page {
            id: 2,
            name: "Random Repo".to_string(),
            url: "https://api.github.com/repos/xTRUMANx/codenamebuild".to_string(),
            ..Page::default()
        },
    ]
}

impl PageStore {
    /// Empty store with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the seed pages with the first one selected.
    pub fn seeded() -> Self {
        Self::with_pages(seed_pages(), Some(1))
    }

    /// Store holding `pages`. Ids handed out later are greater than every id
    /// in `pages`; a selection that matches no page is dropped.
    pub fn with_pages(pages: Vec<Page>, selected_page_id: Option<PageId>) -> Self {
        let last_assigned_id = pages.iter().map(|page| page.id).max().unwrap_or(0);
        let selected_page_id = selected_page_id.filter(|id| pages.iter().any(|page| page.id == *id));
        Self {
            pages,
            selected_page_id,
            fetching_page: false,
            is_editing_page: false,
            last_assigned_id,
        }
    }

    // Selectors

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    pub fn selected_page_id(&self) -> Option<PageId> {
        self.selected_page_id
    }

    pub fn selected_page(&self) -> Option<&Page> {
        self.selected_page_id.and_then(|id| self.page(id))
    }

    pub fn is_fetching_page(&self) -> bool {
        self.fetching_page
    }

    pub fn is_editing_page(&self) -> bool {
        self.is_editing_page
    }

    /// Position of the selected page in creation order.
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_page_id?;
        self.pages.iter().position(|page| page.id == id)
    }

    // Transitions

    /// Append a page built from `request` and select it.
    ///
    /// Name validity is the caller's concern; see
    /// [`crate::validation::validate_new_page_name`].
    pub fn create_page(&mut self, request: NewPage) -> PageId {
        self.last_assigned_id += 1;
        let id = self.last_assigned_id;
        self.pages.push(Page {
            id,
            name: request.name,
            url: request.url.unwrap_or_default(),
            data: PageData::Empty,
            fetch_data_on_load: request.fetch_data_on_load,
            fields: Vec::new(),
        });
        self.selected_page_id = Some(id);
        debug!(page_id = id, "created page");
        id
    }

    /// Select the page with `id`.
    ///
    /// Returns `true` when the selection changed to a page that wants its data
    /// fetched on load; the caller is expected to trigger the fetch.
    pub fn select_page(&mut self, id: PageId) -> bool {
        if self.selected_page_id == Some(id) {
            return false;
        }
        let Some(page) = self.page(id) else {
            debug!(page_id = id, "ignoring selection of unknown page");
            return false;
        };
        let fetch_on_load = page.fetch_data_on_load;
        self.selected_page_id = Some(id);
        fetch_on_load
    }

    /// Remove the page with `id`, returning it.
    ///
    /// Survivors keep their relative order. Selection follows page identity:
    /// it is cleared when the selected page is removed and otherwise left on
    /// the same page.
    pub fn delete_page(&mut self, id: PageId) -> Option<Page> {
        let index = self.pages.iter().position(|page| page.id == id)?;
        let removed = self.pages.remove(index);
        if self.selected_page_id == Some(id) {
            self.selected_page_id = None;
        }
        debug!(page_id = id, "deleted page");
        Some(removed)
    }

    /// Replace the stored page matching `page.id` and regenerate its fields
    /// from `page.data`, discarding any previous visibility choices.
    ///
    /// Returns `false` when no page has that id.
    pub fn update_page(&mut self, mut page: Page) -> bool {
        let Some(slot) = self.pages.iter_mut().find(|stored| stored.id == page.id) else {
            debug!(page_id = page.id, "update for unknown page dropped");
            return false;
        };
        page.fields = derive_fields(&page.data);
        *slot = page;
        true
    }

    /// Replace only the fields of the page with `id`; data is untouched.
    pub fn update_page_fields(&mut self, id: PageId, fields: Vec<FieldProperty>) -> bool {
        let Some(slot) = self.pages.iter_mut().find(|stored| stored.id == id) else {
            debug!(page_id = id, "field update for unknown page dropped");
            return false;
        };
        slot.fields = fields;
        true
    }

    /// Assign new data to the page with `id`, with [`PageStore::update_page`]
    /// semantics (fields regenerated).
    pub fn commit_page_data(&mut self, id: PageId, data: impl Into<PageData>) -> bool {
        let Some(mut page) = self.page(id).cloned() else {
            debug!(page_id = id, "data for unknown page dropped");
            return false;
        };
        page.data = data.into();
        self.update_page(page)
    }

    pub fn toggle_is_editing_page(&mut self) {
        self.is_editing_page = !self.is_editing_page;
    }

    pub fn set_fetching_page(&mut self, fetching: bool) {
        self.fetching_page = fetching;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(id: PageId, name: &str) -> Page {
        Page {
            id,
            name: name.to_string(),
            ..Page::default()
        }
    }

    fn names(store: &PageStore) -> Vec<&str> {
        store.pages().iter().map(|page| page.name.as_str()).collect()
    }

    #[test]
    fn seeded_store_selects_first_seed_page() {
        let store = PageStore::seeded();
        assert_eq!(names(&store), vec!["My Repos", "Random Repo"]);
        assert_eq!(store.pages()[0].id, 1);
        assert_eq!(store.pages()[1].id, 2);
        assert_eq!(store.selected_page_id(), Some(1));
        assert!(!store.is_fetching_page());
        assert!(!store.is_editing_page());
    }

    #[test]
    fn create_assigns_increasing_ids_and_selects() {
        let mut store = PageStore::seeded();
        let first = store.create_page(NewPage::named("X"));
        assert_eq!(first, 3);
        assert_eq!(store.selected_page_id(), Some(first));

        store.delete_page(first);
        let second = store.create_page(NewPage::named("Y").with_url("https://example.com").with_fetch_on_load(true));
        assert!(second > first, "ids must never be reused");

        let created = store.selected_page().expect("selected page");
        assert_eq!(created.url, "https://example.com");
        assert!(created.fetch_data_on_load);
        assert!(created.fields.is_empty());
        assert!(created.data.is_empty());
    }

    #[test]
    fn select_reports_fetch_on_load() {
        let mut store = PageStore::with_pages(vec![page(1, "A"), page(2, "B")], Some(1));
        store.create_page(NewPage::named("C").with_fetch_on_load(true));
        store.select_page(1);

        assert!(store.select_page(3), "fetch-on-load page requests a fetch");
        assert!(!store.select_page(3), "reselecting is a no-op");
        assert!(!store.select_page(2));
        assert_eq!(store.selected_page_id(), Some(2));
    }

    #[test]
    fn select_ignores_unknown_ids() {
        let mut store = PageStore::with_pages(vec![page(1, "A")], Some(1));
        assert!(!store.select_page(99));
        assert_eq!(store.selected_page_id(), Some(1));
    }

    #[test]
    fn deleting_selected_page_clears_selection() {
        let mut store = PageStore::with_pages(vec![page(1, "A"), page(2, "B")], Some(1));
        let removed = store.delete_page(1).expect("page removed");
        assert_eq!(removed.name, "A");
        assert_eq!(store.pages().len(), 1);
        assert_eq!(store.pages()[0].id, 2);
        assert_eq!(store.selected_page_id(), None);
    }

    #[test]
    fn deleting_an_earlier_page_keeps_selection_on_same_page() {
        let mut store = PageStore::with_pages(vec![page(1, "A"), page(2, "B"), page(3, "C")], Some(3));
        store.delete_page(1);
        assert_eq!(names(&store), vec!["B", "C"]);
        assert_eq!(store.selected_page().map(|p| p.name.as_str()), Some("C"));
        assert_eq!(store.selected_index(), Some(1));
    }

    #[test]
    fn deleting_unknown_page_changes_nothing() {
        let mut store = PageStore::with_pages(vec![page(1, "A")], Some(1));
        let before = store.clone();
        assert!(store.delete_page(7).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn update_page_regenerates_fields_from_data() {
        let mut store = PageStore::with_pages(vec![page(1, "A")], Some(1));
        store.update_page_fields(1, vec![FieldProperty::hidden("stale")]);

        let mut edited = store.page(1).cloned().expect("page");
        edited.name = "Renamed".into();
        edited.data = PageData::from(json!({"a": 1, "b": 2}));
        assert!(store.update_page(edited));

        let stored = store.page(1).expect("page");
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.fields, vec![FieldProperty::visible("a"), FieldProperty::visible("b")]);
    }

    #[test]
    fn refetch_resets_visibility() {
        let mut store = PageStore::with_pages(vec![page(1, "A")], Some(1));
        store.commit_page_data(1, json!({"a": 1, "b": 2}));
        store.update_page_fields(1, vec![FieldProperty::visible("a"), FieldProperty::hidden("b")]);

        store.commit_page_data(1, json!({"a": 3, "b": 4}));
        let fields = &store.page(1).expect("page").fields;
        assert!(fields.iter().all(|field| field.visible));
    }

    #[test]
    fn field_updates_never_touch_data() {
        let mut store = PageStore::with_pages(vec![page(1, "A")], Some(1));
        store.commit_page_data(1, json!([{"id": 1, "name": "r1"}]));
        let data_before = store.page(1).expect("page").data.clone();

        let hidden: Vec<FieldProperty> = derive_fields(&data_before)
            .into_iter()
            .map(|field| FieldProperty { visible: false, ..field })
            .collect();
        assert!(store.update_page_fields(1, hidden));

        let stored = store.page(1).expect("page");
        assert_eq!(stored.data, data_before);
        assert_eq!(stored.fields.iter().map(|f| f.key.as_str()).collect::<Vec<_>>(), vec!["id", "name"]);
        assert!(stored.fields.iter().all(|field| !field.visible));
    }

    #[test]
    fn updates_for_unknown_ids_are_dropped() {
        let mut store = PageStore::with_pages(vec![page(1, "A")], Some(1));
        let before = store.clone();
        assert!(!store.update_page(page(5, "ghost")));
        assert!(!store.update_page_fields(5, vec![FieldProperty::visible("x")]));
        assert!(!store.commit_page_data(5, json!({"x": 1})));
        assert_eq!(store, before);
    }

    #[test]
    fn ui_flags_flip_independently_of_selection() {
        let mut store = PageStore::new();
        store.toggle_is_editing_page();
        assert!(store.is_editing_page());
        store.set_fetching_page(true);
        assert!(store.is_fetching_page());
        store.toggle_is_editing_page();
        assert!(!store.is_editing_page());
        assert_eq!(store.selected_page_id(), None);
    }

    #[test]
    fn with_pages_drops_dangling_selection() {
        let store = PageStore::with_pages(vec![page(4, "A")], Some(9));
        assert_eq!(store.selected_page_id(), None);
        let mut store = store;
        assert_eq!(store.create_page(NewPage::named("B")), 5);
    }
}
