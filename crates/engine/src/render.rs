//! Render strategy selection.
//!
//! A page's committed [`PageData`] picks exactly one presentation:
//!
//! | data     | plan                                   |
//! |----------|----------------------------------------|
//! | `Empty`  | [`RenderPlan::Nothing`]                |
//! | `Array`  | [`RenderPlan::Table`] (paginated rows) |
//! | `Object` | [`RenderPlan::KeyValue`]               |
//! | `Scalar` | [`RenderPlan::Scalar`] (JSON text)     |
//!
//! Both the table and the key/value grid apply the same visibility rule: a key
//! is hidden only when the page records it with `visible = false`. Keys the
//! page has no field for are shown.
//!
//! Plans hold plain strings so any front end (the TUI, the `show` command) can
//! draw them without looking at JSON again.

use std::ops::Range;

use indexmap::IndexMap;
use jitpages_types::{FieldProperty, Page, PageData, PageSize};
use serde_json::{Map, Value};

/// Column used when array elements are not objects.
pub const VALUE_COLUMN: &str = "value";

/// What to draw for a page.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan {
    Nothing,
    Table(TablePlan),
    KeyValue(Vec<KeyValueEntry>),
    Scalar(String),
}

/// One visible property of an object payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueEntry {
    pub key: String,
    pub value: String,
}

/// Visible columns and the rendered rows of the current pagination window.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePlan {
    /// Visible column keys, in element 0 key order
    pub columns: Vec<String>,
    /// Keys of element 0 masked out by the page's fields
    pub hidden_columns: Vec<String>,
    /// Cells of the rows in the current window, one per visible column
    pub rows: Vec<Vec<String>>,
    pub pagination: Pagination,
}

impl TablePlan {
    pub fn column_keys(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }
}

/// Pagination window over a table's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_index: usize,
    page_size: PageSize,
    total_rows: usize,
}

impl Pagination {
    /// Window `page_index` of `total_rows`, clamped to the last window.
    pub fn new(total_rows: usize, page_size: PageSize, page_index: usize) -> Self {
        let mut pagination = Self {
            page_index: 0,
            page_size,
            total_rows,
        };
        pagination.page_index = page_index.min(pagination.page_count() - 1);
        pagination
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Number of windows; at least one so an empty table still has a page.
    pub fn page_count(&self) -> usize {
        let rows_per_page = self.page_size.rows_for(self.total_rows);
        self.total_rows.div_ceil(rows_per_page).max(1)
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// Row indices shown in the current window.
    pub fn window(&self) -> Range<usize> {
        let rows_per_page = self.page_size.rows_for(self.total_rows);
        let start = (self.page_index * rows_per_page).min(self.total_rows);
        let end = (start + rows_per_page).min(self.total_rows);
        start..end
    }

    /// Footer text such as `Page 2 of 5`.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page_index + 1, self.page_count())
    }
}

/// Choose and build the plan for `page`.
pub fn plan_page(page: &Page, page_size: PageSize, page_index: usize) -> RenderPlan {
    match &page.data {
        PageData::Empty => RenderPlan::Nothing,
        PageData::Array(items) => RenderPlan::Table(plan_table(items, &page.fields, page_size, page_index)),
        PageData::Object(map) => RenderPlan::KeyValue(plan_key_values(map, &page.fields)),
        PageData::Scalar(value) => RenderPlan::Scalar(value.to_string()),
    }
}

fn plan_table(items: &[Value], fields: &[FieldProperty], page_size: PageSize, page_index: usize) -> TablePlan {
    let pagination = Pagination::new(items.len(), page_size, page_index);
    let window = &items[pagination.window()];

    match items.first() {
        Some(Value::Object(first)) => {
            let mask = VisibilityMask::new(fields);
            let (columns, hidden_columns): (Vec<String>, Vec<String>) = first.keys().cloned().partition(|key| mask.is_visible(key));
            let rows: Vec<Vec<String>> = window
                .iter()
                .map(|item| columns.iter().map(|key| render_value(item.get(key))).collect())
                .collect();
            TablePlan {
                columns,
                hidden_columns,
                rows,
                pagination,
            }
        }
        Some(_) => TablePlan {
            columns: vec![VALUE_COLUMN.to_string()],
            hidden_columns: Vec::new(),
            rows: window.iter().map(|item| vec![render_value(Some(item))]).collect(),
            pagination,
        },
        None => TablePlan {
            columns: Vec::new(),
            hidden_columns: Vec::new(),
            rows: Vec::new(),
            pagination,
        },
    }
}

fn plan_key_values(map: &Map<String, Value>, fields: &[FieldProperty]) -> Vec<KeyValueEntry> {
    let mask = VisibilityMask::new(fields);
    map.iter()
        .filter(|(key, _)| mask.is_visible(key))
        .map(|(key, value)| KeyValueEntry {
            key: key.clone(),
            value: render_value(Some(value)),
        })
        .collect()
}

/// Key -> visible lookup built from a page's fields. The last entry for a
/// duplicated key wins.
struct VisibilityMask<'a> {
    visible_by_key: IndexMap<&'a str, bool>,
}

impl<'a> VisibilityMask<'a> {
    fn new(fields: &'a [FieldProperty]) -> Self {
        Self {
            visible_by_key: fields.iter().map(|field| (field.key.as_str(), field.visible)).collect(),
        }
    }

    fn is_visible(&self, key: &str) -> bool {
        self.visible_by_key.get(key).copied().unwrap_or(true)
    }
}

/// Text for a single value: nothing for null or missing, compact JSON for
/// nested objects and arrays, the raw text for strings.
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
