//! Shared type definitions for Jitpages.
//!
//! A [`Page`] binds a name to a JSON endpoint together with the last payload
//! fetched from it and the display configuration ([`FieldProperty`]) derived
//! from that payload. The payload itself is classified once, when it is
//! committed, into a [`PageData`] so renderers never have to re-inspect the
//! raw JSON shape.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier assigned to a page at creation time. Never reused.
pub type PageId = u64;

/// Sentinel payload committed when a page has no URL to fetch from.
pub const INVALID_URL_SENTINEL: &str = "invalid url";

/// Title shown for pages whose name is blank.
pub const UNTITLED_PAGE: &str = "Untitled Page";

/// A top-level key observed in a page's payload and whether it is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldProperty {
    /// Property name as it appears in the payload
    pub key: String,
    /// Whether the property is rendered
    pub visible: bool,
}

impl FieldProperty {
    pub fn visible(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            visible: true,
        }
    }

    pub fn hidden(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            visible: false,
        }
    }
}

/// Fetched payload classified by its runtime shape.
///
/// JSON `null` and "nothing fetched yet" are both [`PageData::Empty`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageData {
    #[default]
    Empty,
    Array(Vec<Value>),
    Object(Map<String, Value>),
    Scalar(Value),
}

impl PageData {
    /// Payload committed for pages without a URL.
    pub fn invalid_url() -> Self {
        PageData::Scalar(Value::String(INVALID_URL_SENTINEL.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PageData::Empty)
    }

    /// Short label describing the shape, used in logs and status lines.
    pub fn kind(&self) -> &'static str {
        match self {
            PageData::Empty => "empty",
            PageData::Array(_) => "array",
            PageData::Object(_) => "object",
            PageData::Scalar(_) => "scalar",
        }
    }
}

impl From<Value> for PageData {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => PageData::Empty,
            Value::Array(items) => PageData::Array(items),
            Value::Object(map) => PageData::Object(map),
            scalar => PageData::Scalar(scalar),
        }
    }
}

impl From<Option<Value>> for PageData {
    fn from(value: Option<Value>) -> Self {
        value.map(PageData::from).unwrap_or_default()
    }
}

/// A user-defined binding of a name, a data source URL and the last payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub id: PageId,
    /// Display name, unique among pages when created
    pub name: String,
    /// Source URL; empty means there is nothing to fetch
    pub url: String,
    /// Last committed payload
    pub data: PageData,
    /// Fetch automatically whenever the page becomes selected
    pub fetch_data_on_load: bool,
    /// Display fields in first-seen key order of the last payload
    pub fields: Vec<FieldProperty>,
}

impl Page {
    /// Name to show in headers, falling back to [`UNTITLED_PAGE`].
    pub fn title(&self) -> &str {
        if self.name.trim().is_empty() { UNTITLED_PAGE } else { self.name.as_str() }
    }

    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Request to create a page. Ids, data and fields are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPage {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub fetch_data_on_load: bool,
}

impl NewPage {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_fetch_on_load(mut self, fetch_data_on_load: bool) -> Self {
        self.fetch_data_on_load = fetch_data_on_load;
        self
    }
}

/// Number of table rows shown per pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
    Rows(usize),
    All,
}

impl PageSize {
    /// Window sizes offered by the renderer, in cycling order.
    pub const CHOICES: [PageSize; 3] = [PageSize::Rows(5), PageSize::Rows(20), PageSize::All];

    /// Next choice in [`PageSize::CHOICES`], wrapping around.
    pub fn next(self) -> Self {
        let position = Self::CHOICES.iter().position(|choice| *choice == self);
        match position {
            Some(index) => Self::CHOICES[(index + 1) % Self::CHOICES.len()],
            None => Self::CHOICES[0],
        }
    }

    /// Rows per window for `total` rows; `All` shows every row in one window.
    pub fn rows_for(self, total: usize) -> usize {
        match self {
            PageSize::Rows(rows) => rows.max(1),
            PageSize::All => total.max(1),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Rows(5)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Rows(rows) => write!(f, "{rows}"),
            PageSize::All => f.write_str("all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = ParsePageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        match trimmed.parse::<usize>() {
            Ok(rows) if rows > 0 => Ok(PageSize::Rows(rows)),
            _ => Err(ParsePageSizeError(trimmed.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePageSizeError(String);

impl fmt::Display for ParsePageSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid page size '{}'; expected a positive number or 'all'", self.0)
    }
}

impl Error for ParsePageSizeError {}
