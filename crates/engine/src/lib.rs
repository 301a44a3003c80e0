//! # Jitpages Engine
//!
//! The engine owns the page state model and the dynamic-schema rendering
//! pipeline: it keeps the page collection and selection, derives display
//! fields from whatever JSON a page source returns, and decides how that JSON
//! should be presented.
//!
//! ## Usage
//!
//! ```rust
//! use jitpages_engine::{PageStore, RenderPlan, plan_page};
//! use jitpages_types::{NewPage, PageSize};
//! use serde_json::json;
//!
//! let mut store = PageStore::new();
//! let id = store.create_page(NewPage::named("Repos"));
//! store.commit_page_data(id, json!([{"id": 1, "name": "r1"}]));
//!
//! let page = store.selected_page().unwrap();
//! match plan_page(page, PageSize::default(), 0) {
//!     RenderPlan::Table(table) => assert_eq!(table.column_keys(), vec!["id", "name"]),
//!     other => panic!("unexpected plan: {other:?}"),
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`schema`**: field schema derivation from fetched JSON
//! - **`store`**: pure page store transitions
//! - **`fetch`**: async orchestration that retrieves data and commits it
//! - **`render`**: render strategy selection, visibility masks and pagination
//! - **`validation`**: checks applied before create/edit requests reach the store

pub mod fetch;
pub mod render;
pub mod schema;
pub mod store;
pub mod validation;

pub use fetch::{FetchTicket, HttpJsonFetcher, JsonFetcher, apply_fetch_outcome, fetch_selected_page_data};
pub use render::{KeyValueEntry, Pagination, RenderPlan, TablePlan, VALUE_COLUMN, plan_page, render_value};
pub use schema::derive_fields;
pub use store::{PageStore, seed_pages};
pub use validation::{PageFormError, validate_new_page_name, validate_page_edit};
