//! # jitpages TUI
//!
//! Terminal front end for the page store: a sidebar of pages, a header with
//! the selected page's title and a fetch spinner, an optional page editor, and
//! a renderer that draws whichever strategy the engine picks for the page's
//! data (paginated table, key/value grid, or scalar text).
//!
//! ## Architecture
//!
//! State changes happen in one place, [`app::App::update`], which consumes a
//! [`app::Msg`] and returns the [`app::Effect`]s it wants performed. The
//! runtime owns the terminal and the event loop; [`cmd`] turns effects into
//! spawned tasks whose results come back as messages. The store is only ever
//! touched on the UI task.

mod app;
mod cmd;
mod theme;
mod ui;

use anyhow::Result;
use jitpages_util::Settings;

/// Run the TUI until the user quits.
///
/// # Errors
///
/// Returns an error when the terminal cannot be put into raw mode or the
/// HTTP client cannot be built from `settings`.
pub async fn run(settings: Settings) -> Result<()> {
    ui::runtime::run_app(settings).await
}
