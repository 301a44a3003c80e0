//! The trait every screen region implements.
//!
//! Components are stateless views over [`App`]: they turn key presses and
//! clicks into [`Msg`]s for the reducer and draw themselves from the current
//! state. Any state a component needs (form buffers, cursors) lives on `App`
//! so the reducer stays the only writer.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::app::{App, Msg};

pub(crate) trait Component {
    /// Claim a key press while this component has focus.
    fn handle_key_events(&self, _app: &App, _key: KeyEvent) -> Option<Msg> {
        None
    }

    /// Claim a mouse event; `area` is where this component was last drawn.
    fn handle_mouse_events(&self, _app: &App, _mouse: MouseEvent, _area: Rect) -> Option<Msg> {
        None
    }

    /// Draw into `area`.
    fn render(&self, frame: &mut Frame, area: Rect, app: &App);
}
