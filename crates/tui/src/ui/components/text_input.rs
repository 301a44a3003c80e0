//! Single-line text buffer with a UTF-8 safe cursor, shared by the page
//! editor and the new page dialog.

use ratatui::text::{Line, Span};

use crate::theme;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInputState {
    text: String,
    /// Byte offset into `text`, always on a char boundary
    cursor: usize,
}

impl TextInputState {
    /// Input pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the char before the cursor.
    pub fn backspace(&mut self) {
        let Some(previous) = self.text[..self.cursor].chars().next_back() else {
            return;
        };
        let start = self.cursor - previous.len_utf8();
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(previous) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= previous.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    /// Render as `label: text`, drawing a block cursor when focused.
    pub fn line(&self, label: &str, focused: bool) -> Line<'static> {
        let label_span = Span::styled(format!("{label}: "), theme::title_style());
        if !focused {
            return Line::from(vec![label_span, Span::styled(self.text.clone(), theme::text_style())]);
        }
        let (before, rest) = self.text.split_at(self.cursor);
        let mut rest_chars = rest.chars();
        let under_cursor = rest_chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
        Line::from(vec![
            label_span,
            Span::styled(before.to_string(), theme::highlight_style()),
            Span::styled(under_cursor, theme::highlight_style().add_modifier(ratatui::style::Modifier::REVERSED)),
            Span::styled(rest_chars.as_str().to_string(), theme::highlight_style()),
        ])
    }
}

/// Editing keys understood by the forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Char(char),
    Backspace,
    Left,
    Right,
    NextField,
    PreviousField,
    Submit,
}

impl TextInputState {
    /// Apply a text editing key; returns `false` for keys a text field ignores.
    pub fn apply(&mut self, key: FormKey) -> bool {
        match key {
            FormKey::Char(c) => self.insert_char(c),
            FormKey::Backspace => self.backspace(),
            FormKey::Left => self.move_left(),
            FormKey::Right => self.move_right(),
            _ => return false,
        }
        true
    }
}
