use jitpages_util::display_width;
use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A rect `percent_x` wide and `height` rows tall, centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center).areas(row);
    popup
}

/// Column widths sized to the widest header or cell, capped at `max_width`.
pub fn column_widths(headers: &[String], rows: &[Vec<String>], max_width: u16) -> Vec<Constraint> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let widest_cell = rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0);
            let width = widest_cell.max(display_width(header)).clamp(1, max_width as usize);
            Constraint::Length(width as u16)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 7, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 7);
        assert_eq!(popup.x, 25);
        assert!(popup.y > 0 && popup.bottom() < area.bottom());
    }

    #[test]
    fn widths_follow_longest_text_with_cap() {
        let headers = vec!["id".to_string(), "description".to_string()];
        let rows = vec![vec!["12345".to_string(), "x".repeat(80)]];
        assert_eq!(column_widths(&headers, &rows, 40), vec![Constraint::Length(5), Constraint::Length(40)]);
    }
}
