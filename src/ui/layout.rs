//! Layout utilities and common components

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::theme::Theme;

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Center a column of at most `max_width` cells inside `area`
pub fn reading_column(area: Rect, max_width: u16) -> Rect {
    if area.width <= max_width {
        return area;
    }
    let margin = (area.width - max_width) / 2;
    Rect { x: area.x + margin, width: max_width, ..area }
}

/// A section heading inside the content panel
pub fn section_heading(lines: &mut Vec<Line<'static>>, title: &str, theme: &Theme) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
}

/// A muted "[key] label" hint line
pub fn key_hints(hints: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(theme.fg_muted)));
        spans.push(Span::styled(format!(" {}  ", label), Style::default().fg(theme.fg_secondary)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_column_is_centered() {
        let area = Rect::new(10, 2, 120, 30);
        let column = reading_column(area, 80);
        assert_eq!(column, Rect::new(30, 2, 80, 30));
    }

    #[test]
    fn narrow_area_is_used_whole() {
        let area = Rect::new(0, 0, 60, 10);
        assert_eq!(reading_column(area, 80), area);
    }

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 60, area);
        assert_eq!(popup.width, 60);
        assert!(popup.x >= 19 && popup.right() <= 81);
    }

    #[test]
    fn key_hints_pair_up() {
        let theme = Theme::default();
        let line = key_hints(&[("s", "speak"), ("x", "stop")], &theme);
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[0].content, "[s]");
    }
}
