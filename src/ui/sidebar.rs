//! Topic sidebar: collapsible groups of topics

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::{AppState, SidebarRow};
use crate::theme::Theme;

/// Marker for the topic on screen
const ACTIVE_MARKER: &str = "●";
const INACTIVE_MARKER: &str = "○";

/// Draw the topic browser
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme, focused: bool) {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let block = Block::default()
        .title(" Topics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Update visible height for scroll calculations
    state.sidebar.visible_height = inner.height as usize;

    if state.catalog.is_empty() {
        let msg = Paragraph::new("No topics loaded")
            .style(Style::default().fg(theme.fg_muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, inner);
        return;
    }

    let lines = build_lines(state, theme, focused);

    // Handle scroll offset
    let visible_height = inner.height as usize;
    let start = state.sidebar.scroll_offset.min(lines.len());
    let end = (start + visible_height).min(lines.len());
    let visible_lines: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();

    frame.render_widget(Paragraph::new(visible_lines), inner);
}

/// One line per visible sidebar row
fn build_lines(state: &AppState, theme: &Theme, focused: bool) -> Vec<Line<'static>> {
    let selected_style =
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD);

    state
        .sidebar_rows()
        .into_iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let is_selected = focused && row_idx == state.sidebar.selected_index;
            match row {
                SidebarRow::Group(group_idx) => {
                    let group = &state.catalog.groups()[group_idx];
                    let icon = if state.sidebar.is_expanded(&group.title) { "▼" } else { "▶" };
                    let style = if is_selected {
                        selected_style
                    } else {
                        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)
                    };
                    Line::from(Span::styled(format!("{} {}", icon, group.title), style))
                }
                SidebarRow::Topic(index) => {
                    let title = state.catalog.topic_at(index).map(|t| t.title.as_str()).unwrap_or("");
                    let is_active = state.active_topic == Some(index);
                    let marker = if is_active { ACTIVE_MARKER } else { INACTIVE_MARKER };
                    let style = if is_selected {
                        selected_style
                    } else if is_active {
                        Style::default().fg(theme.accent_secondary)
                    } else {
                        Style::default().fg(theme.fg_secondary)
                    };
                    Line::from(Span::styled(format!("   {} {}", marker, title), style))
                }
            }
        })
        .collect()
}
