//! Main screen: topic sidebar, content panel and command line

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use super::{command_line, content, sidebar};
use crate::app::state::{AppState, Panel};
use crate::theme::Theme;

/// Minimum width for the sidebar panel
const SIDEBAR_MIN_WIDTH: u16 = 24;

/// Draw the main screen
pub fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();

    // Split vertically: main area and command line
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let main_area = vertical_chunks[0];
    let command_area = vertical_chunks[1];

    let chunks = create_layout(main_area, state);

    let mut panel_index = 0;
    if state.panel_visibility.sidebar {
        let focused = state.focused_panel == Panel::Sidebar;
        sidebar::draw(frame, chunks[panel_index], state, theme, focused);
        panel_index += 1;
    }

    let focused = state.focused_panel == Panel::Content;
    content::draw(frame, chunks[panel_index], state, theme, focused);

    // Draw command line at bottom
    let status = command_line::status_text(state.study.speech.state(), &state.appearance);
    command_line::draw(frame, command_area, &state.command_line, &status, theme);
}

/// Create the layout constraints based on visible panels
fn create_layout(area: Rect, state: &AppState) -> Vec<Rect> {
    let mut constraints = Vec::new();

    // Sidebar (left): 25% width, min 24 cols
    if state.panel_visibility.sidebar {
        let sidebar_width = (area.width / 4).max(SIDEBAR_MIN_WIDTH);
        constraints.push(Constraint::Length(sidebar_width));
    }

    // Content panel: flexible
    constraints.push(Constraint::Min(30));

    Layout::default().direction(Direction::Horizontal).constraints(constraints).split(area).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::PanelVisibility;

    #[test]
    fn layout_with_sidebar() {
        let area = Rect::new(0, 0, 120, 40);
        let state = AppState {
            panel_visibility: PanelVisibility { sidebar: true },
            ..Default::default()
        };

        let chunks = create_layout(area, &state);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].width, 30);
    }

    #[test]
    fn narrow_terminal_keeps_sidebar_minimum() {
        let area = Rect::new(0, 0, 80, 40);
        let state = AppState::default();

        let chunks = create_layout(area, &state);
        assert_eq!(chunks[0].width, SIDEBAR_MIN_WIDTH);
    }

    #[test]
    fn layout_with_content_only() {
        let area = Rect::new(0, 0, 80, 40);
        let state = AppState {
            panel_visibility: PanelVisibility { sidebar: false },
            ..Default::default()
        };

        let chunks = create_layout(area, &state);
        assert_eq!(chunks.len(), 1);
    }
}
