//! UI rendering components

pub mod command_line;
pub mod content;
pub mod flashcard_panel;
pub mod help;
pub mod layout;
pub mod main_screen;
pub mod quiz_panel;
pub mod sidebar;
pub mod topic_footer;

use ratatui::{Frame, style::Style, widgets::Block};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let theme = Theme::for_mode(state.appearance.theme);
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg_primary).fg(theme.fg_primary)),
        area,
    );

    main_screen::draw(frame, state, &theme);

    if state.screen == Screen::Help {
        help::draw(frame, area, &theme);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::state::Appearance;
    use crate::speech::testing::RecordingEngine;
    use crate::theme::ThemeMode;
    use crate::topics::bundled_catalog;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn renders_welcome_without_topic() {
        let mut state = AppState::new(bundled_catalog().unwrap(), Appearance::default(), "en-US");
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|frame| draw(frame, &mut state)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Welcome to Clio"));
        assert!(text.contains("Topics"));
    }

    #[test]
    fn renders_active_topic_and_updates_metrics() {
        let mut engine = RecordingEngine::new();
        let appearance = Appearance { theme: ThemeMode::Dark, ..Appearance::default() };
        let mut state = AppState::new(bundled_catalog().unwrap(), appearance, "en-US");
        state.select_topic(0, &mut engine);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|frame| draw(frame, &mut state)).unwrap();

        let title = state.active_topic().unwrap().title.clone();
        let text = screen_text(&terminal);
        assert!(text.contains(&title));
        assert!(text.contains("Summary"));
        assert!(state.content.total_lines > 0);
        assert!(state.sidebar.visible_height > 0);
    }

    #[test]
    fn help_overlay_draws_on_top() {
        let mut state = AppState::new(bundled_catalog().unwrap(), Appearance::default(), "en-US");
        state.screen = Screen::Help;
        let mut terminal = Terminal::new(TestBackend::new(120, 60)).unwrap();

        terminal.draw(|frame| draw(frame, &mut state)).unwrap();
        assert!(screen_text(&terminal).contains("Press any key to close"));
    }
}
