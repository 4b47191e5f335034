//! Command line UI component

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{Appearance, CommandLineState, CommandMode};
use crate::study::PlaybackState;
use crate::theme::Theme;

/// Draw the command line at the bottom of the screen, with `status` on the
/// right while no command is being typed
pub fn draw(frame: &mut Frame, area: Rect, state: &CommandLineState, status: &str, theme: &Theme) {
    let (text, style) = match state.mode {
        CommandMode::Normal => {
            // Show message or empty
            if let Some(ref msg) = state.message {
                let style = if state.is_error {
                    Style::default().fg(theme.error)
                } else {
                    Style::default().fg(theme.fg_muted)
                };
                (msg.clone(), style)
            } else {
                // Show hint when empty
                (
                    String::from("Press : for commands, ? for help"),
                    Style::default().fg(theme.fg_muted),
                )
            }
        }
        CommandMode::Command => {
            let text = format!(":{}", state.input);
            (text, Style::default().fg(theme.accent_primary))
        }
    };

    // Build the line with cursor if in input mode
    let line = if state.is_input_mode() {
        build_line_with_cursor(&text, state.cursor + 1, style, theme) // +1 for prefix
    } else {
        Line::from(Span::styled(text, style))
    };

    if state.is_input_mode() || status.is_empty() {
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let status_width = status.chars().count() as u16 + 1;
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(status_width)]).areas(area);
    frame.render_widget(Paragraph::new(line), left);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(theme.fg_muted),
        )))
        .alignment(Alignment::Right),
        right,
    );
}

/// Status text for the right side: playback and appearance
pub fn status_text(playback: PlaybackState, appearance: &Appearance) -> String {
    let speech = match playback {
        PlaybackState::Idle => "",
        PlaybackState::Speaking => "♪ speaking · ",
        PlaybackState::Paused => "♪ paused · ",
    };
    format!(
        "{}{} · {} · {}",
        speech,
        appearance.theme.name(),
        appearance.font.name(),
        appearance.font_size.name()
    )
}

/// Build a line with a visible cursor
fn build_line_with_cursor(
    text: &str,
    cursor_pos: usize,
    base_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    // Text before cursor
    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    // Cursor character (or space if at end)
    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.fg_primary).add_modifier(Modifier::BOLD);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    // Text after cursor
    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_shows_playback_and_preferences() {
        let appearance = Appearance::default();
        assert_eq!(status_text(PlaybackState::Idle, &appearance), "light · regular · medium");
        assert_eq!(
            status_text(PlaybackState::Paused, &appearance),
            "♪ paused · light · regular · medium"
        );
    }

    #[test]
    fn cursor_counts_characters() {
        let theme = Theme::default();
        let line = build_line_with_cursor(":goto Égypte", 7, Style::default(), &theme);
        assert_eq!(line.spans[1].content, "g");
    }

    #[test]
    fn build_cursor_at_start() {
        let theme = Theme::default();
        let line = build_line_with_cursor(":test", 0, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2); // cursor + rest
    }

    #[test]
    fn build_cursor_at_end() {
        let theme = Theme::default();
        let line = build_line_with_cursor(":test", 5, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2); // before + cursor (space)
    }

    #[test]
    fn build_cursor_in_middle() {
        let theme = Theme::default();
        let line = build_line_with_cursor(":test", 2, Style::default(), &theme);
        assert_eq!(line.spans.len(), 3); // before + cursor + after
    }
}
