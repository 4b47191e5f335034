//! Topic footer with previous/next buttons

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::AppState;
use crate::theme::Theme;
use crate::topics::Topic;

/// Height of the topic footer in lines
pub const FOOTER_HEIGHT: u16 = 3;

/// Longest topic title shown on a button
const MAX_BUTTON_TITLE: usize = 28;

/// Draw the footer with previous and next buttons
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if area.height < FOOTER_HEIGHT || area.width < 20 {
        return;
    }

    let prev = state
        .active_topic
        .and_then(|i| state.catalog.previous_index(i))
        .and_then(|i| state.catalog.topic_at(i));
    let next = state
        .active_topic
        .and_then(|i| state.catalog.next_index(i))
        .and_then(|i| state.catalog.topic_at(i));

    // Draw separator line above buttons
    let separator = Line::from(vec![Span::styled(
        "\u{2500}".repeat(area.width as usize), // ─ horizontal line
        Style::default().fg(theme.border),
    )]);
    frame.render_widget(Paragraph::new(separator), Rect::new(area.x, area.y, area.width, 1));

    let buttons = Line::from(vec![
        create_button(&prev_label(prev), prev.is_some(), theme),
        Span::raw("    "),
        create_button(&next_label(next), next.is_some(), theme),
    ])
    .centered();
    frame.render_widget(Paragraph::new(buttons), Rect::new(area.x, area.y + 1, area.width, 1));

    let hint = Line::from(vec![
        Span::styled("[p]", Style::default().fg(theme.fg_muted)),
        Span::styled(" previous topic  ", Style::default().fg(theme.fg_secondary)),
        Span::styled("[n]", Style::default().fg(theme.fg_muted)),
        Span::styled(" next topic", Style::default().fg(theme.fg_secondary)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), Rect::new(area.x, area.y + 2, area.width, 1));
}

fn prev_label(topic: Option<&Topic>) -> String {
    match topic {
        Some(t) => format!(" \u{2190} {} ", shorten(&t.title)), // ← arrow
        None => " \u{2190} Previous ".to_string(),
    }
}

fn next_label(topic: Option<&Topic>) -> String {
    match topic {
        Some(t) => format!(" {} \u{2192} ", shorten(&t.title)), // → arrow
        None => " Next \u{2192} ".to_string(),
    }
}

/// Truncate long titles with an ellipsis
fn shorten(title: &str) -> String {
    if title.chars().count() > MAX_BUTTON_TITLE {
        let truncated: String = title.chars().take(MAX_BUTTON_TITLE - 1).collect();
        format!("{}…", truncated)
    } else {
        title.to_string()
    }
}

/// Create a styled button; disabled buttons are dimmed
fn create_button(text: &str, enabled: bool, theme: &Theme) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(theme.fg_primary).bg(theme.bg_tertiary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_muted).bg(theme.bg_secondary).add_modifier(Modifier::DIM)
    };

    Span::styled(text.to_string(), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_name_neighbours() {
        let rome = Topic::new("rome", "Roman Empire", "s", "c");
        assert_eq!(prev_label(Some(&rome)), " \u{2190} Roman Empire ");
        assert_eq!(next_label(Some(&rome)), " Roman Empire \u{2192} ");
        assert_eq!(next_label(None), " Next \u{2192} ");
    }

    #[test]
    fn long_titles_are_shortened() {
        let long = "The Remarkably Long History of Everything Ever";
        let short = shorten(long);
        assert_eq!(short.chars().count(), MAX_BUTTON_TITLE);
        assert!(short.ends_with('…'));
        assert_eq!(shorten("Feudalism"), "Feudalism");
    }

    #[test]
    fn disabled_button_is_dimmed() {
        let theme = Theme::default();
        let span = create_button("x", false, &theme);
        assert!(span.style.add_modifier.contains(Modifier::DIM));
        let span = create_button("x", true, &theme);
        assert_eq!(span.style.bg, Some(theme.bg_tertiary));
    }
}
