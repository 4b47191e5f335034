//! Help overlay listing keys and commands

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::layout::centered_rect;
use crate::theme::Theme;

/// Key bindings, grouped by section
const KEYS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab", "switch between topics and content"),
            ("j / k", "move or scroll"),
            ("Enter", "open group or topic, confirm answer"),
            ("n / p", "next / previous topic"),
            ("[", "show or hide the topic list"),
        ],
    ),
    ("Listening", &[("s", "listen, pause or resume the summary"), ("x", "stop")]),
    (
        "Flashcards",
        &[("f / Space", "flip card"), ("h / l", "previous / next card"), ("m", "mark for review")],
    ),
    (
        "Quiz",
        &[("1-9", "answer by number"), ("o / O", "move answer cursor"), ("r", "restart quiz")],
    ),
    (
        "Appearance",
        &[("t", "light / dark theme"), ("F", "cycle font style"), ("+ / -", "text size")],
    ),
];

/// Command line commands
const COMMANDS: &[(&str, &str)] = &[
    (":goto <topic>", "open a topic by id or title"),
    (":related <n>", "open the n-th related topic"),
    (":next  :prev", "move through topics"),
    (":speak  :stop", "control narration"),
    (":restart", "restart the quiz"),
    (":theme [light|dark]", "switch theme"),
    (":font <regular|bold|italic>", "body text style"),
    (":size <small|medium|large>", "text size"),
    (":q", "quit"),
];

/// Draw the help overlay
pub fn draw(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let para = Paragraph::new(help_lines(theme)).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let heading = Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(theme.accent_primary);
    let desc = Style::default().fg(theme.fg_secondary);

    let mut lines = Vec::new();
    for (section, bindings) in KEYS {
        lines.push(Line::from(Span::styled(section.to_string(), heading)));
        for (k, d) in bindings.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", k), key),
                Span::styled(d.to_string(), desc),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("Commands", heading)));
    for (c, d) in COMMANDS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<30}", c), key),
            Span::styled(d.to_string(), desc),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.fg_muted),
    )));
    lines
}
