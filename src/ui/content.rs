//! Content panel: the active topic

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use textwrap::core::display_width;
use textwrap::{Options, wrap};

use super::layout::{key_hints, reading_column, section_heading};
use super::{flashcard_panel, quiz_panel, topic_footer};
use crate::app::state::{AppState, Appearance};
use crate::speech::WordSpan;
use crate::study::{PlaybackState, StudyPanel};
use crate::theme::Theme;
use crate::topics::{Catalog, Topic};

/// Draw the content panel with the active topic
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme, focused: bool) {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let title = match state.active_topic() {
        Some(topic) => format!(" {} ", topic.title),
        None => " Clio ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(index) = state.active_topic else {
        draw_welcome(frame, inner, theme);
        return;
    };

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(topic_footer::FOOTER_HEIGHT)])
            .areas(inner);

    // Reserve 1 column for scrollbar
    let scrollbar_x = body_area.x + body_area.width.saturating_sub(1);
    let text_area = Rect { width: body_area.width.saturating_sub(2), ..body_area };
    let column = reading_column(text_area, state.appearance.font_size.column_width());
    let width = column.width as usize;

    let lines = match state.catalog.topic_at(index) {
        Some(topic) => {
            build_topic_lines(topic, &state.catalog, &state.study, &state.appearance, theme, width)
        }
        None => Vec::new(),
    };
    let total_lines = lines.len();
    let visible_height = body_area.height as usize;

    // Update state with content metrics for scroll clamping
    state.content.total_lines = total_lines;
    state.content.visible_height = visible_height;

    // Clamp scroll offset
    state.content.clamp_scroll();
    let scroll_offset = state.content.scroll_offset;
    let end = (scroll_offset + visible_height).min(total_lines);
    let visible_lines: Vec<Line> =
        lines.into_iter().skip(scroll_offset).take(end - scroll_offset).collect();

    frame.render_widget(Paragraph::new(visible_lines), column);

    draw_scrollbar(
        frame,
        scrollbar_x,
        body_area.y,
        body_area.height,
        scroll_offset,
        total_lines,
        theme,
    );

    topic_footer::draw(frame, footer_area, state, theme);
}

/// Render every section of a topic to styled lines
pub fn build_topic_lines(
    topic: &Topic,
    catalog: &Catalog,
    study: &StudyPanel,
    appearance: &Appearance,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let body = Style::default().fg(theme.fg_primary).add_modifier(appearance.font.modifier());

    // Group breadcrumb and title
    if let Some(group_idx) = catalog.position(&topic.id).and_then(|i| catalog.group_index_of(i)) {
        lines.push(Line::from(Span::styled(
            catalog.groups()[group_idx].title.clone(),
            Style::default().fg(theme.fg_muted),
        )));
    }
    lines.push(Line::from(Span::styled(
        topic.title.clone(),
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));

    // Summary with speech controls
    section_heading(&mut lines, "Summary", theme);
    lines.push(speech_controls(study.speech.state(), theme));
    lines.push(Line::from(""));
    let spoken = body.bg(theme.spoken_word).add_modifier(Modifier::BOLD);
    let spans = summary_spans(&topic.summary, study.speech.highlight(), body, spoken);
    lines.extend(wrap_spans(spans, width));

    // Curiosity
    section_heading(&mut lines, "Did you know?", theme);
    render_quote(&mut lines, &topic.curiosity, body, theme, width);

    // Timeline
    if topic.has_timeline() {
        section_heading(&mut lines, "Timeline", theme);
        for event in &topic.timeline {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(theme.accent_secondary)),
                Span::styled(
                    event.date.clone(),
                    Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
                ),
            ]));
            for text in wrap(&event.description, Options::new(width.saturating_sub(4).max(10))) {
                lines.push(Line::from(Span::styled(format!("    {}", text), body)));
            }
        }
    }

    flashcard_panel::render(&mut lines, &study.flashcards, theme, width);
    quiz_panel::render(&mut lines, &study.quiz, &topic.questions, theme, width);

    // Sources
    if !topic.sources.is_empty() {
        section_heading(&mut lines, "Sources", theme);
        for source in &topic.sources {
            let mut spans = vec![
                Span::styled("  • ", Style::default().fg(theme.accent_secondary)),
                Span::styled(source.title.clone(), Style::default().fg(theme.fg_secondary)),
            ];
            if let Some(url) = &source.url {
                spans.push(Span::styled(
                    format!("  {}", url),
                    Style::default().fg(theme.info).add_modifier(Modifier::UNDERLINED),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    // Related topics
    let related: Vec<&Topic> = catalog.related_topics(topic).collect();
    if !related.is_empty() {
        section_heading(&mut lines, "Related topics", theme);
        for (i, other) in related.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}. ", i + 1), Style::default().fg(theme.accent_secondary)),
                Span::styled(other.title.clone(), Style::default().fg(theme.fg_secondary)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            ":related <n> opens one",
            Style::default().fg(theme.fg_muted),
        )));
    }

    lines.push(Line::from(""));
    lines
}

/// Play/pause/stop hints for the current playback state
fn speech_controls(playback: PlaybackState, theme: &Theme) -> Line<'static> {
    let toggle = match playback {
        PlaybackState::Idle => "▶ listen",
        PlaybackState::Speaking => "⏸ pause",
        PlaybackState::Paused => "▶ resume",
    };
    if playback == PlaybackState::Idle {
        key_hints(&[("s", toggle)], theme)
    } else {
        key_hints(&[("s", toggle), ("x", "■ stop")], theme)
    }
}

/// Split the summary so the word being read gets its own span
pub fn summary_spans(
    summary: &str,
    highlight: Option<WordSpan>,
    base: Style,
    spoken: Style,
) -> Vec<Span<'static>> {
    let Some(word) = highlight.filter(|w| w.byte_end <= summary.len()) else {
        return vec![Span::styled(summary.to_string(), base)];
    };

    let mut spans = Vec::new();
    if word.byte_start > 0 {
        spans.push(Span::styled(summary[..word.byte_start].to_string(), base));
    }
    spans.push(Span::styled(word.text(summary).to_string(), spoken));
    if word.byte_end < summary.len() {
        spans.push(Span::styled(summary[word.byte_end..].to_string(), base));
    }
    spans
}

/// Wrap styled spans into lines while preserving formatting
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![Line::from(spans)];
    }

    let mut lines = Vec::new();
    let mut current_line: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for span in spans {
        let text = span.content.to_string();
        let style = span.style;

        for (i, segment) in text.split('\n').enumerate() {
            // Each newline in the text starts a fresh line
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current_line)));
                current_width = 0;
            }

            for word in segment.split_inclusive(char::is_whitespace) {
                let word_width = display_width(word.trim_end());

                if current_width + word_width > width && current_width > 0 {
                    lines.push(Line::from(std::mem::take(&mut current_line)));
                    current_width = 0;
                }

                current_line.push(Span::styled(word.to_string(), style));
                current_width += display_width(word);
            }
        }
    }

    if !current_line.is_empty() {
        lines.push(Line::from(current_line));
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

/// A quoted block with a left rule
fn render_quote(lines: &mut Vec<Line<'static>>, text: &str, body: Style, theme: &Theme, width: usize) {
    let prefix = "  │ ";
    for line in wrap(text, Options::new(width.saturating_sub(4).max(10))) {
        lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(theme.accent_primary)),
            Span::styled(line.into_owned(), body.fg(theme.fg_secondary)),
        ]));
    }
}

/// Draw a scrollbar indicator
fn draw_scrollbar(
    frame: &mut Frame,
    x: u16,
    y: u16,
    height: u16,
    scroll_offset: usize,
    total_lines: usize,
    theme: &Theme,
) {
    if total_lines == 0 || height == 0 {
        return;
    }

    let height = height as usize;

    // Calculate thumb size and position
    let visible_ratio = (height as f64 / total_lines as f64).min(1.0);
    let thumb_height = ((height as f64 * visible_ratio).ceil() as usize).max(1);

    // Calculate max scroll position to avoid division by zero
    let max_scroll = total_lines.saturating_sub(height / 2);
    let scroll_ratio = if total_lines <= height || max_scroll == 0 {
        0.0
    } else {
        scroll_offset as f64 / max_scroll as f64
    };
    let thumb_top = ((height - thumb_height) as f64 * scroll_ratio).round() as usize;

    for i in 0..height {
        let in_thumb = i >= thumb_top && i < thumb_top + thumb_height;
        let (ch, style) = if in_thumb {
            ("█", Style::default().fg(theme.accent_secondary))
        } else {
            ("░", Style::default().fg(theme.bg_tertiary))
        };

        frame.render_widget(
            Paragraph::new(ch).style(style),
            Rect { x, y: y.saturating_add(i as u16), width: 1, height: 1 },
        );
    }
}

/// Draw the welcome message when no topic is selected
fn draw_welcome(frame: &mut Frame, area: Rect, theme: &Theme) {
    let muted = Style::default().fg(theme.fg_muted);
    let welcome = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to Clio",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Your companion for exploring history",
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("Select a topic to begin:", Style::default().fg(theme.fg_primary))),
        Line::from(""),
        Line::from(Span::styled("  Tab      Focus the topic list", muted)),
        Line::from(Span::styled("  j/k      Move up/down", muted)),
        Line::from(Span::styled("  Enter    Open a group or topic", muted)),
        Line::from(Span::styled("  :goto     Jump to a topic by name", muted)),
        Line::from(Span::styled("  ?        Help", muted)),
    ];

    let content = Paragraph::new(welcome).wrap(Wrap { trim: false });
    frame.render_widget(content, area);
}
