//! Flashcard section of the content panel

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use textwrap::{Options, wrap};

use super::layout::{key_hints, section_heading};
use crate::study::FlashcardDeck;
use crate::theme::Theme;

/// Append the flashcard section to `lines`
pub fn render(lines: &mut Vec<Line<'static>>, deck: &FlashcardDeck, theme: &Theme, width: usize) {
    section_heading(lines, "Flashcards", theme);

    let Some(card) = deck.current() else {
        lines.push(Line::from(Span::styled(
            "No flashcards for this topic.",
            Style::default().fg(theme.fg_muted),
        )));
        return;
    };

    // Position and marks
    let mut status = vec![Span::styled(
        format!("Card {} of {}", deck.current_index() + 1, deck.len()),
        Style::default().fg(theme.fg_muted),
    )];
    if deck.marked_count() > 0 {
        status.push(Span::styled(
            format!("  ·  {} marked", deck.marked_count()),
            Style::default().fg(theme.fg_muted),
        ));
    }
    if deck.is_current_marked() {
        status.push(Span::styled("  ★ marked", Style::default().fg(theme.warning)));
    }
    lines.push(Line::from(status));
    lines.push(Line::from(""));

    let (label, face, color) = if deck.is_flipped() {
        ("Answer", &card.answer, theme.success)
    } else {
        ("Question", &card.question, theme.info)
    };

    let inner_width = width.saturating_sub(4).max(10);
    let border = Style::default().fg(theme.border);
    lines.push(Line::from(vec![
        Span::styled("┌─ ", border),
        Span::styled(label.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(" ─", border),
    ]));
    for text in wrap(face, Options::new(inner_width)) {
        lines.push(Line::from(vec![
            Span::styled("│ ", border),
            Span::styled(text.into_owned(), Style::default().fg(theme.fg_primary)),
        ]));
    }
    lines.push(Line::from(Span::styled("└──────", border)));
    lines.push(Line::from(""));

    let prev = if deck.has_prev() { "previous" } else { "-" };
    let next = if deck.has_next() { "next" } else { "-" };
    lines.push(key_hints(&[("f", "flip"), ("h", prev), ("l", next), ("m", "mark")], theme));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::Question;

    fn deck() -> FlashcardDeck {
        FlashcardDeck::from_questions(&[
            Question {
                question: "Who built the pyramids?".into(),
                options: vec!["Egyptians".into(), "Romans".into()],
                correct_answer: "Egyptians".into(),
            },
            Question {
                question: "Which river?".into(),
                options: vec!["Nile".into(), "Tiber".into()],
                correct_answer: "Nile".into(),
            },
        ])
    }

    fn all_text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn front_then_back() {
        let theme = Theme::default();
        let mut deck = deck();

        let mut lines = Vec::new();
        render(&mut lines, &deck, &theme, 60);
        let text = all_text(&lines);
        assert!(text.contains("Card 1 of 2"));
        assert!(text.contains("Who built the pyramids?"));
        assert!(!text.contains("Egyptians"));

        deck.flip();
        let mut lines = Vec::new();
        render(&mut lines, &deck, &theme, 60);
        let text = all_text(&lines);
        assert!(text.contains("Answer"));
        assert!(text.contains("Egyptians"));
    }

    #[test]
    fn marked_card_is_flagged() {
        let mut deck = deck();
        deck.toggle_mark();

        let mut lines = Vec::new();
        render(&mut lines, &deck, &Theme::default(), 60);
        let text = all_text(&lines);
        assert!(text.contains("1 marked"));
        assert!(text.contains("★ marked"));
    }

    #[test]
    fn empty_deck_shows_placeholder() {
        let mut lines = Vec::new();
        render(&mut lines, &FlashcardDeck::default(), &Theme::default(), 60);
        assert!(all_text(&lines).contains("No flashcards for this topic."));
    }
}
