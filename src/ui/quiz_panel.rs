//! Quiz section of the content panel

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use textwrap::{Options, wrap};

use super::layout::{key_hints, section_heading};
use crate::study::{OptionStyle, QuizState};
use crate::theme::Theme;
use crate::topics::Question;

/// Append the quiz section to `lines`
pub fn render(
    lines: &mut Vec<Line<'static>>,
    quiz: &QuizState,
    questions: &[Question],
    theme: &Theme,
    width: usize,
) {
    section_heading(lines, "Quiz", theme);

    if questions.is_empty() {
        lines.push(Line::from(Span::styled(
            "No quiz questions for this topic.",
            Style::default().fg(theme.fg_muted),
        )));
        return;
    }

    if quiz.is_finished() {
        draw_results(lines, quiz.score(), questions.len(), theme);
        return;
    }

    let Some(question) = quiz.current(questions) else {
        return;
    };

    // Question number
    lines.push(Line::from(Span::styled(
        format!(
            "Question {} of {}  ·  Score: {}",
            quiz.current_question() + 1,
            questions.len(),
            quiz.score()
        ),
        Style::default().fg(theme.fg_muted),
    )));
    lines.push(Line::from(""));

    // Question text
    for text in wrap(&question.question, Options::new(width.max(10))) {
        lines.push(Line::from(Span::styled(
            text.into_owned(),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    // Options
    let answered = quiz.pending().is_some();
    for (i, option) in question.options.iter().enumerate() {
        let style = quiz.style_for(question, option);
        let under_cursor = !answered && i == quiz.selected_option();
        lines.push(option_line(i, option, style, under_cursor, theme));
    }
    lines.push(Line::from(""));

    if answered {
        let feedback = match quiz.pending() {
            Some(p) if p.correct => {
                Span::styled("Correct!", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
            }
            _ => Span::styled(
                format!("The answer is {}", question.correct_answer),
                Style::default().fg(theme.error),
            ),
        };
        lines.push(Line::from(feedback));
    } else {
        lines.push(key_hints(&[("1-9", "answer"), ("o/O", "move"), ("Enter", "confirm")], theme));
    }
}

/// One answer option, styled by its reveal state
fn option_line(
    index: usize,
    option: &str,
    style: OptionStyle,
    under_cursor: bool,
    theme: &Theme,
) -> Line<'static> {
    let prefix = if under_cursor { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
    let (marker, text_style) = match style {
        OptionStyle::Neutral if under_cursor => {
            ("", Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD))
        }
        OptionStyle::Neutral => ("", Style::default().fg(theme.fg_secondary)),
        OptionStyle::Correct => {
            (" \u{2713}", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
        }
        OptionStyle::Incorrect => {
            (" \u{2717}", Style::default().fg(theme.error).add_modifier(Modifier::CROSSED_OUT))
        }
        OptionStyle::Locked => ("", Style::default().fg(theme.fg_muted)),
    };

    Line::from(Span::styled(format!("  {} {}) {}{}", prefix, index + 1, option, marker), text_style))
}

/// Final score and restart hint
fn draw_results(lines: &mut Vec<Line<'static>>, score: usize, total: usize, theme: &Theme) {
    let color = if score == total { theme.success } else { theme.accent_primary };
    lines.push(Line::from(Span::styled(
        format!("Quiz complete! You scored {} of {}.", score, total),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(key_hints(&[("r", "restart quiz")], theme));
}
