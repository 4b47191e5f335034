//! Key, action and command dispatch
//!
//! Everything here mutates [`AppState`] and talks to the speech engine
//! through the trait, so the whole input path runs in tests without a
//! terminal or a runtime.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyModifiers};

use super::command::{Command, ParseResult, parse_command};
use super::input::{Action, key_with_modifier_to_action};
use super::state::{AppState, Appearance, Panel, Screen, SidebarRow};
use crate::speech::SpeechEngine;
use crate::study::SubmitOutcome;

/// What the event loop should do after handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Handle one key press
pub fn handle_key(
    state: &mut AppState,
    engine: &mut dyn SpeechEngine,
    code: KeyCode,
    modifiers: KeyModifiers,
    now: Instant,
) -> Flow {
    if state.command_line.is_input_mode() {
        return handle_command_line_key(state, engine, code, now);
    }

    if state.screen == Screen::Help {
        // Any key closes help
        state.screen = Screen::Main;
        return Flow::Continue;
    }

    match key_with_modifier_to_action(code, modifiers) {
        Some(action) => handle_action(state, engine, action, now),
        None => Flow::Continue,
    }
}

/// Apply an action to the main screen
pub fn handle_action(
    state: &mut AppState,
    engine: &mut dyn SpeechEngine,
    action: Action,
    now: Instant,
) -> Flow {
    match action {
        Action::Quit => return Flow::Quit,
        Action::Help => state.screen = Screen::Help,
        Action::CommandMode => state.command_line.enter_command_mode(),

        Action::SwitchPanel => {
            state.focused_panel = match state.focused_panel {
                Panel::Content if state.panel_visibility.sidebar => Panel::Sidebar,
                _ => Panel::Content,
            };
        }
        Action::ToggleSidebar => {
            state.panel_visibility.sidebar = !state.panel_visibility.sidebar;
            if !state.panel_visibility.sidebar {
                state.focused_panel = Panel::Content;
            }
        }

        Action::NextTopic => {
            if !state.next_topic(engine) {
                state.command_line.set_message("Already at the last topic");
            }
        }
        Action::PrevTopic => {
            if !state.prev_topic(engine) {
                state.command_line.set_message("Already at the first topic");
            }
        }

        Action::Speak => toggle_speech(state, engine),
        Action::StopSpeech => state.study.stop_speech(engine),

        Action::FlipCard => state.study.flashcards.flip(),
        Action::MarkCard => {
            if let Some(marked) = state.study.flashcards.toggle_mark() {
                let msg = if marked { "Card marked for review" } else { "Card unmarked" };
                state.command_line.set_message(msg);
            }
        }

        Action::Answer(index) => {
            let topic = state.active_topic.and_then(|i| state.catalog.topic_at(i));
            let outcome = state.study.answer(topic, index, now);
            report_answer(state, outcome);
        }
        Action::NextOption => {
            let topic = state.active_topic.and_then(|i| state.catalog.topic_at(i));
            state.study.quiz.select_next(topic.map(|t| t.questions.as_slice()).unwrap_or_default());
        }
        Action::PrevOption => {
            let topic = state.active_topic.and_then(|i| state.catalog.topic_at(i));
            state.study.quiz.select_prev(topic.map(|t| t.questions.as_slice()).unwrap_or_default());
        }
        Action::RestartQuiz => {
            if state.active_topic.is_some() {
                state.study.quiz.restart();
                state.command_line.set_message("Quiz restarted");
            }
        }

        Action::ToggleTheme => change_appearance(state, |a| a.theme = a.theme.toggled()),
        Action::CycleFont => change_appearance(state, |a| a.font = a.font.cycled()),
        Action::LargerText => change_appearance(state, |a| a.font_size = a.font_size.larger()),
        Action::SmallerText => change_appearance(state, |a| a.font_size = a.font_size.smaller()),

        _ => match state.focused_panel {
            Panel::Sidebar => handle_sidebar_action(state, engine, action),
            Panel::Content => handle_content_action(state, action, now),
        },
    }
    Flow::Continue
}

fn handle_sidebar_action(state: &mut AppState, engine: &mut dyn SpeechEngine, action: Action) {
    let rows = state.sidebar_rows();
    let last = rows.len().saturating_sub(1);
    let page = state.sidebar.visible_height.saturating_sub(2).max(1);

    match action {
        Action::Down => state.sidebar.selected_index = (state.sidebar.selected_index + 1).min(last),
        Action::Up => state.sidebar.selected_index = state.sidebar.selected_index.saturating_sub(1),
        Action::Top => state.sidebar.selected_index = 0,
        Action::Bottom => state.sidebar.selected_index = last,
        Action::PageDown | Action::HalfPageDown => {
            state.sidebar.selected_index = (state.sidebar.selected_index + page).min(last)
        }
        Action::PageUp | Action::HalfPageUp => {
            state.sidebar.selected_index = state.sidebar.selected_index.saturating_sub(page)
        }
        Action::Select => match rows.get(state.sidebar.selected_index) {
            Some(SidebarRow::Group(group_idx)) => {
                let title = state.catalog.groups()[*group_idx].title.clone();
                state.sidebar.toggle_group(&title);
            }
            Some(SidebarRow::Topic(index)) => {
                state.select_topic(*index, engine);
                state.focused_panel = Panel::Content;
            }
            None => {}
        },
        Action::Left => {
            let group_idx = match rows.get(state.sidebar.selected_index) {
                Some(SidebarRow::Group(g)) => Some(*g),
                Some(SidebarRow::Topic(i)) => state.catalog.group_index_of(*i),
                None => None,
            };
            if let Some(group_idx) = group_idx {
                let title = state.catalog.groups()[group_idx].title.clone();
                state.sidebar.expanded_groups.remove(&title);
                if let Some(row) =
                    state.sidebar_rows().iter().position(|r| *r == SidebarRow::Group(group_idx))
                {
                    state.sidebar.selected_index = row;
                }
            }
        }
        Action::Right => {
            if let Some(SidebarRow::Group(group_idx)) = rows.get(state.sidebar.selected_index) {
                let title = state.catalog.groups()[*group_idx].title.clone();
                state.sidebar.expanded_groups.insert(title);
            }
        }
        Action::Back => state.focused_panel = Panel::Content,
        _ => {}
    }

    state.sidebar.ensure_selection_visible();
}

fn handle_content_action(state: &mut AppState, action: Action, now: Instant) {
    let page = state.content.visible_height.max(2) as isize;

    match action {
        Action::Down => state.content.scroll_by(1),
        Action::Up => state.content.scroll_by(-1),
        Action::PageDown => state.content.scroll_by(page),
        Action::PageUp => state.content.scroll_by(-page),
        Action::HalfPageDown => state.content.scroll_by(page / 2),
        Action::HalfPageUp => state.content.scroll_by(-page / 2),
        Action::Top => state.content.scroll_offset = 0,
        Action::Bottom => state.content.scroll_offset = state.content.max_scroll(),
        Action::Left => {
            state.study.flashcards.prev();
        }
        Action::Right => {
            state.study.flashcards.next();
        }
        Action::Select => {
            let topic = state.active_topic.and_then(|i| state.catalog.topic_at(i));
            let outcome = state.study.confirm_answer(topic, now);
            report_answer(state, outcome);
        }
        Action::Back => {
            state.command_line.clear_message();
            if state.panel_visibility.sidebar {
                state.focused_panel = Panel::Sidebar;
            }
        }
        _ => {}
    }
}

fn toggle_speech(state: &mut AppState, engine: &mut dyn SpeechEngine) {
    let topic = state.active_topic.and_then(|i| state.catalog.topic_at(i));
    let playback = state.study.toggle_speech(topic, engine, &state.locale);
    tracing::debug!("Speech is now {:?}", playback);
}

fn report_answer(state: &mut AppState, outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Correct => state.command_line.set_message("Correct!"),
        SubmitOutcome::Incorrect => state.command_line.set_error("Not quite"),
        SubmitOutcome::Ignored => {}
    }
}

fn change_appearance(state: &mut AppState, update: impl FnOnce(&mut Appearance)) {
    let mut appearance = state.appearance.clone();
    update(&mut appearance);
    let msg = format!(
        "Theme {}, font {}, size {}",
        appearance.theme.name(),
        appearance.font.name(),
        appearance.font_size.name()
    );
    state.set_appearance(appearance);
    state.command_line.set_message(msg);
}

/// Handle a key while the command line is open
fn handle_command_line_key(
    state: &mut AppState,
    engine: &mut dyn SpeechEngine,
    code: KeyCode,
    now: Instant,
) -> Flow {
    match code {
        KeyCode::Esc => state.command_line.exit_input_mode(),
        KeyCode::Enter => {
            let input = state.command_line.input.clone();
            state.command_line.add_to_history(input.clone());
            state.command_line.exit_input_mode();
            return run_command_line(state, engine, &input, now);
        }
        KeyCode::Backspace => {
            if state.command_line.input.is_empty() {
                state.command_line.exit_input_mode();
            } else {
                state.command_line.delete_char();
            }
        }
        KeyCode::Left => state.command_line.move_left(),
        KeyCode::Right => state.command_line.move_right(),
        KeyCode::Up => state.command_line.history_up(),
        KeyCode::Down => state.command_line.history_down(),
        KeyCode::Char(c) => state.command_line.insert_char(c),
        _ => {}
    }
    Flow::Continue
}

/// Parse and run a command line entry
pub fn run_command_line(
    state: &mut AppState,
    engine: &mut dyn SpeechEngine,
    input: &str,
    now: Instant,
) -> Flow {
    match parse_command(input) {
        ParseResult::Ok(command) => execute_command(state, engine, command, now),
        ParseResult::UnknownCommand(cmd) => {
            state.command_line.set_error(format!("Unknown command: {}", cmd));
            Flow::Continue
        }
        ParseResult::MissingArgument(cmd) => {
            state.command_line.set_error(format!(":{} needs an argument", cmd));
            Flow::Continue
        }
        ParseResult::InvalidArgument(cmd, arg) => {
            state.command_line.set_error(format!("Invalid argument for :{}: {}", cmd, arg));
            Flow::Continue
        }
    }
}

/// Execute a parsed command
pub fn execute_command(
    state: &mut AppState,
    engine: &mut dyn SpeechEngine,
    command: Command,
    now: Instant,
) -> Flow {
    tracing::debug!("Executing {:?}", command);

    match command {
        Command::Quit => return Flow::Quit,
        Command::Help => state.screen = Screen::Help,
        Command::Nop => state.command_line.clear_message(),
        Command::Theme(mode) => {
            change_appearance(state, |a| a.theme = mode.unwrap_or_else(|| a.theme.toggled()))
        }
        Command::Font(font) => change_appearance(state, |a| a.font = font),
        Command::Size(font_size) => change_appearance(state, |a| a.font_size = font_size),
        Command::Goto(query) => match state.catalog.lookup(&query) {
            Some(index) => {
                state.select_topic(index, engine);
                state.focused_panel = Panel::Content;
            }
            None => state.command_line.set_error(format!("No topic matches '{}'", query)),
        },
        Command::Next => return handle_action(state, engine, Action::NextTopic, now),
        Command::Prev => return handle_action(state, engine, Action::PrevTopic, now),
        Command::Related(n) => {
            let target = state
                .active_topic()
                .and_then(|topic| {
                    n.checked_sub(1).and_then(|i| state.catalog.related_topics(topic).nth(i))
                })
                .map(|t| t.id.clone());
            match target {
                Some(id) => {
                    state.select_topic_by_id(&id, engine);
                }
                None => state.command_line.set_error(format!("No related topic #{}", n)),
            }
        }
        Command::Speak => toggle_speech(state, engine),
        Command::Stop => state.study.stop_speech(engine),
        Command::Restart => return handle_action(state, engine, Action::RestartQuiz, now),
    }
    Flow::Continue
}
