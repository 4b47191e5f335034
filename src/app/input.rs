//! Key mapping for the main screen

use crossterm::event::{KeyCode, KeyModifiers};

/// Vim-style key mapping (basic, without modifiers)
pub fn vim_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        // Movement
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Left),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::Right),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Char('d') | KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Char('u') | KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Tab => Some(Action::SwitchPanel),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char(':') => Some(Action::CommandMode),
        KeyCode::Char('[') => Some(Action::ToggleSidebar),

        // Topics
        KeyCode::Char('n') => Some(Action::NextTopic),
        KeyCode::Char('p') => Some(Action::PrevTopic),

        // Speech
        KeyCode::Char('s') => Some(Action::Speak),
        KeyCode::Char('x') => Some(Action::StopSpeech),

        // Flashcards
        KeyCode::Char('f') | KeyCode::Char(' ') => Some(Action::FlipCard),
        KeyCode::Char('m') => Some(Action::MarkCard),

        // Quiz
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Action::Answer(d as usize - 1)),
        KeyCode::Char('o') => Some(Action::NextOption),
        KeyCode::Char('O') => Some(Action::PrevOption),
        KeyCode::Char('r') => Some(Action::RestartQuiz),

        // Appearance
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('F') => Some(Action::CycleFont),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::LargerText),
        KeyCode::Char('-') => Some(Action::SmallerText),

        // Note: 'q' intentionally not mapped - use :q command to quit
        _ => None,
    }
}

/// Key mapping with modifiers (for Ctrl combinations)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('d') => Some(Action::HalfPageDown),
            KeyCode::Char('u') => Some(Action::HalfPageUp),
            KeyCode::Char('f') => Some(Action::PageDown),
            KeyCode::Char('b') => Some(Action::PageUp),
            _ => None,
        }
    } else {
        vim_key_to_action(key)
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,

    // Selection
    Select,
    Back,

    // Panel management
    SwitchPanel,
    ToggleSidebar,

    // Topics
    NextTopic,
    PrevTopic,

    // Speech
    Speak,
    StopSpeech,

    // Flashcards
    FlipCard,
    MarkCard,

    // Quiz (option number is zero-based)
    Answer(usize),
    NextOption,
    PrevOption,
    RestartQuiz,

    // Appearance
    ToggleTheme,
    CycleFont,
    LargerText,
    SmallerText,

    // Modes
    CommandMode,
    Help,
    Quit,
}
