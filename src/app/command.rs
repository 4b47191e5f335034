//! Command parsing for the command line

use crate::config::{FontFace, FontSize};
use crate::theme::ThemeMode;

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Quit the application: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Switch theme: :theme [light|dark|toggle] (None toggles)
    Theme(Option<ThemeMode>),
    /// Body text style: :font <regular|bold|italic>
    Font(FontFace),
    /// Body text size: :size <small|medium|large>
    Size(FontSize),
    /// Open a topic by id or title: :goto <id>
    Goto(String),
    /// Next topic: :next
    Next,
    /// Previous topic: :prev
    Prev,
    /// Open the n-th related topic (1-based): :related <n>
    Related(usize),
    /// Speak, pause or resume the summary: :speak
    Speak,
    /// Stop speech: :stop
    Stop,
    /// Restart the quiz: :restart
    Restart,
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument not understood (command, argument)
    InvalidArgument(String, String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    // Split into command and arguments
    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        "theme" => match args.to_lowercase().as_str() {
            "" | "toggle" => ParseResult::Ok(Command::Theme(None)),
            other => match ThemeMode::from_name(other) {
                Some(mode) => ParseResult::Ok(Command::Theme(Some(mode))),
                None => invalid("theme", args),
            },
        },
        "font" => {
            if args.is_empty() {
                ParseResult::MissingArgument("font".to_string())
            } else {
                match FontFace::from_name(args) {
                    Some(face) => ParseResult::Ok(Command::Font(face)),
                    None => invalid("font", args),
                }
            }
        }
        "size" => {
            if args.is_empty() {
                ParseResult::MissingArgument("size".to_string())
            } else {
                match FontSize::from_name(args) {
                    Some(size) => ParseResult::Ok(Command::Size(size)),
                    None => invalid("size", args),
                }
            }
        }
        "goto" | "g" => {
            if args.is_empty() {
                ParseResult::MissingArgument("goto".to_string())
            } else {
                ParseResult::Ok(Command::Goto(args.to_string()))
            }
        }
        "next" | "n" => ParseResult::Ok(Command::Next),
        "prev" | "p" => ParseResult::Ok(Command::Prev),
        "related" | "r" => {
            if args.is_empty() {
                ParseResult::MissingArgument("related".to_string())
            } else {
                match args.parse::<usize>() {
                    Ok(n) if n > 0 => ParseResult::Ok(Command::Related(n)),
                    _ => invalid("related", args),
                }
            }
        }
        "speak" => ParseResult::Ok(Command::Speak),
        "stop" => ParseResult::Ok(Command::Stop),
        "restart" => ParseResult::Ok(Command::Restart),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

fn invalid(cmd: &str, arg: &str) -> ParseResult {
    ParseResult::InvalidArgument(cmd.to_string(), arg.to_string())
}
