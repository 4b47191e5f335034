//! Application state and event handling

pub mod command;
pub mod handler;
pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::speech::{Narrator, SpeechEvent};
use crate::theme::ThemeMode;
use crate::topics::Catalog;
use crate::ui;
use handler::Flow;
use state::{AppState, Appearance};

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Speech engine reading topic summaries
    narrator: Narrator,

    /// Notifications from the narrator
    speech_events: mpsc::UnboundedReceiver<SpeechEvent>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance, optionally opening a topic by id
    pub fn new(config: Config, catalog: Catalog, initial_topic: Option<&str>) -> Result<Self> {
        let (events_tx, speech_events) = mpsc::unbounded_channel();
        let mut narrator = Narrator::new(events_tx)
            .with_words_per_minute(config.speech.words_per_minute)
            .with_voice_command(config.speech.voice_command.clone());

        let appearance = Appearance::from_config(&config, ThemeMode::detect());
        let mut state = AppState::new(catalog, appearance, config.speech.locale.clone());

        if let Some(id) = initial_topic {
            if !state.select_topic_by_id(id, &mut narrator) {
                bail!("Unknown topic '{}'", id);
            }
        }

        let terminal = Self::setup_terminal()?;

        Ok(Self { config, state, narrator, speech_events, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state);
            })?;

            // Handle input
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let flow = handler::handle_key(
                            &mut self.state,
                            &mut self.narrator,
                            key.code,
                            key.modifiers,
                            Instant::now(),
                        );
                        if flow == Flow::Quit {
                            break;
                        }
                    }
                }
            }

            self.drain_speech_events();

            // Advance the quiz past a revealed answer
            let now = Instant::now();
            let topic = self.state.active_topic.and_then(|i| self.state.catalog.topic_at(i));
            self.state.study.tick(topic, now);

            self.save_preferences();

            // Let narration tasks make progress
            tokio::task::yield_now().await;
        }

        self.state.study.stop_speech(&mut self.narrator);
        self.restore_terminal()?;
        Ok(())
    }

    /// Apply every pending narrator notification
    fn drain_speech_events(&mut self) {
        while let Ok(event) = self.speech_events.try_recv() {
            self.state.study.handle_speech_event(&event);
        }
    }

    /// Persist changed preferences; failures are reported, never fatal
    fn save_preferences(&mut self) {
        if !self.state.appearance_dirty {
            return;
        }
        self.state.appearance_dirty = false;
        self.state.appearance.store(&mut self.config);

        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save preferences: {:#}", e);
            self.state.command_line.set_error(format!("Could not save preferences: {}", e));
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
