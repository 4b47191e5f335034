//! Application state definitions

use std::collections::HashSet;

use crate::config::{Config, FontFace, FontSize};
use crate::speech::SpeechEngine;
use crate::study::StudyPanel;
use crate::theme::ThemeMode;
use crate::topics::{Catalog, Topic};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Main,
    Help,
}

/// Which panel is currently focused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    Sidebar,
    #[default]
    Content,
}

/// Panel visibility settings
#[derive(Debug, Clone)]
pub struct PanelVisibility {
    /// Show the topic (left) panel
    pub sidebar: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self { sidebar: true }
    }
}

/// A visible row of the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarRow {
    /// Group header (group index)
    Group(usize),
    /// Topic (flat topic index)
    Topic(usize),
}

/// State for the topic sidebar
#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    /// Currently selected row (flat index over visible rows)
    pub selected_index: usize,
    /// Titles of expanded groups
    pub expanded_groups: HashSet<String>,
    /// Scroll offset for long lists
    pub scroll_offset: usize,
    /// Visible height in rows (updated on render)
    pub visible_height: usize,
}

impl SidebarState {
    /// Ensure the selected item is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        }
        let visible = self.visible_height.saturating_sub(2);
        if visible > 0 && self.selected_index >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_index.saturating_sub(visible) + 1;
        }
    }

    pub fn is_expanded(&self, group_title: &str) -> bool {
        self.expanded_groups.contains(group_title)
    }

    /// Expand a collapsed group or collapse an expanded one
    pub fn toggle_group(&mut self, group_title: &str) {
        if !self.expanded_groups.remove(group_title) {
            self.expanded_groups.insert(group_title.to_string());
        }
    }
}

/// State for content rendering
#[derive(Debug, Clone, Default)]
pub struct ContentState {
    /// Current scroll position (lines from top)
    pub scroll_offset: usize,
    /// Total rendered lines (updated on render)
    pub total_lines: usize,
    /// Visible height in lines (updated on render)
    pub visible_height: usize,
}

impl ContentState {
    /// Get the maximum allowed scroll offset
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height / 2)
    }

    /// Clamp scroll offset to valid range
    pub fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.clamp_scroll();
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Normal mode - command line hidden or showing status
    #[default]
    Normal,
    /// Command mode - accepting : commands
    Command,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    /// Current mode
    pub mode: CommandMode,
    /// Input buffer
    pub input: String,
    /// Cursor position in input
    pub cursor: usize,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
    /// Command history
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
}

impl CommandLineState {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 100;

    /// Start command mode
    pub fn enter_command_mode(&mut self) {
        self.mode = CommandMode::Command;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
        self.history_index = None;
    }

    /// Exit input mode
    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at cursor (cursor is character index)
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Check if we're in input mode
    pub fn is_input_mode(&self) -> bool {
        self.mode == CommandMode::Command
    }

    /// Add to history, skipping empty input and immediate repeats
    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    /// Navigate history up
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        match self.history_index {
            None => self.history_index = Some(self.history.len() - 1),
            Some(i) if i > 0 => self.history_index = Some(i - 1),
            _ => {}
        }
        if let Some(i) = self.history_index {
            self.input = self.history[i].clone();
            self.cursor = self.char_count();
        }
    }

    /// Navigate history down
    pub fn history_down(&mut self) {
        if let Some(i) = self.history_index {
            if i + 1 < self.history.len() {
                self.history_index = Some(i + 1);
                self.input = self.history[i + 1].clone();
                self.cursor = self.char_count();
            } else {
                self.history_index = None;
                self.input.clear();
                self.cursor = 0;
            }
        }
    }
}

/// User-facing preferences that are persisted when changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appearance {
    pub theme: ThemeMode,
    pub font: FontFace,
    pub font_size: FontSize,
}

impl Appearance {
    pub fn from_config(config: &Config, detected: Option<ThemeMode>) -> Self {
        Self {
            theme: config.initial_theme_mode(detected),
            font: config.font,
            font_size: config.font_size,
        }
    }

    /// Copy the preferences into `config` for saving
    pub fn store(&self, config: &mut Config) {
        config.theme = Some(self.theme);
        config.font = self.font;
        config.font_size = self.font_size;
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// The topic data set
    pub catalog: Catalog,

    /// Flat index of the topic on screen
    pub active_topic: Option<usize>,

    /// Quiz, flashcards and playback for the active topic
    pub study: StudyPanel,

    /// Theme and font preferences
    pub appearance: Appearance,

    /// Set when `appearance` changed and should be saved
    pub appearance_dirty: bool,

    /// Locale used for speech
    pub locale: String,

    /// Panel visibility settings
    pub panel_visibility: PanelVisibility,

    /// Currently focused panel
    pub focused_panel: Panel,

    /// Sidebar browser state
    pub sidebar: SidebarState,

    /// Content rendering state
    pub content: ContentState,

    /// Command line state
    pub command_line: CommandLineState,
}

impl AppState {
    /// Fresh state over a catalog; no topic is active yet
    pub fn new(catalog: Catalog, appearance: Appearance, locale: impl Into<String>) -> Self {
        Self { catalog, appearance, locale: locale.into(), ..Default::default() }
    }

    /// The topic on screen
    pub fn active_topic(&self) -> Option<&Topic> {
        self.active_topic.and_then(|i| self.catalog.topic_at(i))
    }

    pub fn has_prev_topic(&self) -> bool {
        self.active_topic.and_then(|i| self.catalog.previous_index(i)).is_some()
    }

    pub fn has_next_topic(&self) -> bool {
        self.active_topic.and_then(|i| self.catalog.next_index(i)).is_some()
    }

    /// Rows shown in the sidebar: every group header, plus the topics of
    /// expanded groups
    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for (group_idx, group) in self.catalog.groups().iter().enumerate() {
            rows.push(SidebarRow::Group(group_idx));
            if self.sidebar.is_expanded(&group.title) {
                let start = self.catalog.group_start(group_idx);
                rows.extend((start..start + group.topics.len()).map(SidebarRow::Topic));
            }
        }
        rows
    }

    /// The row under the sidebar cursor
    pub fn selected_sidebar_row(&self) -> Option<SidebarRow> {
        self.sidebar_rows().get(self.sidebar.selected_index).copied()
    }

    /// Make the topic at flat `index` active and reset its study state
    pub fn select_topic(&mut self, index: usize, engine: &mut dyn SpeechEngine) -> bool {
        let Some(topic) = self.catalog.topic_at(index) else {
            return false;
        };
        tracing::info!("Opening topic '{}'", topic.id);

        self.study.load_topic(Some(topic), engine);
        self.active_topic = Some(index);
        self.content.scroll_offset = 0;

        if let Some(group_idx) = self.catalog.group_index_of(index) {
            let title = self.catalog.groups()[group_idx].title.clone();
            self.sidebar.expanded_groups.insert(title);
        }
        if let Some(row) = self.sidebar_rows().iter().position(|r| *r == SidebarRow::Topic(index)) {
            self.sidebar.selected_index = row;
            self.sidebar.ensure_selection_visible();
        }
        true
    }

    /// Make the topic with `id` active
    pub fn select_topic_by_id(&mut self, id: &str, engine: &mut dyn SpeechEngine) -> bool {
        match self.catalog.position(id) {
            Some(index) => self.select_topic(index, engine),
            None => false,
        }
    }

    pub fn next_topic(&mut self, engine: &mut dyn SpeechEngine) -> bool {
        match self.active_topic.and_then(|i| self.catalog.next_index(i)) {
            Some(index) => self.select_topic(index, engine),
            None => false,
        }
    }

    pub fn prev_topic(&mut self, engine: &mut dyn SpeechEngine) -> bool {
        match self.active_topic.and_then(|i| self.catalog.previous_index(i)) {
            Some(index) => self.select_topic(index, engine),
            None => false,
        }
    }

    /// Record a preference change
    pub fn set_appearance(&mut self, appearance: Appearance) {
        if appearance != self.appearance {
            self.appearance = appearance;
            self.appearance_dirty = true;
        }
    }
}
