//! Text-to-speech engine interface
//!
//! The study panel drives an engine through [`SpeechEngine`] and learns
//! about playback progress from [`SpeechEvent`]s sent on a channel. At most
//! one utterance is active at a time.

pub mod narrator;
pub mod words;

pub use narrator::Narrator;
pub use words::{WordSpan, tokenize, word_at};

/// Identifies one `speak` request
pub type UtteranceId = u64;

/// Notifications emitted by an engine while an utterance plays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// The engine reached a word starting at `char_index` (in chars)
    Boundary { utterance: UtteranceId, char_index: usize },
    /// The utterance finished naturally
    End { utterance: UtteranceId },
    /// The engine gave up on the utterance
    Error { utterance: UtteranceId, reason: String },
}

impl SpeechEvent {
    /// The utterance this event belongs to
    pub fn utterance(&self) -> UtteranceId {
        match self {
            SpeechEvent::Boundary { utterance, .. }
            | SpeechEvent::End { utterance }
            | SpeechEvent::Error { utterance, .. } => *utterance,
        }
    }
}

/// A speech synthesis backend
pub trait SpeechEngine {
    /// Start reading `text`, replacing anything currently playing
    fn speak(&mut self, text: &str, locale: &str) -> UtteranceId;

    /// Pause the current utterance, keeping its position
    fn pause(&mut self);

    /// Resume a paused utterance
    fn resume(&mut self);

    /// Abandon the current utterance, if any
    fn cancel(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    //! An engine that only records what it was asked to do

    use super::{SpeechEngine, UtteranceId};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum EngineCall {
        Speak { text: String, locale: String, id: UtteranceId },
        Pause,
        Resume,
        Cancel,
    }

    #[derive(Debug, Default)]
    pub struct RecordingEngine {
        pub calls: Vec<EngineCall>,
        next_id: UtteranceId,
    }

    impl RecordingEngine {
        pub fn new() -> Self {
            Self::default()
        }

        /// Id handed out by the most recent `speak`
        pub fn last_utterance(&self) -> Option<UtteranceId> {
            self.calls.iter().rev().find_map(|c| match c {
                EngineCall::Speak { id, .. } => Some(*id),
                _ => None,
            })
        }
    }

    impl SpeechEngine for RecordingEngine {
        fn speak(&mut self, text: &str, locale: &str) -> UtteranceId {
            self.next_id += 1;
            let id = self.next_id;
            self.calls.push(EngineCall::Speak { text: text.into(), locale: locale.into(), id });
            id
        }

        fn pause(&mut self) {
            self.calls.push(EngineCall::Pause);
        }

        fn resume(&mut self) {
            self.calls.push(EngineCall::Resume);
        }

        fn cancel(&mut self) {
            self.calls.push(EngineCall::Cancel);
        }
    }
}
