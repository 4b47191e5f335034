//! Summary playback state
//!
//! Tracks whether the summary is being read, which utterance is ours, and
//! the word currently being spoken.

use crate::speech::{SpeechEngine, SpeechEvent, UtteranceId, WordSpan, tokenize, word_at};

/// Playback state of the summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Speaking,
    Paused,
}

/// Drives a [`SpeechEngine`] for one topic's summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeechController {
    state: PlaybackState,
    utterance: Option<UtteranceId>,
    words: Vec<WordSpan>,
    highlight: Option<WordSpan>,
}

impl SpeechController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether an utterance is playing or paused
    pub fn is_active(&self) -> bool {
        self.state != PlaybackState::Idle
    }

    /// The word being spoken, as character offsets into the summary
    pub fn highlight(&self) -> Option<WordSpan> {
        self.highlight
    }

    /// Speak, pause, or resume depending on the current state
    pub fn toggle(
        &mut self,
        engine: &mut dyn SpeechEngine,
        text: &str,
        locale: &str,
    ) -> PlaybackState {
        match self.state {
            PlaybackState::Idle => {
                // Only one utterance may play at a time
                engine.cancel();
                self.words = tokenize(text);
                self.highlight = None;
                self.utterance = Some(engine.speak(text, locale));
                self.state = PlaybackState::Speaking;
            }
            PlaybackState::Speaking => {
                engine.pause();
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                engine.resume();
                self.state = PlaybackState::Speaking;
            }
        }
        self.state
    }

    /// Cancel playback and return to idle
    pub fn stop(&mut self, engine: &mut dyn SpeechEngine) {
        engine.cancel();
        self.finish();
    }

    /// Apply an engine notification; returns true if anything changed
    pub fn handle_event(&mut self, event: &SpeechEvent) -> bool {
        if self.utterance != Some(event.utterance()) {
            tracing::trace!("Ignoring event for stale utterance {}", event.utterance());
            return false;
        }

        match event {
            SpeechEvent::Boundary { char_index, .. } => {
                let word = word_at(&self.words, *char_index);
                let changed = word != self.highlight;
                self.highlight = word;
                changed
            }
            SpeechEvent::End { .. } => {
                self.finish();
                true
            }
            SpeechEvent::Error { reason, .. } => {
                tracing::warn!("Speech playback failed: {}", reason);
                self.finish();
                true
            }
        }
    }

    fn finish(&mut self) {
        self.state = PlaybackState::Idle;
        self.utterance = None;
        self.highlight = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::speech::testing::{EngineCall, RecordingEngine};

    const SUMMARY: &str = "Rome grew along the Tiber";

    fn speaking() -> (SpeechController, RecordingEngine, UtteranceId) {
        let mut engine = RecordingEngine::new();
        let mut speech = SpeechController::new();
        speech.toggle(&mut engine, SUMMARY, "en-US");
        let id = engine.last_utterance().unwrap();
        (speech, engine, id)
    }

    #[test]
    fn toggle_cycles_speak_pause_resume() {
        let mut engine = RecordingEngine::new();
        let mut speech = SpeechController::new();

        assert_eq!(speech.toggle(&mut engine, SUMMARY, "pt-BR"), PlaybackState::Speaking);
        assert_eq!(speech.toggle(&mut engine, SUMMARY, "pt-BR"), PlaybackState::Paused);
        assert_eq!(speech.toggle(&mut engine, SUMMARY, "pt-BR"), PlaybackState::Speaking);

        assert_eq!(
            engine.calls,
            vec![
                EngineCall::Cancel,
                EngineCall::Speak { text: SUMMARY.into(), locale: "pt-BR".into(), id: 1 },
                EngineCall::Pause,
                EngineCall::Resume,
            ]
        );
    }

    #[test]
    fn stop_from_speaking_or_paused_clears_highlight() {
        for pause_first in [false, true] {
            let (mut speech, mut engine, id) = speaking();
            speech.handle_event(&SpeechEvent::Boundary { utterance: id, char_index: 5 });
            if pause_first {
                speech.toggle(&mut engine, SUMMARY, "en-US");
                assert_eq!(speech.state(), PlaybackState::Paused);
            }

            speech.stop(&mut engine);
            assert_eq!(speech.state(), PlaybackState::Idle);
            assert_eq!(speech.highlight(), None);
            assert_eq!(engine.calls.last(), Some(&EngineCall::Cancel));
        }
    }

    #[test]
    fn boundary_highlights_word() {
        let (mut speech, _engine, id) = speaking();

        assert!(speech.handle_event(&SpeechEvent::Boundary { utterance: id, char_index: 5 }));
        let word = speech.highlight().unwrap();
        assert_eq!((word.start, word.end), (5, 9));
        assert_eq!(word.text(SUMMARY), "grew");

        // Same word again is not a change
        assert!(!speech.handle_event(&SpeechEvent::Boundary { utterance: id, char_index: 6 }));
    }

    #[test]
    fn end_and_error_return_to_idle() {
        let (mut speech, _engine, id) = speaking();
        speech.handle_event(&SpeechEvent::Boundary { utterance: id, char_index: 0 });
        assert!(speech.handle_event(&SpeechEvent::End { utterance: id }));
        assert_eq!(speech, SpeechController { words: speech.words.clone(), ..Default::default() });

        let (mut speech, _engine, id) = speaking();
        speech.handle_event(&SpeechEvent::Error { utterance: id, reason: "busy".into() });
        assert_eq!(speech.state(), PlaybackState::Idle);
        assert_eq!(speech.highlight(), None);
    }

    #[test]
    fn stale_utterance_events_are_ignored() {
        let (mut speech, mut engine, old) = speaking();
        speech.stop(&mut engine);
        speech.toggle(&mut engine, SUMMARY, "en-US");
        let current = engine.last_utterance().unwrap();
        assert_ne!(old, current);

        assert!(!speech.handle_event(&SpeechEvent::End { utterance: old }));
        assert_eq!(speech.state(), PlaybackState::Speaking);
        assert!(!speech.handle_event(&SpeechEvent::Boundary { utterance: old, char_index: 5 }));
        assert_eq!(speech.highlight(), None);
    }

    #[test]
    fn events_while_idle_are_ignored() {
        let mut speech = SpeechController::new();
        assert!(!speech.handle_event(&SpeechEvent::End { utterance: 1 }));
        assert_eq!(speech.state(), PlaybackState::Idle);
    }

    #[test]
    fn speaking_again_after_end_restarts_from_the_top() {
        let (mut speech, mut engine, id) = speaking();
        speech.handle_event(&SpeechEvent::End { utterance: id });

        speech.toggle(&mut engine, SUMMARY, "en-US");
        assert_eq!(speech.state(), PlaybackState::Speaking);
        let speaks = engine.calls.iter().filter(|c| matches!(c, EngineCall::Speak { .. })).count();
        assert_eq!(speaks, 2);
    }
}
