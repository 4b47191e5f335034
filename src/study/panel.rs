//! Per-topic study state
//!
//! The panel owns the quiz, flashcard and playback state of whichever topic
//! is on screen. Loading a topic (even the same one again) resets all three.

use std::time::Instant;

use super::flashcards::FlashcardDeck;
use super::quiz::{QuizState, SubmitOutcome};
use super::speech::{PlaybackState, SpeechController};
use crate::speech::{SpeechEngine, SpeechEvent};
use crate::topics::Topic;

/// Study state for the active topic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyPanel {
    topic_id: Option<String>,
    pub quiz: QuizState,
    pub flashcards: FlashcardDeck,
    pub speech: SpeechController,
}

impl StudyPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the topic this state belongs to
    pub fn topic_id(&self) -> Option<&str> {
        self.topic_id.as_deref()
    }

    /// Switch to `topic`, discarding all progress on the previous one
    pub fn load_topic(&mut self, topic: Option<&Topic>, engine: &mut dyn SpeechEngine) {
        self.speech.stop(engine);
        self.quiz = QuizState::new();
        self.flashcards =
            topic.map(|t| FlashcardDeck::from_questions(&t.questions)).unwrap_or_default();
        self.topic_id = topic.map(|t| t.id.clone());
        tracing::debug!("Study panel reset for {:?}", self.topic_id);
    }

    /// Answer the current quiz question with option number `index`
    pub fn answer(&mut self, topic: Option<&Topic>, index: usize, now: Instant) -> SubmitOutcome {
        match topic {
            Some(topic) => self.quiz.submit_index(&topic.questions, index, now),
            None => SubmitOutcome::Ignored,
        }
    }

    /// Answer with the option under the quiz cursor
    pub fn confirm_answer(&mut self, topic: Option<&Topic>, now: Instant) -> SubmitOutcome {
        match topic {
            Some(topic) => self.quiz.confirm_selection(&topic.questions, now),
            None => SubmitOutcome::Ignored,
        }
    }

    /// Speak, pause or resume the topic summary
    pub fn toggle_speech(
        &mut self,
        topic: Option<&Topic>,
        engine: &mut dyn SpeechEngine,
        locale: &str,
    ) -> PlaybackState {
        match topic {
            Some(topic) => self.speech.toggle(engine, &topic.summary, locale),
            None => self.speech.state(),
        }
    }

    pub fn stop_speech(&mut self, engine: &mut dyn SpeechEngine) {
        self.speech.stop(engine);
    }

    pub fn handle_speech_event(&mut self, event: &SpeechEvent) -> bool {
        self.speech.handle_event(event)
    }

    /// Advance timers; returns true if the quiz moved on
    pub fn tick(&mut self, topic: Option<&Topic>, now: Instant) -> bool {
        let count = topic.map_or(0, |t| t.questions.len());
        self.quiz.tick(count, now)
    }
}
