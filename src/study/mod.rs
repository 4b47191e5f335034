//! Quiz, flashcards and narrated reading for the active topic

pub mod flashcards;
pub mod panel;
pub mod quiz;
pub mod speech;

pub use flashcards::{Flashcard, FlashcardDeck};
pub use panel::StudyPanel;
pub use quiz::{ANSWER_REVEAL_DELAY, OptionStyle, QuizState, SubmitOutcome, option_style};
pub use speech::{PlaybackState, SpeechController};
