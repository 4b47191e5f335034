//! Flashcards derived from quiz questions

use std::collections::BTreeSet;

use crate::topics::Question;

/// A question on the front, its answer on the back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl From<&Question> for Flashcard {
    fn from(question: &Question) -> Self {
        Self { question: question.question.clone(), answer: question.correct_answer.clone() }
    }
}

/// The deck for one topic, with position, flip state and review marks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    current: usize,
    flipped: bool,
    marked: BTreeSet<usize>,
}

impl FlashcardDeck {
    /// One card per question, in question order
    pub fn from_questions(questions: &[Question]) -> Self {
        Self { cards: questions.iter().map(Flashcard::from).collect(), ..Default::default() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.current)
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.cards.len()
    }

    /// Move to the next card; the new card starts face up
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current += 1;
        self.flipped = false;
        true
    }

    /// Move to the previous card; the new card starts face up
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current -= 1;
        self.flipped = false;
        true
    }

    pub fn flip(&mut self) {
        if !self.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Toggle the review mark on the current card, returning the new state
    pub fn toggle_mark(&mut self) -> Option<bool> {
        if self.is_empty() {
            return None;
        }
        if self.marked.remove(&self.current) {
            Some(false)
        } else {
            self.marked.insert(self.current);
            Some(true)
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    pub fn is_current_marked(&self) -> bool {
        self.is_marked(self.current)
    }

    /// Indices of marked cards, ascending
    pub fn marked(&self) -> impl Iterator<Item = usize> + '_ {
        self.marked.iter().copied()
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }
}
