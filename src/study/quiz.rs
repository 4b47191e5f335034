//! Multiple-choice quiz state machine
//!
//! A quiz runs through the topic's questions in order. Submitting an answer
//! locks the options and shows the outcome for [`ANSWER_REVEAL_DELAY`];
//! the event loop calls [`QuizState::tick`] and the quiz advances once the
//! deadline passes. After the last question the quiz is finished.

use std::time::{Duration, Instant};

use crate::topics::Question;

/// How long the outcome of an answer stays on screen
pub const ANSWER_REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// An answer that has been submitted but not yet moved past
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnswer {
    /// The option the user chose
    pub option: String,
    /// Whether it was the correct answer
    pub correct: bool,
    /// When the quiz moves on
    pub reveal_until: Instant,
}

/// Result of submitting an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    /// An answer was already pending, or there is no question to answer
    Ignored,
}

/// How an answer option should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStyle {
    /// Nothing submitted yet
    Neutral,
    /// The correct answer, after submission
    Correct,
    /// The wrongly chosen answer, after submission
    Incorrect,
    /// Any other option, after submission
    Locked,
}

/// Style for `option` given the submitted answer (if any) and the correct one
pub fn option_style(selected: Option<&str>, correct: &str, option: &str) -> OptionStyle {
    match selected {
        None => OptionStyle::Neutral,
        Some(_) if option == correct => OptionStyle::Correct,
        Some(chosen) if option == chosen => OptionStyle::Incorrect,
        Some(_) => OptionStyle::Locked,
    }
}

/// Progress through a topic's quiz
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
    current_question: usize,
    score: usize,
    completed: bool,
    pending: Option<PendingAnswer>,
    /// Keyboard cursor over the current question's options
    selected_option: usize,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the question being asked
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    /// Number of correct answers so far
    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.completed
    }

    pub fn pending(&self) -> Option<&PendingAnswer> {
        self.pending.as_ref()
    }

    pub fn pending_option(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.option.as_str())
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    /// The question currently on screen, if any
    pub fn current<'a>(&self, questions: &'a [Question]) -> Option<&'a Question> {
        if self.completed { None } else { questions.get(self.current_question) }
    }

    /// Submit `option` as the answer to the current question
    pub fn submit(&mut self, questions: &[Question], option: &str, now: Instant) -> SubmitOutcome {
        if self.pending.is_some() {
            return SubmitOutcome::Ignored;
        }
        let Some(question) = self.current(questions) else {
            return SubmitOutcome::Ignored;
        };

        let correct = question.is_correct(option);
        if correct {
            self.score += 1;
        }
        self.pending = Some(PendingAnswer {
            option: option.to_string(),
            correct,
            reveal_until: now + ANSWER_REVEAL_DELAY,
        });

        if correct { SubmitOutcome::Correct } else { SubmitOutcome::Incorrect }
    }

    /// Submit the option at `index` of the current question
    pub fn submit_index(
        &mut self,
        questions: &[Question],
        index: usize,
        now: Instant,
    ) -> SubmitOutcome {
        if self.pending.is_some() {
            return SubmitOutcome::Ignored;
        }
        let Some(option) = self.current(questions).and_then(|q| q.options.get(index)) else {
            return SubmitOutcome::Ignored;
        };
        let option = option.clone();
        self.selected_option = index;
        self.submit(questions, &option, now)
    }

    /// Submit the option under the keyboard cursor
    pub fn confirm_selection(&mut self, questions: &[Question], now: Instant) -> SubmitOutcome {
        self.submit_index(questions, self.selected_option, now)
    }

    /// Move the option cursor down, wrapping around
    pub fn select_next(&mut self, questions: &[Question]) {
        if self.pending.is_some() {
            return;
        }
        if let Some(question) = self.current(questions) {
            if !question.options.is_empty() {
                self.selected_option = (self.selected_option + 1) % question.options.len();
            }
        }
    }

    /// Move the option cursor up, wrapping around
    pub fn select_prev(&mut self, questions: &[Question]) {
        if self.pending.is_some() {
            return;
        }
        if let Some(question) = self.current(questions) {
            let count = question.options.len();
            if count > 0 {
                self.selected_option = (self.selected_option + count - 1) % count;
            }
        }
    }

    /// Advance past a pending answer once its reveal deadline has passed
    ///
    /// Returns true if the quiz moved on.
    pub fn tick(&mut self, question_count: usize, now: Instant) -> bool {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.reveal_until);
        if !due {
            return false;
        }

        self.pending = None;
        self.selected_option = 0;
        let next = self.current_question + 1;
        if next < question_count {
            self.current_question = next;
        } else {
            self.completed = true;
        }
        true
    }

    /// Start over from the first question
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    /// Presentation style for `option` of `question`
    pub fn style_for(&self, question: &Question, option: &str) -> OptionStyle {
        option_style(self.pending_option(), &question.correct_answer, option)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn question(correct: &str) -> Question {
        Question {
            question: format!("Pick {}", correct),
            options: vec!["A".into(), "B".into(), "C".into()],
            correct_answer: correct.into(),
        }
    }

    fn after_delay(now: Instant) -> Instant {
        now + ANSWER_REVEAL_DELAY
    }

    #[test]
    fn initial_state() {
        let quiz = QuizState::new();
        assert_eq!(quiz.current_question(), 0);
        assert_eq!(quiz.score(), 0);
        assert!(!quiz.is_finished());
        assert!(quiz.pending().is_none());
    }

    #[test]
    fn two_question_walkthrough() {
        let questions = vec![question("A"), question("B")];
        let mut quiz = QuizState::new();
        let t0 = Instant::now();

        assert_eq!(quiz.submit(&questions, "A", t0), SubmitOutcome::Correct);
        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.pending_option(), Some("A"));

        assert!(quiz.tick(questions.len(), after_delay(t0)));
        assert_eq!(quiz.current_question(), 1);
        assert!(quiz.pending().is_none());

        let t1 = after_delay(t0);
        assert_eq!(quiz.submit(&questions, "C", t1), SubmitOutcome::Incorrect);
        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.pending_option(), Some("C"));

        assert!(quiz.tick(questions.len(), after_delay(t1)));
        assert!(quiz.is_finished());
        assert_eq!(quiz.score(), 1);
        assert!(quiz.current(&questions).is_none());
    }

    #[test]
    fn submit_while_pending_is_ignored() {
        let questions = vec![question("A"), question("B")];
        let mut quiz = QuizState::new();
        let now = Instant::now();

        quiz.submit(&questions, "B", now);
        let before = quiz.clone();
        assert_eq!(quiz.submit(&questions, "A", now), SubmitOutcome::Ignored);
        assert_eq!(quiz, before);
    }

    #[test]
    fn tick_before_deadline_keeps_answer_visible() {
        let questions = vec![question("A"), question("B")];
        let mut quiz = QuizState::new();
        let now = Instant::now();

        quiz.submit(&questions, "A", now);
        assert!(!quiz.tick(questions.len(), now + Duration::from_millis(1499)));
        assert_eq!(quiz.current_question(), 0);
        assert_eq!(quiz.pending_option(), Some("A"));
    }

    #[test]
    fn tick_without_pending_does_nothing() {
        let mut quiz = QuizState::new();
        assert!(!quiz.tick(3, Instant::now()));
        assert_eq!(quiz, QuizState::new());
    }

    #[test]
    fn no_questions_is_inert() {
        let mut quiz = QuizState::new();
        let now = Instant::now();
        assert!(quiz.current(&[]).is_none());
        assert_eq!(quiz.submit(&[], "A", now), SubmitOutcome::Ignored);
        assert_eq!(quiz.submit_index(&[], 0, now), SubmitOutcome::Ignored);
        assert!(!quiz.tick(0, after_delay(now)));
        assert!(!quiz.is_finished());
    }

    #[test]
    fn restart_from_finished() {
        let questions = vec![question("A")];
        let mut quiz = QuizState::new();
        let now = Instant::now();
        quiz.submit(&questions, "A", now);
        quiz.tick(1, after_delay(now));
        assert!(quiz.is_finished());

        quiz.restart();
        assert_eq!(quiz, QuizState::new());
    }

    #[test]
    fn restart_drops_pending_answer() {
        let questions = vec![question("A"), question("B")];
        let mut quiz = QuizState::new();
        let now = Instant::now();
        quiz.submit(&questions, "A", now);

        quiz.restart();
        assert!(quiz.pending().is_none());
        assert!(!quiz.tick(2, after_delay(now)));
        assert_eq!(quiz.current_question(), 0);
    }

    #[test]
    fn submit_by_index_and_cursor() {
        let questions = vec![question("B"), question("C")];
        let mut quiz = QuizState::new();
        let now = Instant::now();

        quiz.select_next(&questions);
        assert_eq!(quiz.selected_option(), 1);
        assert_eq!(quiz.confirm_selection(&questions, now), SubmitOutcome::Correct);

        quiz.tick(2, after_delay(now));
        assert_eq!(quiz.selected_option(), 0);
        assert_eq!(quiz.submit_index(&questions, 7, now), SubmitOutcome::Ignored);
        assert_eq!(quiz.submit_index(&questions, 2, now), SubmitOutcome::Correct);
        assert_eq!(quiz.score(), 2);
    }

    #[test]
    fn cursor_wraps_and_freezes_while_pending() {
        let questions = vec![question("A")];
        let mut quiz = QuizState::new();

        quiz.select_prev(&questions);
        assert_eq!(quiz.selected_option(), 2);
        quiz.select_next(&questions);
        assert_eq!(quiz.selected_option(), 0);

        quiz.submit(&questions, "A", Instant::now());
        quiz.select_next(&questions);
        assert_eq!(quiz.selected_option(), 0);
    }

    #[test]
    fn option_styles_before_and_after_submission() {
        assert_eq!(option_style(None, "B", "A"), OptionStyle::Neutral);
        assert_eq!(option_style(None, "B", "B"), OptionStyle::Neutral);

        // Wrong answer chosen
        assert_eq!(option_style(Some("A"), "B", "A"), OptionStyle::Incorrect);
        assert_eq!(option_style(Some("A"), "B", "B"), OptionStyle::Correct);
        assert_eq!(option_style(Some("A"), "B", "C"), OptionStyle::Locked);

        // Right answer chosen
        assert_eq!(option_style(Some("B"), "B", "B"), OptionStyle::Correct);
        assert_eq!(option_style(Some("B"), "B", "A"), OptionStyle::Locked);
    }

    #[test]
    fn styles_stay_stable_during_reveal() {
        let questions = vec![question("B")];
        let mut quiz = QuizState::new();
        let now = Instant::now();
        quiz.submit(&questions, "C", now);

        quiz.tick(1, now + Duration::from_millis(500));
        let q = &questions[0];
        assert_eq!(quiz.style_for(q, "B"), OptionStyle::Correct);
        assert_eq!(quiz.style_for(q, "C"), OptionStyle::Incorrect);
        assert_eq!(quiz.style_for(q, "A"), OptionStyle::Locked);
    }

    proptest! {
        #[test]
        fn all_correct_scores_question_count(n in 1usize..20) {
            let questions: Vec<Question> = (0..n).map(|_| question("A")).collect();
            let mut quiz = QuizState::new();
            let mut now = Instant::now();

            for i in 0..n {
                prop_assert!(!quiz.is_finished());
                prop_assert_eq!(quiz.current_question(), i);
                prop_assert_eq!(quiz.submit(&questions, "A", now), SubmitOutcome::Correct);
                now = after_delay(now);
                prop_assert!(quiz.tick(n, now));
            }

            prop_assert!(quiz.is_finished());
            prop_assert_eq!(quiz.score(), n);
        }

        #[test]
        fn score_never_exceeds_answered(answers in proptest::collection::vec(0usize..3, 1..15)) {
            let questions: Vec<Question> = answers.iter().map(|_| question("B")).collect();
            let mut quiz = QuizState::new();
            let mut now = Instant::now();
            let mut expected = 0;

            for &choice in &answers {
                if choice == 1 {
                    expected += 1;
                }
                quiz.submit_index(&questions, choice, now);
                // A second submission during the reveal never counts
                quiz.submit_index(&questions, 1, now);
                now = after_delay(now);
                quiz.tick(questions.len(), now);
            }

            prop_assert_eq!(quiz.score(), expected);
            prop_assert!(quiz.is_finished());
        }
    }
}
