//! Error types for loading topic data

use thiserror::Error;

/// Errors raised while loading or validating a topic data set
#[derive(Debug, Error)]
pub enum TopicError {
    /// The data set contains no topics at all
    #[error("topic data set is empty")]
    Empty,

    /// Two topics share an id
    #[error("duplicate topic id '{0}'")]
    DuplicateId(String),

    /// A question's correct answer is not one of its options
    #[error("topic '{topic}', question {question}: correct answer '{answer}' is not an option")]
    AnswerNotAnOption {
        /// Topic id
        topic: String,
        /// 1-based question number
        question: usize,
        /// The offending answer
        answer: String,
    },

    /// A question offers fewer than two options
    #[error("topic '{topic}', question {question}: needs at least two options")]
    TooFewOptions {
        /// Topic id
        topic: String,
        /// 1-based question number
        question: usize,
    },

    /// Reading the data file failed
    #[error("failed to read topic data: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON did not match the expected shape
    #[error("invalid topic data: {0}")]
    Json(#[from] serde_json::Error),
}

impl TopicError {
    /// Whether the error is about the content rather than reading/parsing it
    pub fn is_validation(&self) -> bool {
        !matches!(self, TopicError::Io(_) | TopicError::Json(_))
    }
}
