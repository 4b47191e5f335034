//! Topic data set

pub mod error;
pub mod model;
pub mod storage;

pub use error::TopicError;
pub use model::{Catalog, Question, Source, TimelineEvent, Topic, TopicGroup};
pub use storage::{bundled_catalog, load_catalog, parse_catalog};
