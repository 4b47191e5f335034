//! Topic data model
//!
//! A catalog is an ordered list of topic groups. Every topic carries its own
//! summary, curiosity, quiz questions and optional timeline, sources and
//! related-topic links. Nothing here is mutated after loading.

use serde::{Deserialize, Serialize};

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Prompt text
    pub question: String,
    /// Answer options in display order
    pub options: Vec<String>,
    /// The correct option (must be one of `options`)
    pub correct_answer: String,
}

impl Question {
    /// Whether `option` is the correct answer
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }

    /// Index of the correct answer within the options
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}

/// A dated event on a topic's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Free-form date label ("1822", "c. 500 BC")
    pub date: String,
    pub description: String,
}

/// A reference for further reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One learning unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Stable identifier, unique across the catalog
    pub id: String,
    pub title: String,
    pub summary: String,
    pub curiosity: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Empty when the topic has no timeline
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    /// Ids of related topics
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
}

impl Topic {
    /// Create a topic with no questions, timeline, sources or links
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        curiosity: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
            curiosity: curiosity.into(),
            questions: Vec::new(),
            timeline: Vec::new(),
            sources: Vec::new(),
            related: Vec::new(),
        }
    }

    pub fn has_timeline(&self) -> bool {
        !self.timeline.is_empty()
    }
}

/// A named collection of topics shown together in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicGroup {
    pub title: String,
    pub topics: Vec<Topic>,
}

impl TopicGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), topics: Vec::new() }
    }
}

/// The loaded topic data set
///
/// Topics are addressable by their position in the flattened, order
/// preserving sequence across all groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<TopicGroup>,
}

impl Catalog {
    /// Wrap already-validated groups
    pub fn new(groups: Vec<TopicGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[TopicGroup] {
        &self.groups
    }

    /// All topics in display order
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.groups.iter().flat_map(|g| g.topics.iter())
    }

    /// Total number of topics across all groups
    pub fn topic_count(&self) -> usize {
        self.groups.iter().map(|g| g.topics.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.topic_count() == 0
    }

    /// Topic at a flat index
    pub fn topic_at(&self, index: usize) -> Option<&Topic> {
        self.topics().nth(index)
    }

    /// Find a topic by id
    pub fn find(&self, id: &str) -> Option<&Topic> {
        self.topics().find(|t| t.id == id)
    }

    /// Flat index of a topic by id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.topics().position(|t| t.id == id)
    }

    /// Flat index of a topic by id, or failing that by case-insensitive id
    /// or title
    pub fn lookup(&self, query: &str) -> Option<usize> {
        let query = query.trim();
        self.position(query).or_else(|| {
            self.topics().position(|t| {
                t.id.eq_ignore_ascii_case(query) || t.title.eq_ignore_ascii_case(query)
            })
        })
    }

    /// Flat index of the topic before `index`, if any
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        if index > 0 && index < self.topic_count() { Some(index - 1) } else { None }
    }

    /// Flat index of the topic after `index`, if any
    pub fn next_index(&self, index: usize) -> Option<usize> {
        if index + 1 < self.topic_count() { Some(index + 1) } else { None }
    }

    /// Index of the group that contains the topic at a flat index
    pub fn group_index_of(&self, index: usize) -> Option<usize> {
        let mut start = 0;
        for (group_idx, group) in self.groups.iter().enumerate() {
            if index < start + group.topics.len() {
                return Some(group_idx);
            }
            start += group.topics.len();
        }
        None
    }

    /// Flat index of the first topic in a group
    pub fn group_start(&self, group_idx: usize) -> usize {
        self.groups.iter().take(group_idx).map(|g| g.topics.len()).sum()
    }

    /// Resolve a topic's related ids to topics, skipping unknown ids
    pub fn related_topics<'a>(&'a self, topic: &'a Topic) -> impl Iterator<Item = &'a Topic> {
        topic.related.iter().filter_map(move |id| self.find(id))
    }
}
