//! Topic data loading and validation
//!
//! The bundled data set is compiled into the binary; a JSON file with the
//! same shape can replace it at startup.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::error::TopicError;
use super::model::{Catalog, TopicGroup};

/// The data set shipped with the binary
const BUNDLED_TOPICS: &str = include_str!("../../data/topics.json");

/// Load the bundled topic catalog
pub fn bundled_catalog() -> Result<Catalog, TopicError> {
    parse_catalog(BUNDLED_TOPICS)
}

/// Load a catalog from a JSON file
pub fn load_catalog_file(path: &Path) -> Result<Catalog, TopicError> {
    let contents = fs::read_to_string(path)?;
    let catalog = parse_catalog(&contents)?;
    tracing::info!(
        "Loaded {} topics in {} groups from {:?}",
        catalog.topic_count(),
        catalog.groups().len(),
        path
    );
    Ok(catalog)
}

/// Load from `path` if given, otherwise the bundled data set
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, TopicError> {
    match path {
        Some(path) => load_catalog_file(path),
        None => bundled_catalog(),
    }
}

/// Parse and validate a catalog from JSON text
pub fn parse_catalog(json: &str) -> Result<Catalog, TopicError> {
    let mut groups: Vec<TopicGroup> = serde_json::from_str(json)?;
    validate(&mut groups)?;
    Ok(Catalog::new(groups))
}

/// Check catalog invariants, dropping dangling related-topic links
fn validate(groups: &mut [TopicGroup]) -> Result<(), TopicError> {
    let mut ids = HashSet::new();
    for topic in groups.iter().flat_map(|g| g.topics.iter()) {
        if !ids.insert(topic.id.clone()) {
            return Err(TopicError::DuplicateId(topic.id.clone()));
        }

        for (i, question) in topic.questions.iter().enumerate() {
            if question.options.len() < 2 {
                return Err(TopicError::TooFewOptions { topic: topic.id.clone(), question: i + 1 });
            }
            if question.correct_index().is_none() {
                return Err(TopicError::AnswerNotAnOption {
                    topic: topic.id.clone(),
                    question: i + 1,
                    answer: question.correct_answer.clone(),
                });
            }
        }
    }

    if ids.is_empty() {
        return Err(TopicError::Empty);
    }

    for topic in groups.iter_mut().flat_map(|g| g.topics.iter_mut()) {
        let topic_id = topic.id.clone();
        topic.related.retain(|id| {
            let known = ids.contains(id) && *id != topic_id;
            if !known {
                tracing::warn!("Dropping unknown related topic '{}' from '{}'", id, topic_id);
            }
            known
        });
    }

    Ok(())
}
