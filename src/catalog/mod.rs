//! Educational sandbox catalog.
//!
//! - `model` - topic and concept records
//! - `content` - the built-in topics
//! - `render` - summary and card markup

pub mod content;
pub mod model;
pub mod render;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::DashboardError;
use crate::i18n::Language;
use crate::traits::{ContainerId, DocumentSurface};

pub use model::{Concept, ConceptField, Topic};
pub use render::{concept_blocks, kind_glyph, render_card, BlockStyle, ConceptBlock, FIELD_DESCRIPTORS};

/// Summary of one listed topic, bound to its index
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSummary {
    pub index: usize,
    pub title: String,
    pub icon: String,
    pub accent_color: String,
    /// Localized prompt inviting the user to open the topic
    pub affordance: &'static str,
}

/// Immutable registry of topics
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    topics: Vec<Topic>,
    selected: Option<usize>,
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ContentCatalog {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics, selected: None }
    }

    /// The four built-in topics
    pub fn builtin() -> Self {
        Self::new(content::BUILTIN_TOPICS.clone())
    }

    /// Parses a catalog from a JSON array of topics
    pub fn from_json(json: &str) -> Result<Self, DashboardError> {
        let topics: Vec<Topic> = serde_json::from_str(json)?;
        Ok(Self::new(topics))
    }

    /// Loads a catalog from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, DashboardError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    /// Index of the topic currently expanded, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Renders one summary card per topic into the topic grid
    pub fn list_topics(&self, surface: &mut dyn DocumentSurface, language: Language) -> Vec<TopicSummary> {
        let html: String = self
            .topics
            .iter()
            .enumerate()
            .map(|(index, topic)| render::render_summary(index, topic, language))
            .collect();
        surface.set_container_html(ContainerId::SandboxTopics, &html);
        debug!(count = self.topics.len(), "listed sandbox topics");

        self.summaries(language)
    }

    /// Summaries without touching any document
    pub fn summaries(&self, language: Language) -> Vec<TopicSummary> {
        let affordance = crate::i18n::translate(language, crate::i18n::TextKey::LearnMore);
        self.topics
            .iter()
            .enumerate()
            .map(|(index, topic)| TopicSummary {
                index,
                title: topic.title.clone(),
                icon: topic.icon.clone(),
                accent_color: topic.accent_color.clone(),
                affordance,
            })
            .collect()
    }

    /// Expands a topic into the detail container and scrolls it into view.
    ///
    /// Returns `None` and leaves the document untouched for an index
    /// outside the catalog.
    pub fn select_topic(
        &mut self,
        surface: &mut dyn DocumentSurface,
        index: usize,
        language: Language,
    ) -> Option<&Topic> {
        let Some(topic) = self.topics.get(index) else {
            warn!(index, count = self.topics.len(), "topic index out of range");
            return None;
        };

        let html = render::render_topic(topic, language);
        surface.set_container_html(ContainerId::SandboxContent, &html);
        surface.show_container(ContainerId::SandboxContent);
        surface.scroll_into_view(ContainerId::SandboxContent);
        self.selected = Some(index);
        debug!(index, concepts = topic.concepts.len(), "expanded sandbox topic");

        Some(topic)
    }
}
