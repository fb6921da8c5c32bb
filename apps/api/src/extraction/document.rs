//! Annotated résumé text and the entity-recognition seam.

use async_trait::async_trait;

use crate::errors::AppError;

/// Entity classes emitted by CoNLL-style NER models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Organization,
    Person,
    Location,
    Misc,
    Other,
}

impl EntityLabel {
    /// Maps a raw tag (`ORG`, `I-ORG`, `B-PER`, ...) onto a label.
    pub fn from_tag(tag: &str) -> Self {
        let bare = tag
            .strip_prefix("B-")
            .or_else(|| tag.strip_prefix("I-"))
            .unwrap_or(tag);
        match bare.to_ascii_uppercase().as_str() {
            "ORG" => EntityLabel::Organization,
            "PER" | "PERSON" => EntityLabel::Person,
            "LOC" | "GPE" => EntityLabel::Location,
            "MISC" => EntityLabel::Misc,
            _ => EntityLabel::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Result of running text through the NER pipeline. Lives for one request.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    lowered: String,
    entities: Vec<Entity>,
}

impl ResumeDocument {
    pub fn new(text: &str, entities: Vec<Entity>) -> Self {
        Self {
            lowered: text.to_lowercase(),
            entities,
        }
    }

    pub fn lowered_text(&self) -> &str {
        &self.lowered
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Organisation entities in scan order.
    pub fn organizations(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.label == EntityLabel::Organization)
    }
}

/// Named-entity recognition backend. Carried in `AppState` behind a `ModelHandle`.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn annotate(&self, text: &str) -> Result<ResumeDocument, AppError>;
}
