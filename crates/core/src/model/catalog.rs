use serde::Deserialize;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

//
// ─── PRIORITY ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    #[default]
    None,
    Medium,
    High,
}

impl Priority {
    /// Lenient parse: anything unrecognised is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            _ => Priority::None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Number of stars shown on the badge.
    #[must_use]
    pub fn stars(self) -> u8 {
        match self {
            Priority::None => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// Documents may list a topic as a bare title or as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTopic {
    Title(String),
    Full {
        title: String,
        #[serde(default)]
        priority: Option<String>,
        #[serde(default)]
        note: Option<String>,
    },
}

/// The atomic trackable unit. Identity is the title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTopic")]
pub struct Topic {
    title: String,
    priority: Priority,
    note: Option<String>,
}

impl From<RawTopic> for Topic {
    fn from(raw: RawTopic) -> Self {
        match raw {
            RawTopic::Title(title) => Topic::new(title),
            RawTopic::Full {
                title,
                priority,
                note,
            } => {
                let priority = priority.as_deref().map_or(Priority::None, Priority::parse);
                let note = note.filter(|n| !n.trim().is_empty());
                Topic {
                    title,
                    priority,
                    note,
                }
            }
        }
    }
}

impl Topic {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: Priority::None,
            note: None,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

//
// ─── GROUP / SECTION ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Section {
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.groups.iter().flat_map(|group| group.topics.iter())
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// One mode's curriculum: an ordered list of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the document is not a list of sections.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.sections.iter().flat_map(Section::topics)
    }

    /// Map a persisted tab index onto an existing section.
    #[must_use]
    pub fn clamp_tab(&self, index: usize) -> usize {
        index.min(self.sections.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = r#"[
        {
            "title": "Foundations",
            "subtitle": "Start here",
            "groups": [
                {
                    "name": "OOP",
                    "topics": [
                        "Encapsulation",
                        { "title": "SOLID", "priority": "high", "note": "Know all five" },
                        { "title": "Composition", "priority": "medium", "note": "" },
                        { "title": "Mixins", "priority": "urgent" }
                    ]
                }
            ]
        },
        { "title": "Patterns", "groups": [] }
    ]"#;

    #[test]
    fn string_and_object_topics_normalise() {
        let catalog = Catalog::from_json(MIXED).unwrap();
        let topics: Vec<&Topic> = catalog.topics().collect();
        assert_eq!(topics.len(), 4);

        assert_eq!(topics[0], &Topic::new("Encapsulation"));
        assert_eq!(topics[1].priority(), Priority::High);
        assert_eq!(topics[1].note(), Some("Know all five"));
        assert_eq!(topics[2].priority(), Priority::Medium);
        assert_eq!(topics[2].note(), None);
        assert_eq!(topics[3].priority(), Priority::None);
    }

    #[test]
    fn subtitle_defaults_to_empty() {
        let catalog = Catalog::from_json(MIXED).unwrap();
        let patterns = catalog.section(1).unwrap();
        assert_eq!(patterns.subtitle, "");
        assert_eq!(patterns.topics().count(), 0);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(Catalog::from_json(r#"{"title": "not a list"}"#).is_err());
        assert!(Catalog::from_json("[{\"groups\": []}]").is_err());
    }

    #[test]
    fn clamp_tab_stays_in_range() {
        let catalog = Catalog::from_json(MIXED).unwrap();
        assert_eq!(catalog.clamp_tab(0), 0);
        assert_eq!(catalog.clamp_tab(7), 1);
        assert_eq!(Catalog::default().clamp_tab(3), 0);
    }

    #[test]
    fn stars_follow_priority() {
        assert_eq!(Priority::High.stars(), 2);
        assert_eq!(Priority::Medium.stars(), 1);
        assert_eq!(Priority::None.stars(), 0);
    }
}
