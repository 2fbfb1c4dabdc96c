use serde::Deserialize;
use serde::Serialize;

use crate::model::PlaygroundScenario;
use crate::model::ScenarioId;

/// The six academies shipped with the dojo. A closed enum rather than a
/// string key so that an academy without authored content is a compile error,
/// not a blank screen.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AcademyId {
    ContextEngineering,
    AgentObservability,
    LlmEvals,
    AgenticRag,
    MultiAgentOrchestration,
    ToolUse,
}

/// Anchor identifier of a chapter, unique within its academy. Doubles as the
/// deep-link fragment printed by `dojo list`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(String);

impl ChapterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChapterId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One renderable block of a chapter body. Chapters carry their content by
/// construction, so there is no id-to-renderer lookup that could silently
/// miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Heading(String),
    Prose(String),
    Bullets(Vec<String>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Code {
        lang: String,
        source: String,
    },
    Callout(String),
    /// Embeds the interactive playground for the given scenario of the same
    /// academy.
    Playground(ScenarioId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    /// 1-based position shown in the sidebar; validated contiguous.
    pub ordinal: u32,
    pub title: String,
    pub subtitle: String,
    pub body: Vec<Section>,
}

impl Chapter {
    pub fn new(
        id: impl Into<String>,
        ordinal: u32,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        body: Vec<Section>,
    ) -> Self {
        Self {
            id: ChapterId::new(id),
            ordinal,
            title: title.into(),
            subtitle: subtitle.into(),
            body,
        }
    }

    /// Scenario ids referenced by playground sections, in order of appearance.
    pub fn playground_refs(&self) -> impl Iterator<Item = &ScenarioId> {
        self.body.iter().filter_map(|section| match section {
            Section::Playground(id) => Some(id),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Academy {
    pub id: AcademyId,
    pub title: String,
    pub tagline: String,
    pub chapters: Vec<Chapter>,
    pub scenarios: Vec<PlaygroundScenario>,
}

impl Academy {
    pub fn scenario(&self, id: &ScenarioId) -> Option<&PlaygroundScenario> {
        self.scenarios.iter().find(|s| &s.id == id)
    }

    pub fn chapter(&self, id: &ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|c| &c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn academy_ids_round_trip_through_kebab_case() {
        assert_eq!(AcademyId::ContextEngineering.to_string(), "context-engineering");
        assert_eq!(
            AcademyId::from_str("multi-agent-orchestration").ok(),
            Some(AcademyId::MultiAgentOrchestration)
        );
        assert!(AcademyId::from_str("not-an-academy").is_err());
    }

    #[test]
    fn playground_refs_only_yields_playground_sections() {
        let chapter = Chapter::new(
            "ch",
            1,
            "T",
            "S",
            vec![
                Section::Prose("p".to_string()),
                Section::Playground(ScenarioId::from("a")),
                Section::Callout("c".to_string()),
                Section::Playground(ScenarioId::from("b")),
            ],
        );
        let refs: Vec<_> = chapter.playground_refs().map(ScenarioId::as_str).collect();
        assert_eq!(refs, vec!["a", "b"]);
    }
}
