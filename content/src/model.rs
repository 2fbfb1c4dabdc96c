use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

macro_rules! string_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    ComponentId,
    "Identifier of one context component, unique within its scenario's catalog."
);
string_id!(ScenarioId, "Identifier of a playground scenario, unique within its academy.");

/// UI-agnostic accent color for a component. The terminal frontend maps these
/// to its own palette; keeping the enum here means scenario authors never
/// reference a rendering crate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Tint {
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    Yellow,
}

/// One togglable unit of simulated context fed to the hypothetical agent,
/// e.g. a system prompt, retrieved docs, or tool definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextComponent {
    pub id: ComponentId,
    pub name: String,
    /// Compact label used where the full name does not fit (pipeline rows,
    /// the component rail).
    pub short_name: String,
    /// Authored token estimate for this piece of context. Presentation data,
    /// not measured against a real tokenizer.
    pub tokens: u32,
    /// Literal context text; the context-window preview shows the
    /// concatenation of enabled components' content.
    pub content: String,
    pub tint: Tint,
}

impl ContextComponent {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        short_name: impl Into<String>,
        tokens: u32,
        tint: Tint,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: ComponentId::new(id),
            name: name.into(),
            short_name: short_name.into(),
            tokens,
            content: content.into(),
            tint,
        }
    }
}

/// One canned agent response, unlocked by a specific subset of enabled
/// components. A scenario's response list is effectively a lookup table keyed
/// by component subset; the first-declared response with an empty `required`
/// set is the baseline shown before anything is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaygroundResponse {
    pub required: BTreeSet<ComponentId>,
    pub agent_response: String,
    /// Quality score in `0..=100`, shown as a gauge.
    pub score: u8,
    pub label: String,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

impl PlaygroundResponse {
    pub fn new(
        required: &[&str],
        score: u8,
        label: impl Into<String>,
        agent_response: impl Into<String>,
    ) -> Self {
        Self {
            required: required.iter().map(|id| ComponentId::from(*id)).collect(),
            agent_response: agent_response.into(),
            score,
            label: label.into(),
            issues: Vec::new(),
            strengths: Vec::new(),
        }
    }

    pub fn with_issues(mut self, issues: &[&str]) -> Self {
        self.issues = issues.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub fn with_strengths(mut self, strengths: &[&str]) -> Self {
        self.strengths = strengths.iter().map(|s| (*s).to_string()).collect();
        self
    }
}

/// Checklist entry for the principles view. A principle with a non-empty
/// `satisfied_by` list is considered met once all of those components are
/// enabled; an empty list marks an informational principle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principle {
    pub title: String,
    pub detail: String,
    pub satisfied_by: Vec<ComponentId>,
}

impl Principle {
    pub fn new(title: impl Into<String>, detail: impl Into<String>, satisfied_by: &[&str]) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            satisfied_by: satisfied_by.iter().map(|id| ComponentId::from(*id)).collect(),
        }
    }
}

/// One self-contained playground exercise: a customer message, a catalog of
/// context components, the canned responses each component subset unlocks,
/// and the curated order in which to enable them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaygroundScenario {
    pub id: ScenarioId,
    pub customer_message: String,
    /// Label shown above the customer message, e.g. "Incoming ticket".
    pub input_label: Option<String>,
    pub components: Vec<ContextComponent>,
    pub responses: Vec<PlaygroundResponse>,
    pub recommended_build_order: Vec<ComponentId>,
    pub principles: Vec<Principle>,
}

impl PlaygroundScenario {
    pub fn component(&self, id: &ComponentId) -> Option<&ContextComponent> {
        self.components.iter().find(|c| &c.id == id)
    }

    /// Catalog ids in declaration order.
    pub fn component_ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.components.iter().map(|c| &c.id)
    }

    /// The curated build-order set. Note this is what "enable all" mirrors,
    /// not the full catalog.
    pub fn recommended_set(&self) -> BTreeSet<ComponentId> {
        self.recommended_build_order.iter().cloned().collect()
    }
}
