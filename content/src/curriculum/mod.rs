//! The statically authored curriculum: six academies, their chapters, and the
//! playground scenarios embedded in them. Content is constructed once behind
//! a `LazyLock`; callers only ever see `&'static` data.

use std::sync::LazyLock;

use crate::Academy;
use crate::AcademyId;
use crate::Section;

mod agent_observability;
mod agentic_rag;
mod context_engineering;
mod llm_evals;
mod multi_agent;
mod tool_use;

static ACADEMIES: LazyLock<Vec<Academy>> = LazyLock::new(|| {
    vec![
        context_engineering::academy(),
        agent_observability::academy(),
        llm_evals::academy(),
        agentic_rag::academy(),
        multi_agent::academy(),
        tool_use::academy(),
    ]
});

pub fn academies() -> &'static [Academy] {
    &ACADEMIES
}

/// Every `AcademyId` has authored content, so lookup is total.
pub fn academy(id: AcademyId) -> &'static Academy {
    academies()
        .iter()
        .find(|a| a.id == id)
        .unwrap_or_else(|| unreachable!("curriculum registry covers every AcademyId"))
}

// Terse section constructors for the academy files.

pub(crate) fn heading(text: &str) -> Section {
    Section::Heading(text.to_string())
}

pub(crate) fn prose(text: &str) -> Section {
    Section::Prose(text.to_string())
}

pub(crate) fn bullets(items: &[&str]) -> Section {
    Section::Bullets(items.iter().map(|s| (*s).to_string()).collect())
}

pub(crate) fn table(headers: &[&str], rows: &[&[&str]]) -> Section {
    Section::Table {
        headers: headers.iter().map(|s| (*s).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|s| (*s).to_string()).collect())
            .collect(),
    }
}

pub(crate) fn code(lang: &str, source: &str) -> Section {
    Section::Code {
        lang: lang.to_string(),
        source: source.to_string(),
    }
}

pub(crate) fn callout(text: &str) -> Section {
    Section::Callout(text.to_string())
}

pub(crate) fn playground(id: &str) -> Section {
    Section::Playground(crate::ScenarioId::from(id))
}
