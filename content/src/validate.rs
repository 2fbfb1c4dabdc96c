//! Authoring-time consistency checks over the curriculum.
//!
//! All playground data is statically authored, so the defect classes here are
//! authoring mistakes: a build-order id that does not exist in the catalog, a
//! response requiring an unknown component, a scenario with no response
//! reachable from the empty enabled set. They are surfaced in bulk by
//! `dojo check` and asserted over the shipped curriculum in tests, never
//! handled at runtime.

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::Academy;
use crate::AcademyId;
use crate::ChapterId;
use crate::ComponentId;
use crate::PlaygroundScenario;
use crate::ScenarioId;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("scenario `{scenario}`: duplicate component id `{id}` in catalog")]
    DuplicateComponentId { scenario: ScenarioId, id: ComponentId },

    #[error("scenario `{scenario}`: build order references unknown component `{id}`")]
    UnknownBuildOrderId { scenario: ScenarioId, id: ComponentId },

    #[error("scenario `{scenario}`: component `{id}` appears more than once in build order")]
    RepeatedBuildOrderId { scenario: ScenarioId, id: ComponentId },

    #[error(
        "scenario `{scenario}`: response `{label}` requires unknown component `{id}`"
    )]
    UnknownRequiredId {
        scenario: ScenarioId,
        label: String,
        id: ComponentId,
    },

    #[error(
        "scenario `{scenario}`: no response with an empty required set; the empty enabled \
         state would have nothing to show"
    )]
    NoBaselineResponse { scenario: ScenarioId },

    #[error("scenario `{scenario}`: principle `{title}` references unknown component `{id}`")]
    UnknownPrincipleId {
        scenario: ScenarioId,
        title: String,
        id: ComponentId,
    },

    #[error("academy `{academy}`: duplicate scenario id `{id}`")]
    DuplicateScenarioId { academy: AcademyId, id: ScenarioId },

    #[error("academy `{academy}`: duplicate chapter id `{id}`")]
    DuplicateChapterId { academy: AcademyId, id: ChapterId },

    #[error(
        "academy `{academy}`: chapter `{id}` has ordinal {found}, expected {expected} \
         (ordinals must be contiguous from 1)"
    )]
    NonContiguousOrdinal {
        academy: AcademyId,
        id: ChapterId,
        expected: u32,
        found: u32,
    },

    #[error(
        "academy `{academy}`: chapter `{chapter}` embeds unknown scenario `{scenario}`"
    )]
    UnknownScenarioRef {
        academy: AcademyId,
        chapter: ChapterId,
        scenario: ScenarioId,
    },
}

pub fn validate_scenario(scenario: &PlaygroundScenario, errors: &mut Vec<ValidationError>) {
    let mut catalog: BTreeSet<&ComponentId> = BTreeSet::new();
    for component in &scenario.components {
        if !catalog.insert(&component.id) {
            errors.push(ValidationError::DuplicateComponentId {
                scenario: scenario.id.clone(),
                id: component.id.clone(),
            });
        }
    }

    let mut seen_in_order: BTreeSet<&ComponentId> = BTreeSet::new();
    for id in &scenario.recommended_build_order {
        if !catalog.contains(id) {
            errors.push(ValidationError::UnknownBuildOrderId {
                scenario: scenario.id.clone(),
                id: id.clone(),
            });
        }
        if !seen_in_order.insert(id) {
            errors.push(ValidationError::RepeatedBuildOrderId {
                scenario: scenario.id.clone(),
                id: id.clone(),
            });
        }
    }

    for response in &scenario.responses {
        for id in &response.required {
            if !catalog.contains(id) {
                errors.push(ValidationError::UnknownRequiredId {
                    scenario: scenario.id.clone(),
                    label: response.label.clone(),
                    id: id.clone(),
                });
            }
        }
    }
    if !scenario.responses.iter().any(|r| r.required.is_empty()) {
        errors.push(ValidationError::NoBaselineResponse {
            scenario: scenario.id.clone(),
        });
    }

    for principle in &scenario.principles {
        for id in &principle.satisfied_by {
            if !catalog.contains(id) {
                errors.push(ValidationError::UnknownPrincipleId {
                    scenario: scenario.id.clone(),
                    title: principle.title.clone(),
                    id: id.clone(),
                });
            }
        }
    }
}

pub fn validate_academy(academy: &Academy) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut scenario_ids: BTreeSet<&ScenarioId> = BTreeSet::new();
    for scenario in &academy.scenarios {
        if !scenario_ids.insert(&scenario.id) {
            errors.push(ValidationError::DuplicateScenarioId {
                academy: academy.id,
                id: scenario.id.clone(),
            });
        }
        validate_scenario(scenario, &mut errors);
    }

    let mut chapter_ids: BTreeSet<&ChapterId> = BTreeSet::new();
    for (index, chapter) in academy.chapters.iter().enumerate() {
        if !chapter_ids.insert(&chapter.id) {
            errors.push(ValidationError::DuplicateChapterId {
                academy: academy.id,
                id: chapter.id.clone(),
            });
        }
        let expected = index as u32 + 1;
        if chapter.ordinal != expected {
            errors.push(ValidationError::NonContiguousOrdinal {
                academy: academy.id,
                id: chapter.id.clone(),
                expected,
                found: chapter.ordinal,
            });
        }
        for scenario in chapter.playground_refs() {
            if academy.scenario(scenario).is_none() {
                errors.push(ValidationError::UnknownScenarioRef {
                    academy: academy.id,
                    chapter: chapter.id.clone(),
                    scenario: scenario.clone(),
                });
            }
        }
    }

    errors
}

/// Validate every academy; an empty result means the curriculum is sound.
pub fn validate_all(academies: &[Academy]) -> Vec<ValidationError> {
    academies.iter().flat_map(validate_academy).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContextComponent;
    use crate::PlaygroundResponse;
    use crate::Principle;
    use crate::Section;
    use crate::Tint;
    use crate::academy::Chapter;
    use pretty_assertions::assert_eq;

    fn scenario_with(
        build_order: &[&str],
        responses: Vec<PlaygroundResponse>,
    ) -> PlaygroundScenario {
        PlaygroundScenario {
            id: ScenarioId::from("test"),
            customer_message: "msg".to_string(),
            input_label: None,
            components: vec![
                ContextComponent::new("sys", "System prompt", "sys", 50, Tint::Cyan, "..."),
                ContextComponent::new("rag", "Retrieved docs", "rag", 120, Tint::Green, "..."),
            ],
            responses,
            recommended_build_order: build_order.iter().map(|id| ComponentId::from(*id)).collect(),
            principles: Vec::new(),
        }
    }

    #[test]
    fn sound_scenario_produces_no_errors() {
        let scenario = scenario_with(
            &["sys", "rag"],
            vec![
                PlaygroundResponse::new(&[], 20, "Baseline", "..."),
                PlaygroundResponse::new(&["sys", "rag"], 90, "Good", "..."),
            ],
        );
        let mut errors = Vec::new();
        validate_scenario(&scenario, &mut errors);
        assert_eq!(errors, Vec::new());
    }

    #[test]
    fn unknown_build_order_id_is_reported() {
        let scenario = scenario_with(
            &["sys", "tools"],
            vec![PlaygroundResponse::new(&[], 20, "Baseline", "...")],
        );
        let mut errors = Vec::new();
        validate_scenario(&scenario, &mut errors);
        assert_eq!(
            errors,
            vec![ValidationError::UnknownBuildOrderId {
                scenario: ScenarioId::from("test"),
                id: ComponentId::from("tools"),
            }]
        );
    }

    #[test]
    fn missing_baseline_response_is_reported() {
        let scenario = scenario_with(
            &["sys"],
            vec![PlaygroundResponse::new(&["sys"], 60, "Partial", "...")],
        );
        let mut errors = Vec::new();
        validate_scenario(&scenario, &mut errors);
        assert!(errors.contains(&ValidationError::NoBaselineResponse {
            scenario: ScenarioId::from("test"),
        }));
    }

    #[test]
    fn unknown_required_and_principle_ids_are_reported() {
        let mut scenario = scenario_with(
            &[],
            vec![
                PlaygroundResponse::new(&[], 20, "Baseline", "..."),
                PlaygroundResponse::new(&["ghost"], 80, "Haunted", "..."),
            ],
        );
        scenario.principles = vec![Principle::new("Grounding", "...", &["phantom"])];
        let mut errors = Vec::new();
        validate_scenario(&scenario, &mut errors);
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownRequiredId {
                    scenario: ScenarioId::from("test"),
                    label: "Haunted".to_string(),
                    id: ComponentId::from("ghost"),
                },
                ValidationError::UnknownPrincipleId {
                    scenario: ScenarioId::from("test"),
                    title: "Grounding".to_string(),
                    id: ComponentId::from("phantom"),
                },
            ]
        );
    }

    #[test]
    fn academy_checks_cover_chapters_and_scenario_refs() {
        let academy = Academy {
            id: AcademyId::ContextEngineering,
            title: "Context Engineering".to_string(),
            tagline: "".to_string(),
            chapters: vec![
                Chapter::new("intro", 1, "Intro", "", vec![Section::Prose("p".to_string())]),
                Chapter::new(
                    "lab",
                    3,
                    "Lab",
                    "",
                    vec![Section::Playground(ScenarioId::from("missing"))],
                ),
            ],
            scenarios: Vec::new(),
        };
        let errors = validate_academy(&academy);
        assert_eq!(
            errors,
            vec![
                ValidationError::NonContiguousOrdinal {
                    academy: AcademyId::ContextEngineering,
                    id: ChapterId::from("lab"),
                    expected: 2,
                    found: 3,
                },
                ValidationError::UnknownScenarioRef {
                    academy: AcademyId::ContextEngineering,
                    chapter: ChapterId::from("lab"),
                    scenario: ScenarioId::from("missing"),
                },
            ]
        );
    }
}
