//! Best-match selection of a canned response for an enabled-component set.

use std::collections::BTreeSet;

use dojo_content::ComponentId;
use dojo_content::PlaygroundResponse;
use dojo_content::PlaygroundScenario;

/// Select the response whose `required` set best matches `enabled`.
///
/// Policy (fixed; tests pin it):
/// 1. Candidates are responses with `required ⊆ enabled`: everything they
///    need is currently on.
/// 2. The winner is the candidate with the largest `required` set (the most
///    specific response unlocked); ties go to declaration order.
/// 3. With no candidate at all (only possible when the catalog has no
///    baseline response, an authoring defect `dojo check` rejects), fall back
///    to the largest overlap with `enabled`, then the fewest missing
///    components, then declaration order, so the function stays total.
///
/// The empty enabled set therefore selects the first-declared response with
/// an empty `required` set: the baseline.
///
/// Pure and deterministic: the result depends only on the *set* `enabled`,
/// never on the order toggles happened.
pub fn best_response<'a>(
    scenario: &'a PlaygroundScenario,
    enabled: &BTreeSet<ComponentId>,
) -> Option<&'a PlaygroundResponse> {
    let mut best: Option<&PlaygroundResponse> = None;
    for response in &scenario.responses {
        if !response.required.is_subset(enabled) {
            continue;
        }
        let beats = match best {
            None => true,
            Some(current) => response.required.len() > current.required.len(),
        };
        if beats {
            best = Some(response);
        }
    }
    if best.is_some() {
        return best;
    }

    debug_assert!(
        scenario.responses.is_empty(),
        "scenario `{}` has responses but none reachable from {enabled:?}; \
         missing baseline response",
        scenario.id
    );

    // Overlap fallback for defective catalogs: closest required set wins.
    let mut ranked: Option<(usize, usize, &PlaygroundResponse)> = None;
    for response in &scenario.responses {
        let overlap = response.required.intersection(enabled).count();
        let missing = response.required.len() - overlap;
        let beats = match ranked {
            None => true,
            Some((best_overlap, best_missing, _)) => {
                overlap > best_overlap || (overlap == best_overlap && missing < best_missing)
            }
        };
        if beats {
            ranked = Some((overlap, missing, response));
        }
    }
    ranked.map(|(_, _, response)| response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_content::ContextComponent;
    use dojo_content::PlaygroundResponse;
    use dojo_content::ScenarioId;
    use dojo_content::Tint;
    use pretty_assertions::assert_eq;

    /// The worked example from the design discussions: sys(50), tools(80),
    /// rag(120) with responses keyed on subsets.
    fn scenario() -> PlaygroundScenario {
        PlaygroundScenario {
            id: ScenarioId::from("example"),
            customer_message: "help".to_string(),
            input_label: None,
            components: vec![
                ContextComponent::new("sys", "System", "sys", 50, Tint::Cyan, "s"),
                ContextComponent::new("tools", "Tools", "tools", 80, Tint::Yellow, "t"),
                ContextComponent::new("rag", "Docs", "rag", 120, Tint::Green, "r"),
            ],
            responses: vec![
                PlaygroundResponse::new(&[], 10, "Baseline", "no context"),
                PlaygroundResponse::new(&["sys"], 40, "Sys only", "some context"),
                PlaygroundResponse::new(&["sys", "rag"], 80, "Good", "grounded"),
                PlaygroundResponse::new(&["sys", "tools", "rag"], 95, "Full", "everything"),
            ],
            recommended_build_order: vec![
                "sys".into(),
                "rag".into(),
                "tools".into(),
            ],
            principles: Vec::new(),
        }
    }

    fn set(ids: &[&str]) -> BTreeSet<ComponentId> {
        ids.iter().map(|id| ComponentId::from(*id)).collect()
    }

    #[test]
    fn empty_set_selects_baseline() {
        let s = scenario();
        let matched = best_response(&s, &set(&[])).map(|r| r.label.as_str());
        assert_eq!(matched, Some("Baseline"));
    }

    #[test]
    fn exact_subset_selects_that_response() {
        let s = scenario();
        let matched = best_response(&s, &set(&["sys", "rag"])).map(|r| r.label.as_str());
        assert_eq!(matched, Some("Good"));
    }

    #[test]
    fn single_component_selects_lower_scoring_match() {
        let s = scenario();
        let matched = best_response(&s, &set(&["sys"])).map(|r| r.label.as_str());
        assert_eq!(matched, Some("Sys only"));
    }

    #[test]
    fn superset_selects_most_specific_unlocked() {
        let s = scenario();
        // All three enabled: both "Good" (2 required) and "Full" (3 required)
        // are candidates; the larger required set wins.
        let matched =
            best_response(&s, &set(&["sys", "tools", "rag"])).map(|r| r.label.as_str());
        assert_eq!(matched, Some("Full"));
    }

    #[test]
    fn extra_enabled_component_does_not_disqualify() {
        let s = scenario();
        // tools is enabled but no response requires exactly {sys, tools};
        // {sys} remains the most specific unlocked subset.
        let matched = best_response(&s, &set(&["sys", "tools"])).map(|r| r.label.as_str());
        assert_eq!(matched, Some("Sys only"));
    }

    #[test]
    fn ties_on_cardinality_go_to_declaration_order() {
        let mut s = scenario();
        s.responses = vec![
            PlaygroundResponse::new(&[], 10, "Baseline", "-"),
            PlaygroundResponse::new(&["sys"], 40, "First", "-"),
            PlaygroundResponse::new(&["tools"], 45, "Second", "-"),
        ];
        let matched = best_response(&s, &set(&["sys", "tools"])).map(|r| r.label.as_str());
        assert_eq!(matched, Some("First"));
    }

    #[test]
    fn matcher_is_order_independent() {
        let s = scenario();
        let forward = set(&["sys", "rag"]);
        let reverse: BTreeSet<ComponentId> =
            ["rag", "sys"].iter().map(|id| ComponentId::from(*id)).collect();
        assert_eq!(
            best_response(&s, &forward).map(|r| r.label.as_str()),
            best_response(&s, &reverse).map(|r| r.label.as_str()),
        );
    }

    #[test]
    fn empty_response_list_yields_none() {
        let mut s = scenario();
        s.responses.clear();
        assert_eq!(best_response(&s, &set(&[])).map(|r| r.label.as_str()), None);
    }

    #[test]
    fn shipped_curriculum_always_matches_something() {
        for academy in dojo_content::academies() {
            for scenario in &academy.scenarios {
                assert!(
                    best_response(scenario, &BTreeSet::new()).is_some(),
                    "scenario {} has no baseline match",
                    scenario.id
                );
                // The fully-built recommended set must unlock a response too.
                let recommended = scenario.recommended_set();
                assert!(
                    best_response(scenario, &recommended).is_some(),
                    "scenario {} matches nothing at full build",
                    scenario.id
                );
            }
        }
    }
}
