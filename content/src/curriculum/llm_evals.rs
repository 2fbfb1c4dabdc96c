use crate::Academy;
use crate::AcademyId;
use crate::Chapter;
use crate::ComponentId;
use crate::ContextComponent;
use crate::PlaygroundResponse;
use crate::PlaygroundScenario;
use crate::Principle;
use crate::ScenarioId;
use crate::Tint;

use super::bullets;
use super::callout;
use super::playground;
use super::prose;
use super::table;

pub(super) fn academy() -> Academy {
    Academy {
        id: AcademyId::LlmEvals,
        title: "LLM Evals".to_string(),
        tagline: "Measure before you ship, regress before your users do".to_string(),
        chapters: chapters(),
        scenarios: vec![ship_decision()],
    }
}

fn chapters() -> Vec<Chapter> {
    vec![
        Chapter::new(
            "vibes",
            1,
            "Beyond vibes",
            "Why demos lie",
            vec![
                prose(
                    "A demo samples the happy path; an eval samples the distribution. \
                     Teams that ship on vibes discover their regressions in support \
                     tickets. The eval loop exists so that 'the new prompt feels better' \
                     becomes a number with a confidence story.",
                ),
                bullets(&[
                    "Golden sets: curated inputs with reference outputs or rubrics.",
                    "Graders: exact match, programmatic checks, or model judges.",
                    "Gates: thresholds wired into CI so regressions block merges.",
                ]),
            ],
        ),
        Chapter::new(
            "graders",
            2,
            "Choosing a grader",
            "Exactness, rubrics, judges",
            vec![
                table(
                    &["Grader", "Good for", "Watch out for"],
                    &[
                        &["Exact / regex", "Extraction, formatting", "Brittle to wording"],
                        &["Programmatic", "Code, SQL, JSON validity", "Misses semantics"],
                        &["Rubric + judge", "Open-ended prose", "Judge drift, cost"],
                        &["Pairwise judge", "Ranking two candidates", "Position bias"],
                    ],
                ),
                callout(
                    "Judges are models too: pin their version, eval the evaluator, and \
                     re-baseline when the judge changes.",
                ),
            ],
        ),
        Chapter::new(
            "lab",
            3,
            "Lab: the ship/no-ship call",
            "Same question, different evidence",
            vec![
                prose(
                    "A PM asks whether the rewritten support prompt can ship. Enable \
                     evidence components and watch the recommendation move from gut feel \
                     to a defensible call.",
                ),
                playground("ship-decision"),
            ],
        ),
        Chapter::new(
            "regression-culture",
            4,
            "Regression culture",
            "Evals as a ratchet",
            vec![
                prose(
                    "Every incident becomes a case; every case joins the golden set; the \
                     set only grows. Over time the eval suite encodes the institution's \
                     memory of how the product fails.",
                ),
                bullets(&[
                    "Triage eval failures like test failures: owner, issue, fix or waiver.",
                    "Slice scores by segment — aggregate pass rates hide cohort damage.",
                    "Track grader agreement with humans quarterly.",
                ]),
            ],
        ),
    ]
}

fn ship_decision() -> PlaygroundScenario {
    let components = vec![
        ContextComponent::new(
            "golden-set",
            "Golden-set results",
            "golden",
            240,
            Tint::Green,
            "Golden set (n=600): new prompt 84.2% pass vs baseline 81.0%. By slice: \
             refunds 91% (+9), cancellations 88% (+4), tax questions 61% (-12).",
        ),
        ContextComponent::new(
            "judge-rubric",
            "Judge rubric + agreement",
            "rubric",
            180,
            Tint::Cyan,
            "Judge: pinned gpt-judge-2, rubric v5 (correctness, tone, policy citation). \
             Human agreement on 50-sample audit: 92%. Judge unchanged between runs.",
        ),
        ContextComponent::new(
            "regression-report",
            "Regression diff",
            "diff",
            200,
            Tint::Magenta,
            "Diff report: 31 newly-failing cases, 50 newly-passing. 24 of 31 new \
             failures are tax-exemption questions where the new prompt omits the \
             jurisdiction clarification step.",
        ),
    ];

    let responses = vec![
        PlaygroundResponse::new(
            &[],
            18,
            "Gut feel",
            "The rewrite reads much better and the demo cases looked great, so I'd lean \
             toward shipping it and keeping an eye on feedback.",
        )
        .with_issues(&[
            "No measurement at all — 'reads better' is not evidence",
            "'Keep an eye on feedback' outsources QA to customers",
        ]),
        PlaygroundResponse::new(
            &["golden-set"],
            58,
            "Topline only",
            "On the 600-case golden set the rewrite scores 84.2% vs 81.0% — a real \
             improvement, but the tax slice dropped 12 points, so the aggregate hides a \
             cohort regression. I'd hold until we understand the tax drop.",
        )
        .with_strengths(&["Reads slices, not just the topline"])
        .with_issues(&["Can't say whether the scores are trustworthy or what broke"]),
        PlaygroundResponse::new(
            &["golden-set", "judge-rubric"],
            72,
            "Trustworthy scores",
            "Scores are comparable: same pinned judge, rubric v5, 92% human agreement \
             on audit. So the +3.2 topline and the -12 tax slice are real, not grader \
             noise. Recommendation stands: hold for the tax regression, everything else \
             is a genuine win.",
        )
        .with_strengths(&["Validates the measurement before trusting the delta"])
        .with_issues(&["Still no root cause for the failing slice"]),
        PlaygroundResponse::new(
            &["golden-set", "judge-rubric", "regression-report"],
            91,
            "Defensible call",
            "Ship with one fix. The diff shows 24 of 31 new failures are tax-exemption \
             cases where the rewrite dropped the jurisdiction-clarification step; \
             restore that step and the slice recovers in spot checks. Scores are \
             trustworthy (pinned judge, 92% human agreement), and the remaining +3.2 \
             topline with +9 refunds / +4 cancellations is worth taking. Gate the merge \
             on tax-slice ≥ baseline.",
        )
        .with_strengths(&[
            "Root-caused the regression to a specific missing step",
            "Converts the decision into a CI gate, not a one-off judgment",
        ]),
    ];

    PlaygroundScenario {
        id: ScenarioId::from("ship-decision"),
        customer_message: "The rewritten support prompt — can we ship it this week or not?"
            .to_string(),
        input_label: Some("PM question".to_string()),
        components,
        responses,
        recommended_build_order: vec![
            ComponentId::from("golden-set"),
            ComponentId::from("judge-rubric"),
            ComponentId::from("regression-report"),
        ],
        principles: vec![
            Principle::new(
                "Slices over toplines",
                "Aggregate pass rates hide cohort regressions.",
                &["golden-set"],
            ),
            Principle::new(
                "Eval the evaluator",
                "A delta is only as trustworthy as the grader behind it.",
                &["judge-rubric"],
            ),
            Principle::new(
                "Diff the failures",
                "Newly-failing cases are where root causes live.",
                &["regression-report"],
            ),
        ],
    }
}
