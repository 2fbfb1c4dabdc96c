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
        id: AcademyId::MultiAgentOrchestration,
        title: "Multi-Agent Orchestration".to_string(),
        tagline: "Many small contexts beat one enormous one".to_string(),
        chapters: chapters(),
        scenarios: vec![fanout_plan()],
    }
}

fn chapters() -> Vec<Chapter> {
    vec![
        Chapter::new(
            "when-to-split",
            1,
            "When to split the work",
            "Parallelism, isolation, scale",
            vec![
                prose(
                    "One agent with one window hits three walls: the window fills, the \
                     task outlives the attention span, and unrelated subtasks contaminate \
                     each other. Orchestration splits work across agents so each context \
                     stays small, focused, and disposable.",
                ),
                bullets(&[
                    "Fan out when subtasks are independent and the merge is cheap.",
                    "Stay single-agent when steps share mutable state or tight ordering.",
                    "Verification is the best use of a second opinion: spawn skeptics.",
                ]),
            ],
        ),
        Chapter::new(
            "topologies",
            2,
            "Topologies",
            "Leader, pipeline, swarm",
            vec![
                table(
                    &["Topology", "Shape", "Fits"],
                    &[
                        &["Leader/workers", "One planner, N executors", "Fan-out + merge"],
                        &["Pipeline", "Stage after stage per item", "Transform chains"],
                        &["Debate/judges", "N candidates, panel scores", "Wide design space"],
                        &["Swarm", "Peers with a shared board", "Open-ended exploration"],
                    ],
                ),
                callout(
                    "The merge step is the product. A fan-out whose results cannot be \
                     reconciled just parallelized the confusion.",
                ),
            ],
        ),
        Chapter::new(
            "lab",
            3,
            "Lab: plan a 40-repo audit",
            "From wish to work plan",
            vec![
                prose(
                    "Leadership wants forty repositories audited by Friday. Enable \
                     planning components and watch the plan evolve from optimism to an \
                     executable orchestration.",
                ),
                playground("fanout-plan"),
            ],
        ),
        Chapter::new(
            "failure-containment",
            4,
            "Failure containment",
            "Agents fail; fleets shrug",
            vec![
                prose(
                    "Individual agents time out, hallucinate, or return garbage. A sound \
                     orchestration treats each result as untrusted input: validate \
                     against a schema, retry with narrowed scope, and drop rather than \
                     merge anything that fails the gate.",
                ),
                bullets(&[
                    "Budget per agent; a runaway worker cannot eat the fleet's tokens.",
                    "Idempotent tasks make retries safe.",
                    "Quorum on disputed facts beats trusting any single worker.",
                ]),
            ],
        ),
    ]
}

fn fanout_plan() -> PlaygroundScenario {
    let components = vec![
        ContextComponent::new(
            "task-decomposition",
            "Task decomposition",
            "decomp",
            150,
            Tint::Cyan,
            "Audit checklist per repo: license, CI health, dependency freshness, owner \
             liveness. Each repo is independent; checklist output is a fixed 12-field \
             record.",
        ),
        ContextComponent::new(
            "worker-roster",
            "Worker roster + budgets",
            "roster",
            130,
            Tint::Yellow,
            "Capacity: up to 10 concurrent worker agents, 50k tokens each, ~25 min per \
             repo observed on a 5-repo pilot. Retries: one per repo, narrowed scope.",
        ),
        ContextComponent::new(
            "merge-protocol",
            "Merge protocol",
            "merge",
            110,
            Tint::Green,
            "Workers emit records matching audit_record.schema.json; a reducer agent \
             validates each record, rejects malformed ones for retry, and renders the \
             summary table plus an exceptions list.",
        ),
    ];

    let responses = vec![
        PlaygroundResponse::new(
            &[],
            15,
            "Optimism",
            "Forty repos by Friday is doable if we start now — I'll go through them one \
             by one and keep notes as I go.",
        )
        .with_issues(&[
            "Serial plan: one context auditing 40 repos will drown",
            "No definition of 'audited', so results won't be comparable",
        ]),
        PlaygroundResponse::new(
            &["task-decomposition"],
            55,
            "Decomposed",
            "Each repo gets the same 12-field checklist (license, CI, dependencies, \
             owners), and repos are independent — so this fans out cleanly: one worker \
             per repo, identical instructions, comparable records back. What's missing \
             is how many workers we can actually run and how the records get combined.",
        )
        .with_strengths(&["Fixed per-repo record makes results mergeable by construction"])
        .with_issues(&["No capacity math, no merge step — not yet a schedule"]),
        PlaygroundResponse::new(
            &["task-decomposition", "worker-roster"],
            75,
            "Scheduled",
            "With 10 concurrent workers at ~25 min/repo, 40 repos is 4 waves — \
             comfortably inside Friday even with the one-retry allowance. Budget caps \
             (50k tokens/worker) keep a runaway repo from eating the fleet. The open \
             risk is the merge: 40 free-form reports would still need a human week.",
        )
        .with_strengths(&["Capacity math from pilot data, not hope", "Per-worker budgets cap blast radius"])
        .with_issues(&["Merge/validation still undefined"]),
        PlaygroundResponse::new(
            &["task-decomposition", "worker-roster", "merge-protocol"],
            92,
            "Executable orchestration",
            "Plan: 4 waves of 10 workers, one repo each, emitting \
             audit_record.schema.json records; a reducer validates every record, \
             bounces malformed ones into the single retry slot, and renders the summary \
             table plus exceptions. Per-worker 50k-token budgets, ~25 min/repo from the \
             pilot, finishes Thursday with slack. Friday morning: human review of the \
             exceptions list only.",
        )
        .with_strengths(&[
            "Schema-validated merge — results reconcile by construction",
            "Retries scoped and bounded; failures become exceptions, not blockers",
            "Humans review exceptions, not forty raw reports",
        ]),
    ];

    PlaygroundScenario {
        id: ScenarioId::from("fanout-plan"),
        customer_message: "We need all 40 service repos audited by Friday. How?".to_string(),
        input_label: Some("Leadership ask".to_string()),
        components,
        responses,
        recommended_build_order: vec![
            ComponentId::from("task-decomposition"),
            ComponentId::from("worker-roster"),
            ComponentId::from("merge-protocol"),
        ],
        principles: vec![
            Principle::new(
                "Decompose to independent units",
                "Fan-out is only safe when subtasks don't share mutable state.",
                &["task-decomposition"],
            ),
            Principle::new(
                "Budget the fleet",
                "Concurrency and token caps turn worst cases into bounded cases.",
                &["worker-roster"],
            ),
            Principle::new(
                "Design the merge first",
                "Unmergeable results mean the fan-out just parallelized confusion.",
                &["merge-protocol"],
            ),
        ],
    }
}
