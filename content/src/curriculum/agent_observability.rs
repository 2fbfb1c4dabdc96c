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
use super::code;
use super::playground;
use super::prose;
use super::table;

pub(super) fn academy() -> Academy {
    Academy {
        id: AcademyId::AgentObservability,
        title: "Agent Observability".to_string(),
        tagline: "See what the agent actually did, not what you hoped".to_string(),
        chapters: chapters(),
        scenarios: vec![incident_debug()],
    }
}

fn chapters() -> Vec<Chapter> {
    vec![
        Chapter::new(
            "black-box",
            1,
            "The black-box problem",
            "Transcripts are not telemetry",
            vec![
                prose(
                    "An agent run is a tree of model calls, tool invocations, and retries. \
                     Reading the final transcript tells you what the user saw; it does not \
                     tell you which retrieval came back empty, which tool call was retried \
                     three times, or where the tokens went.",
                ),
                prose(
                    "Observability for agents borrows the vocabulary of distributed \
                     tracing: every model call and tool call is a span, spans nest under \
                     the run, and attributes carry prompts, token counts, and outcomes.",
                ),
            ],
        ),
        Chapter::new(
            "span-model",
            2,
            "A span model for agents",
            "Runs, steps, calls",
            vec![
                table(
                    &["Span", "Parent", "Key attributes"],
                    &[
                        &["run", "-", "trigger, user id, outcome"],
                        &["step", "run", "step index, intent"],
                        &["model_call", "step", "model, tokens in/out, latency"],
                        &["tool_call", "step", "tool, args digest, status, retries"],
                        &["retrieval", "step", "query, hit count, max score"],
                    ],
                ),
                callout(
                    "If a question about last night's incident cannot be answered with a \
                     span query, the span model is missing an attribute.",
                ),
            ],
        ),
        Chapter::new(
            "lab",
            3,
            "Lab: debug a looping agent",
            "Context decides the diagnosis",
            vec![
                prose(
                    "An on-call engineer asks why the checkout agent looped. Enable \
                     telemetry components and watch the diagnosis sharpen from a shrug to \
                     a root cause with a fix.",
                ),
                playground("incident-debug"),
            ],
        ),
        Chapter::new(
            "budgets",
            4,
            "Token ledgers and cost attribution",
            "Every token has an owner",
            vec![
                prose(
                    "A token ledger rolls model-call spans up into per-feature and \
                     per-tenant spend. The ledger is how 'the agent is expensive' becomes \
                     'retrieval re-ranking doubled prompt size on the search path'.",
                ),
                bullets(&[
                    "Attribute tokens to the component that put them in the window.",
                    "Alert on deltas per release, not on absolute spend.",
                    "Keep ledgers queryable next to traces; joining after the fact is painful.",
                ]),
                code(
                    "sql",
                    "SELECT feature, SUM(prompt_tokens + completion_tokens) AS tokens\nFROM model_calls\nWHERE run_date = current_date - 1\nGROUP BY feature\nORDER BY tokens DESC;",
                ),
            ],
        ),
    ]
}

fn incident_debug() -> PlaygroundScenario {
    let components = vec![
        ContextComponent::new(
            "run-trace",
            "Run trace",
            "trace",
            380,
            Tint::Cyan,
            "Trace run_7f2c: 41 steps. Steps 9-40 alternate tool_call \
             check_inventory(sku=KB-91) -> status=stale_cache and model_call deciding to \
             re-check. No step advances the plan after step 9.",
        ),
        ContextComponent::new(
            "token-ledger",
            "Token ledger",
            "ledger",
            160,
            Tint::Yellow,
            "Ledger run_7f2c: 312k prompt tokens, 9k completion. 87% of prompt tokens \
             spent on steps 9-40; per-step prompt grows ~4k tokens as history \
             accumulates.",
        ),
        ContextComponent::new(
            "error-taxonomy",
            "Error taxonomy",
            "errors",
            120,
            Tint::Magenta,
            "Known failure classes: stale_cache from check_inventory is retryable only \
             with cache_bust=true; retrying without it returns the same snapshot \
             indefinitely.",
        ),
    ];

    let responses = vec![
        PlaygroundResponse::new(
            &[],
            15,
            "Shrug",
            "Hard to say without more data — the agent may have hit a model regression \
             or a slow dependency. I'd suggest re-running the job and watching it.",
        )
        .with_issues(&[
            "No evidence, so the diagnosis is a guess",
            "\"Re-run and watch\" is not a fix",
        ]),
        PlaygroundResponse::new(
            &["run-trace"],
            55,
            "Loop identified",
            "The trace shows a tight loop: from step 9 the agent alternates \
             check_inventory(KB-91) -> stale_cache with a model call that decides to \
             check again. Nothing advances after step 9, so the run spun until the step \
             ceiling. Root cause is in how stale_cache is handled, but the trace alone \
             doesn't say what the correct handling is.",
        )
        .with_strengths(&["Pinpoints the loop boundary and the repeating pair of spans"])
        .with_issues(&["Can't yet say why retrying was wrong or what it cost"]),
        PlaygroundResponse::new(
            &["run-trace", "token-ledger"],
            72,
            "Loop + blast radius",
            "Steps 9-40 are a retry loop on check_inventory(KB-91) returning \
             stale_cache. The ledger shows the loop burned 87% of 312k prompt tokens, \
             growing ~4k tokens per step as history re-accumulated — so the loop is \
             also the cost spike you saw. Still unclear whether stale_cache is \
             retryable at all; that needs the failure-class reference.",
        )
        .with_strengths(&[
            "Ties the loop to the token spike with per-step growth",
            "Quantifies blast radius for the incident report",
        ])
        .with_issues(&["Remediation is still speculative"]),
        PlaygroundResponse::new(
            &["run-trace", "token-ledger", "error-taxonomy"],
            90,
            "Root cause + fix",
            "Root cause: check_inventory returned stale_cache, which is only retryable \
             with cache_bust=true; the agent retried without it, so every attempt saw \
             the same snapshot (steps 9-40, 87% of the run's 312k prompt tokens). Fix: \
             map stale_cache to a retry-with-cache_bust policy and cap identical-call \
             retries at 2. Both are tool-dispatch changes; no prompt change needed.",
        )
        .with_strengths(&[
            "Names the exact failure class and the policy that handles it",
            "Actionable fix scoped to tool dispatch",
            "Cost impact quantified for the postmortem",
        ]),
    ];

    PlaygroundScenario {
        id: ScenarioId::from("incident-debug"),
        customer_message: "Why did the checkout agent loop for 40 minutes last night and \
                           blow the token budget?"
            .to_string(),
        input_label: Some("On-call question".to_string()),
        components,
        responses,
        recommended_build_order: vec![
            ComponentId::from("run-trace"),
            ComponentId::from("token-ledger"),
            ComponentId::from("error-taxonomy"),
        ],
        principles: vec![
            Principle::new(
                "Trace before you theorize",
                "Span data turns 'probably a regression' into 'steps 9-40 repeat'.",
                &["run-trace"],
            ),
            Principle::new(
                "Cost is a first-class signal",
                "The ledger tells you whether a bug is an annoyance or an incident.",
                &["token-ledger"],
            ),
            Principle::new(
                "Classify failures once, reuse everywhere",
                "A shared taxonomy is what makes the fix a policy, not a patch.",
                &["error-taxonomy"],
            ),
        ],
    }
}
