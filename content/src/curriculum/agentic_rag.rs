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

pub(super) fn academy() -> Academy {
    Academy {
        id: AcademyId::AgenticRag,
        title: "Agentic RAG".to_string(),
        tagline: "Retrieval as a tool the agent wields, not a stage it passes".to_string(),
        chapters: chapters(),
        scenarios: vec![kb_answer()],
    }
}

fn chapters() -> Vec<Chapter> {
    vec![
        Chapter::new(
            "pipeline-vs-agent",
            1,
            "Pipeline RAG vs agentic RAG",
            "Who decides what to fetch?",
            vec![
                prose(
                    "Classic RAG is a fixed pipeline: embed the question, fetch top-k, \
                     stuff the window, answer. Agentic RAG hands the retriever to the \
                     model as a tool: the agent decides when to search, reformulates \
                     queries that miss, and stops when the evidence is sufficient.",
                ),
                bullets(&[
                    "Pipeline: one shot, fixed k, no recourse when recall fails.",
                    "Agentic: iterative queries, self-assessed coverage, citations checked.",
                ]),
            ],
        ),
        Chapter::new(
            "query-shaping",
            2,
            "Query shaping",
            "The question users ask is rarely the query that retrieves",
            vec![
                prose(
                    "Users ask in their vocabulary; the corpus answers in its own. \
                     Rewriting bridges the two: expand acronyms, split multi-part \
                     questions, and anchor time-sensitive terms to versions.",
                ),
                code(
                    "text",
                    "user:  \"can I raise my API limits?\"\nrewrites:\n  - \"rate limit increase request process\"\n  - \"quota tiers by plan\"\n  - \"burst limit vs sustained limit\"",
                ),
            ],
        ),
        Chapter::new(
            "lab",
            3,
            "Lab: answer from the knowledge base",
            "Evidence in, confidence out",
            vec![
                prose(
                    "A developer asks about API rate limits. Enable retrieval components \
                     and watch the answer go from folklore to cited fact.",
                ),
                playground("kb-answer"),
            ],
        ),
        Chapter::new(
            "grounding-discipline",
            4,
            "Grounding discipline",
            "Citations or it didn't happen",
            vec![
                prose(
                    "An answer is grounded when every load-bearing claim points into \
                     retrieved text the user could open. Enforce it mechanically: claims \
                     without a citation get flagged, citations that don't support their \
                     claim get the answer rejected.",
                ),
                callout(
                    "Retrieval that returns nothing is a result too: the honest answer is \
                     'the docs don't say', never a confident guess.",
                ),
            ],
        ),
    ]
}

fn kb_answer() -> PlaygroundScenario {
    let components = vec![
        ContextComponent::new(
            "query-rewrites",
            "Query rewrites",
            "rewrite",
            90,
            Tint::Yellow,
            "Rewrites for 'can I raise my API limits?': 'rate limit increase process', \
             'quota tiers by plan', 'burst vs sustained limits'.",
        ),
        ContextComponent::new(
            "retrieved-chunks",
            "Retrieved chunks",
            "chunks",
            340,
            Tint::Green,
            "docs/limits.md#tiers: Free 60 rpm, Pro 600 rpm, Enterprise custom. \
             docs/limits.md#increase: Pro customers request increases via the console; \
             approvals within 2 business days. docs/limits.md#burst: bursts to 2x for \
             60s are tolerated on Pro and above.",
        ),
        ContextComponent::new(
            "citation-policy",
            "Citation policy",
            "cite",
            70,
            Tint::Cyan,
            "Every numeric claim must cite a doc anchor. If retrieval lacks an answer, \
             say so explicitly; do not extrapolate from adjacent tiers.",
        ),
    ];

    let responses = vec![
        PlaygroundResponse::new(
            &[],
            20,
            "Folklore",
            "Most APIs let you request higher limits from your dashboard or by \
             contacting support — there's usually an enterprise tier with custom quotas. \
             Check your plan settings.",
        )
        .with_issues(&[
            "Generic advice about 'most APIs', not this one",
            "No numbers, no process, nothing checkable",
        ]),
        PlaygroundResponse::new(
            &["retrieved-chunks"],
            65,
            "Grounded, unscoped",
            "Yes. Limits are 60 rpm on Free and 600 rpm on Pro, with custom limits on \
             Enterprise. Pro customers can request an increase from the console and \
             approvals land within 2 business days. Bursts to 2x for up to 60 seconds \
             are tolerated on Pro and above.",
        )
        .with_strengths(&["Correct numbers and process from the docs"])
        .with_issues(&[
            "No citations, so the reader can't verify",
            "Retrieved on the literal question only; may have missed relevant sections",
        ]),
        PlaygroundResponse::new(
            &["query-rewrites", "retrieved-chunks"],
            78,
            "Well-retrieved",
            "Yes — and the full picture spans three sections: tiers (Free 60 rpm, Pro \
             600 rpm, Enterprise custom), the increase process (Pro requests via \
             console, ~2 business days), and burst tolerance (2x for 60s on Pro+). The \
             rewrites are what surfaced the burst section, which the literal question \
             would have missed.",
        )
        .with_strengths(&["Coverage: rewrites pulled in the adjacent burst policy"])
        .with_issues(&["Still no anchors for the numeric claims"]),
        PlaygroundResponse::new(
            &["query-rewrites", "retrieved-chunks", "citation-policy"],
            90,
            "Cited answer",
            "Yes. Free is 60 rpm and Pro is 600 rpm, Enterprise is custom \
             [limits.md#tiers]. On Pro you request an increase from the console and \
             approvals arrive within 2 business days [limits.md#increase]. Short bursts \
             to 2x for up to 60 seconds are tolerated on Pro and above \
             [limits.md#burst]. The docs don't state an increase path for Free plans.",
        )
        .with_strengths(&[
            "Every number carries an anchor the reader can open",
            "Says what the docs don't say instead of guessing",
        ]),
    ];

    PlaygroundScenario {
        id: ScenarioId::from("kb-answer"),
        customer_message: "Can I raise my API rate limits, and how long does it take?"
            .to_string(),
        input_label: Some("Developer question".to_string()),
        components,
        responses,
        recommended_build_order: vec![
            ComponentId::from("query-rewrites"),
            ComponentId::from("retrieved-chunks"),
            ComponentId::from("citation-policy"),
        ],
        principles: vec![
            Principle::new(
                "Rewrite before you retrieve",
                "The corpus answers its own vocabulary, not the user's.",
                &["query-rewrites"],
            ),
            Principle::new(
                "Evidence in the window",
                "Claims come from retrieved text the user could open.",
                &["retrieved-chunks"],
            ),
            Principle::new(
                "Cite or decline",
                "Uncited numbers and silent extrapolation are the failure modes.",
                &["citation-policy"],
            ),
        ],
    }
}
