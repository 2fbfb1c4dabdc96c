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
use super::heading;
use super::playground;
use super::prose;
use super::table;

pub(super) fn academy() -> Academy {
    Academy {
        id: AcademyId::ContextEngineering,
        title: "Context Engineering".to_string(),
        tagline: "Assemble the window the agent actually needs".to_string(),
        chapters: chapters(),
        scenarios: vec![support_triage()],
    }
}

fn chapters() -> Vec<Chapter> {
    vec![
        Chapter::new(
            "why-context",
            1,
            "Why context beats prompting",
            "The window is the interface",
            vec![
                prose(
                    "A model sees exactly one thing: the token window you hand it. Every \
                     behavior you wish the agent had — tone, grounding, the ability to act — \
                     is either present in that window or absent from the response. Context \
                     engineering is the discipline of deciding what goes in, in what order, \
                     and at what token cost.",
                ),
                prose(
                    "Prompt tweaking optimizes one string. Context engineering treats the \
                     window as a composed artifact: system framing, caller state, retrieved \
                     facts, tool definitions, and worked examples, each earning its tokens.",
                ),
                callout(
                    "If the answer is not derivable from the window, the model will guess. \
                     Guessing is the failure mode; assembly is the fix.",
                ),
            ],
        ),
        Chapter::new(
            "anatomy",
            2,
            "Anatomy of a window",
            "The five component families",
            vec![
                prose(
                    "Most production windows decompose into a handful of recurring \
                     components. Naming them lets a team budget, test, and cache them \
                     independently.",
                ),
                table(
                    &["Component", "Carries", "Typical share"],
                    &[
                        &["System prompt", "Role, guardrails, output shape", "5-10%"],
                        &["Caller state", "Who is asking, account facts", "5-15%"],
                        &["Retrieved docs", "Policy and knowledge excerpts", "20-40%"],
                        &["Tool definitions", "What the agent can do", "10-25%"],
                        &["Worked examples", "Few-shot demonstrations", "0-30%"],
                    ],
                ),
                prose(
                    "The shares are budgets, not laws. The point is that each family is a \
                     separate authoring surface with its own freshness, ownership, and \
                     failure modes.",
                ),
            ],
        ),
        Chapter::new(
            "ordering",
            3,
            "Ordering and budgets",
            "Position is meaning",
            vec![
                prose(
                    "Order components from stable to volatile: system framing first, then \
                     slowly-changing reference material, then per-request state, then the \
                     live message. Stable prefixes cache; volatile suffixes stay cheap to \
                     recompute.",
                ),
                bullets(&[
                    "Put guardrails before anything user-controlled can echo them away.",
                    "Keep retrieved excerpts contiguous so citations can point into them.",
                    "Spend the last tokens on the live request, never on boilerplate.",
                ]),
                heading("A canonical layout"),
                code(
                    "text",
                    "[system prompt]\n[customer profile]\n[retrieved policy excerpts]\n[tool definitions]\n--- conversation ---\n[customer message]",
                ),
            ],
        ),
        Chapter::new(
            "lab",
            4,
            "Lab: build a support window",
            "Toggle components, watch the answer change",
            vec![
                prose(
                    "The playground below simulates a billing-support agent. Enable \
                     components to extend the window and watch the canned response, the \
                     assembled context, and the pipeline change together. The guided build \
                     order replays the curated assembly one component at a time.",
                ),
                playground("support-triage"),
            ],
        ),
        Chapter::new(
            "failure-modes",
            5,
            "Failure modes",
            "How windows rot",
            vec![
                prose(
                    "Windows fail in characteristic ways: stale retrieval quietly \
                     contradicting fresh policy, tool definitions drifting from the \
                     deployed tools, few-shot examples teaching an obsolete format.",
                ),
                bullets(&[
                    "Stale grounding: retrieval index lags the source of truth.",
                    "Schema drift: tool JSON in the window no longer matches the server.",
                    "Example poisoning: one bad few-shot outweighs a page of instructions.",
                    "Budget creep: every team adds a paragraph until the window truncates.",
                ]),
                callout(
                    "Treat the window like a build artifact: versioned inputs, a composition \
                     step, and a validation gate before it ships.",
                ),
            ],
        ),
    ]
}

fn support_triage() -> PlaygroundScenario {
    let components = vec![
        ContextComponent::new(
            "system-prompt",
            "System prompt",
            "sys",
            180,
            Tint::Cyan,
            "You are the billing-support agent for Lumen Cloud. Be concise and warm. \
             Never promise refunds you cannot execute; cite policy when you decline.",
        ),
        ContextComponent::new(
            "customer-profile",
            "Customer profile",
            "profile",
            140,
            Tint::Magenta,
            "Customer: Dana Reyes. Plan: Team (annual). Tenure: 3 years. Last invoice: \
             $96.00 on 2025-07-28, charged twice (ref INV-88213, INV-88214). No prior \
             refunds. Sentiment on last contact: positive.",
        ),
        ContextComponent::new(
            "retrieved-docs",
            "Retrieved policy docs",
            "docs",
            320,
            Tint::Green,
            "Refund policy §4.2: duplicate charges are refunded in full to the original \
             payment method within 5 business days. §4.3: refunds over $500 require a \
             human approver. §7.1: always reference the invoice id in customer \
             communication.",
        ),
        ContextComponent::new(
            "tool-defs",
            "Tool definitions",
            "tools",
            260,
            Tint::Yellow,
            "tool issue_refund(invoice_id: string, amount_cents: int) -> RefundReceipt\n\
             tool lookup_invoice(invoice_id: string) -> Invoice\n\
             Constraint: issue_refund requires a verified duplicate-charge flag.",
        ),
        ContextComponent::new(
            "few-shot",
            "Worked examples",
            "examples",
            410,
            Tint::Blue,
            "Example ticket: double charge on Starter plan -> verified duplicate via \
             lookup_invoice, issued refund, confirmed timeline, offered invoice PDF. \
             Example ticket: disputed upgrade fee -> explained proration with policy \
             citation, no refund issued.",
        ),
    ];

    let responses = vec![
        PlaygroundResponse::new(
            &[],
            12,
            "No context",
            "Hi! I'd love to help, but I don't have access to your account details. \
             Could you contact our billing team with your invoice number?",
        )
        .with_issues(&[
            "Deflects to another channel instead of resolving",
            "No idea who the customer is or what happened",
            "Invents a process that may not exist",
        ]),
        PlaygroundResponse::new(
            &["system-prompt"],
            35,
            "Tone only",
            "Thanks for reaching out — I'm sorry about the billing trouble! I want to \
             get this sorted for you. Could you share the invoice number and the amount \
             you were charged so I can look into it?",
        )
        .with_issues(&[
            "Asks for data the system already has",
            "Cannot verify the duplicate charge or act on it",
        ])
        .with_strengths(&["On-brand tone and ownership of the problem"]),
        PlaygroundResponse::new(
            &["system-prompt", "customer-profile"],
            55,
            "Personalized, ungrounded",
            "Hi Dana — I can see the $96.00 charge on 2025-07-28 went through twice \
             (INV-88213 and INV-88214). That's on us. I believe duplicate charges are \
             refundable, and I've flagged this for our billing team to confirm the \
             timeline.",
        )
        .with_issues(&[
            "Hedges on policy it cannot cite (\"I believe\")",
            "Hands off instead of executing the refund",
        ])
        .with_strengths(&["References the exact invoices without asking"]),
        PlaygroundResponse::new(
            &["system-prompt", "retrieved-docs"],
            60,
            "Grounded, impersonal",
            "Duplicate charges are refunded in full to the original payment method \
             within 5 business days (policy §4.2). If you can confirm the invoice id of \
             the duplicate charge, I'll get that started for you.",
        )
        .with_issues(&[
            "Asks for an invoice id the profile would have supplied",
            "Reads like a policy page, not a person",
        ])
        .with_strengths(&["Accurate policy citation with the right timeline"]),
        PlaygroundResponse::new(
            &["system-prompt", "customer-profile", "retrieved-docs"],
            75,
            "Grounded and personal",
            "Hi Dana — you're right: INV-88213 and INV-88214 are duplicate $96.00 \
             charges from 2025-07-28. Per policy §4.2 the duplicate is refunded in full \
             to your original payment method within 5 business days. I've escalated the \
             refund now and you'll get a confirmation email once it's issued.",
        )
        .with_issues(&["Still escalates — the agent has no way to execute the refund"])
        .with_strengths(&[
            "Correct invoices, correct policy, correct timeline",
            "Cites the invoice id as §7.1 requires",
        ]),
        PlaygroundResponse::new(
            &["system-prompt", "customer-profile", "retrieved-docs", "tool-defs"],
            92,
            "Agent-ready",
            "Hi Dana — confirmed: INV-88214 duplicates INV-88213 ($96.00, 2025-07-28). \
             I've verified the duplicate via lookup_invoice and issued the refund with \
             issue_refund(INV-88214, 9600); receipt RF-3341 is on your account. Per \
             policy §4.2 it reaches your original payment method within 5 business \
             days. Anything else I can check while I'm in here?",
        )
        .with_strengths(&[
            "Verifies before acting, then actually acts",
            "Grounded in policy with invoice ids cited",
            "Closes the loop with a receipt the customer can keep",
        ]),
    ];

    PlaygroundScenario {
        id: ScenarioId::from("support-triage"),
        customer_message: "I was charged twice for my July invoice — can you fix this? \
                           It's $96 each time."
            .to_string(),
        input_label: Some("Incoming ticket".to_string()),
        components,
        responses,
        // Curated assembly; deliberately excludes the few-shot block, which
        // costs more than it earns on this ticket.
        recommended_build_order: vec![
            ComponentId::from("system-prompt"),
            ComponentId::from("customer-profile"),
            ComponentId::from("retrieved-docs"),
            ComponentId::from("tool-defs"),
        ],
        principles: vec![
            Principle::new(
                "Frame the role before the facts",
                "Guardrails and tone live in the system prompt, ahead of anything volatile.",
                &["system-prompt"],
            ),
            Principle::new(
                "Personalize with caller state",
                "The agent should never ask for what the profile already knows.",
                &["customer-profile"],
            ),
            Principle::new(
                "Ground every claim",
                "Policy statements come from retrieved text, not model memory.",
                &["retrieved-docs"],
            ),
            Principle::new(
                "Give the agent actuators",
                "A grounded answer that ends in an escalation is a half-answer.",
                &["tool-defs"],
            ),
            Principle::new(
                "Spend tokens where they earn",
                "Every component pays rent; drop the ones that don't move the score.",
                &[],
            ),
        ],
    }
}
