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
        id: AcademyId::ToolUse,
        title: "Tool Use & MCP".to_string(),
        tagline: "From text generator to actor, safely".to_string(),
        chapters: chapters(),
        scenarios: vec![booking_call()],
    }
}

fn chapters() -> Vec<Chapter> {
    vec![
        Chapter::new(
            "tools-as-contract",
            1,
            "Tools are contracts",
            "A schema is a promise",
            vec![
                prose(
                    "A tool definition is the contract between the model and your \
                     system: name, purpose, typed arguments, and what comes back. The \
                     model can only be as precise as the schema it was shown — vague \
                     descriptions produce vague calls.",
                ),
                code(
                    "json",
                    "{\n  \"name\": \"reserve_table\",\n  \"description\": \"Reserve a restaurant table. Requires an exact party size and an ISO 8601 time.\",\n  \"input_schema\": {\n    \"type\": \"object\",\n    \"properties\": {\n      \"restaurant_id\": { \"type\": \"string\" },\n      \"party_size\": { \"type\": \"integer\", \"minimum\": 1 },\n      \"time\": { \"type\": \"string\", \"format\": \"date-time\" }\n    },\n    \"required\": [\"restaurant_id\", \"party_size\", \"time\"]\n  }\n}",
                ),
            ],
        ),
        Chapter::new(
            "mcp",
            2,
            "MCP: tools across process boundaries",
            "Discovery, transport, trust",
            vec![
                prose(
                    "The Model Context Protocol moves tool definitions out of your \
                     binary: servers advertise tools, clients list and call them over a \
                     standard transport, and the same agent can reach a filesystem \
                     server, a calendar server, and a vendor API without bespoke glue.",
                ),
                table(
                    &["Concern", "In-process tools", "MCP servers"],
                    &[
                        &["Discovery", "Compiled in", "list_tools at runtime"],
                        &["Versioning", "Ships with binary", "Server-side, can drift"],
                        &["Trust", "Your code", "Third party — sandbox it"],
                    ],
                ),
                callout(
                    "Treat a remote tool result like user input: validate before it \
                     touches state, because you do not control the server.",
                ),
            ],
        ),
        Chapter::new(
            "lab",
            3,
            "Lab: one request, two tools",
            "Watch precision come from context",
            vec![
                prose(
                    "A user wants a weather check and a dinner reservation in one \
                     breath. Enable components and watch the agent graduate from chat to \
                     correct, validated tool calls.",
                ),
                playground("booking-call"),
            ],
        ),
        Chapter::new(
            "guardrails",
            4,
            "Argument validation and dry runs",
            "The last line before side effects",
            vec![
                prose(
                    "Between 'the model emitted a call' and 'the call runs' sits your \
                     validation layer: schema-check the arguments, enforce invariants the \
                     schema cannot express, and dry-run destructive operations before \
                     committing.",
                ),
                bullets(&[
                    "Reject, don't repair: send malformed calls back with the error text.",
                    "Idempotency keys on anything that moves money or books resources.",
                    "Log every call with arguments digest — tool calls are your audit trail.",
                ]),
            ],
        ),
    ]
}

fn booking_call() -> PlaygroundScenario {
    let components = vec![
        ContextComponent::new(
            "tool-schemas",
            "Tool schemas",
            "schemas",
            280,
            Tint::Yellow,
            "tool get_forecast(city: string, date: date) -> Forecast\n\
             tool reserve_table(restaurant_id: string, party_size: int >= 1, time: \
             datetime) -> Reservation\n\
             Both require exact arguments; reserve_table is a side-effecting call.",
        ),
        ContextComponent::new(
            "server-manifest",
            "MCP server manifest",
            "manifest",
            170,
            Tint::Cyan,
            "Connected servers: weather-mcp v2.1 (get_forecast), dining-mcp v1.4 \
             (search_restaurants, reserve_table). dining-mcp requires restaurant_id \
             from search_restaurants; free-text names are rejected.",
        ),
        ContextComponent::new(
            "user-context",
            "User context",
            "user",
            90,
            Tint::Magenta,
            "User: in Lisbon this weekend, party of 2, prefers outdoor seating, \
             usual dinner time 20:00, timezone Europe/Lisbon.",
        ),
        ContextComponent::new(
            "validation-rules",
            "Validation rules",
            "validate",
            120,
            Tint::Green,
            "Before side-effecting calls: echo the resolved arguments to the user for \
             confirmation; times must carry a timezone; party_size must be explicit, \
             never assumed.",
        ),
    ];

    let responses = vec![
        PlaygroundResponse::new(
            &[],
            14,
            "Chat only",
            "Lisbon is usually lovely in the evening! For a reservation I'd recommend \
             calling the restaurant directly or using a booking app — popular places \
             fill up fast on weekends.",
        )
        .with_issues(&[
            "No tools in the window, so the agent can only advise",
            "Weather 'usually lovely' is a guess, not a forecast",
        ]),
        PlaygroundResponse::new(
            &["tool-schemas"],
            48,
            "Calls, roughly",
            "I can check that and book it. Calling get_forecast(\"Lisbon\", Saturday) \
             and reserve_table(\"the riverside place\", 2, \"Saturday evening\")...\n\
             reserve_table failed: restaurant_id must be an id, and \"Saturday \
             evening\" is not a datetime.",
        )
        .with_strengths(&["Reaches for the right tools"])
        .with_issues(&[
            "Free-text restaurant name where an id is required",
            "Vague time — the schema wants ISO 8601, the model sent prose",
        ]),
        PlaygroundResponse::new(
            &["tool-schemas", "server-manifest"],
            68,
            "Right servers, wrong defaults",
            "Plan: get_forecast via weather-mcp, then search_restaurants on dining-mcp \
             to resolve an id before reserve_table — the manifest says free-text names \
             are rejected. I'll book for Saturday 19:00 for 4 people at the top search \
             result.",
        )
        .with_strengths(&["Resolves the id through search_restaurants first, per manifest"])
        .with_issues(&[
            "Invents party size and time instead of using what's known",
            "Books without confirming a side-effecting call",
        ]),
        PlaygroundResponse::new(
            &["tool-schemas", "server-manifest", "user-context"],
            80,
            "Personal, unconfirmed",
            "Saturday in Lisbon: get_forecast says 24°C and clear — good for the \
             outdoor seating you prefer. search_restaurants found \"Ribeira Terrace\" \
             (id rt-102) with outdoor tables; booking reserve_table(\"rt-102\", 2, \
             \"2026-08-08T20:00:00+01:00\") now.",
        )
        .with_strengths(&[
            "Party size, time, and seating preference from user context",
            "Correctly typed, timezone-qualified arguments",
        ])
        .with_issues(&["Executes a side-effecting call without echoing it for confirmation"]),
        PlaygroundResponse::new(
            &["tool-schemas", "server-manifest", "user-context", "validation-rules"],
            93,
            "Validated actor",
            "Saturday in Lisbon is 24°C and clear [get_forecast], so outdoor seating \
             works. I found \"Ribeira Terrace\" (rt-102) with a terrace table free. To \
             confirm before I book: table for 2, Saturday 2026-08-08 at 20:00 \
             Europe/Lisbon, outdoor seating — shall I reserve it? Nothing is booked \
             until you say yes.",
        )
        .with_strengths(&[
            "Echoes resolved arguments before the side effect, per validation rules",
            "Every argument explicit: size, timezone-qualified time, resolved id",
            "Forecast grounded in a real tool result",
        ]),
    ];

    PlaygroundScenario {
        id: ScenarioId::from("booking-call"),
        customer_message: "What's the weather in Lisbon on Saturday evening, and can you \
                           book us an outdoor table somewhere nice?"
            .to_string(),
        input_label: Some("User request".to_string()),
        components,
        responses,
        recommended_build_order: vec![
            ComponentId::from("tool-schemas"),
            ComponentId::from("server-manifest"),
            ComponentId::from("user-context"),
            ComponentId::from("validation-rules"),
        ],
        principles: vec![
            Principle::new(
                "Schemas make calls precise",
                "The model can only match the contract it was shown.",
                &["tool-schemas"],
            ),
            Principle::new(
                "Discover, don't assume",
                "Server manifests say which calls exist and what they require.",
                &["server-manifest"],
            ),
            Principle::new(
                "Fill arguments from known state",
                "Party size and timezone were in context; inventing them is a bug.",
                &["user-context"],
            ),
            Principle::new(
                "Confirm before side effects",
                "Echo resolved arguments; nothing irreversible without a yes.",
                &["validation-rules"],
            ),
        ],
    }
}
