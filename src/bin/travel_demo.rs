//! Travel demo: 旅行与日程助手演示
//!
//! Runs three fixed tasks against one agent with the static demo tools:
//! calendar cleanup with weather, flight and hotel booking with loyalty
//! points, and attraction planning with Google Search and code execution.
//!
//! Requires `GEMINI_API_KEY` (a `.env` file works too). Set `RUST_LOG=debug`
//! to see every server message and tool dispatch.

use gemini_live_agent::demo::{self, TRAVEL_ASSISTANT_INSTRUCTION};
use gemini_live_agent::{Agent, RunOptions};

const MODEL: &str = "gemini-2.0-flash-exp";

struct Scenario {
    title: &'static str,
    task: &'static str,
    options: RunOptions,
}

fn scenarios() -> [Scenario; 3] {
    let with_code = RunOptions::default().code_execution(true).google_search(false);
    [
        Scenario {
            title: "Calendar Management and Weather",
            task: "Could you help me with two things? First, I need to clear my schedule for today - \
                   please check my calendar for today's appointments and cancel all of them. \
                   After that, let me know what the current weather is like in New York City. \
                   Thanks!",
            options: with_code,
        },
        Scenario {
            title: "Travel Booking Assistance with Loyalty Programs",
            task: "I need your help with travel planning for a trip to New York today. First, check available flights from San Francisco to New York. \
                   Then find me some hotels in New York with at least 4-star ratings. \
                   Also check my loyalty program accounts to see what points I have available. \
                   Based on all this information, recommend the best flight and hotel options considering both price and my loyalty points.",
            options: with_code,
        },
        Scenario {
            title: "Attraction Planning with Google Search and Code Execution",
            task: "Search Google for best attractions in New York City for a one-day visit. I'd like you to create an \
                   itinerary with 3-4 popular attractions arranged in a sensible order based on their locations. \
                   Please include the approximate costs for each place. Take into account the current weather in New York \
                   and mention any applicable loyalty program benefits for New York City or discounts I might be eligible for. \
                   Finally, wrap up with a brief summary of the day's plan.",
            options: with_code.google_search(true),
        },
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut agent = Agent::new(MODEL, Some(TRAVEL_ASSISTANT_INSTRUCTION))?;
    demo::register_demo_tools(&mut agent);

    for (i, scenario) in scenarios().into_iter().enumerate() {
        let n = i + 1;
        println!("\nDemo {}: {}", n, scenario.title);

        let result = agent.run(scenario.task, scenario.options).await;

        println!("\n--- Demo {} Results ---", n);
        println!("{}", result);
        println!("--------------------");
    }

    Ok(())
}
