use std::io::Write as _;
use std::sync::Arc;

use anyhow::{bail, Context};
use futures::StreamExt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfinder_core::Content;
use wayfinder_model::GeminiModel;
use wayfinder_planner::agents::{activity_agent, coordinator_agent, hotel_agent};
use wayfinder_runner::{CreateRequest, InMemorySessionService, Runner, RunnerConfig, SessionService};
use wayfinder_travel::{ActivityFinder, HotelFinder, TravelConfig};

const MODEL_NAME: &str = "gemini-2.0-flash";
const APP_NAME: &str = "wayfinder-planner";
const USER_ID: &str = "console-user";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let travel_config = TravelConfig::from_env();
    if travel_config.geoapify_api_key.is_none() || travel_config.opentripmap_api_key.is_none() {
        bail!("Please set GEOAPIFY_API_KEY and OPENTRIPMAP_API_KEY in .env");
    }

    let model_key = std::env::var("GOOGLE_API_KEY")
        .or_else(|_| std::env::var("GEMINI_API_KEY"))
        .context("Please set GOOGLE_API_KEY or GEMINI_API_KEY in .env")?;
    let model = Arc::new(GeminiModel::new(model_key, MODEL_NAME)?);

    let hotel_finder = Arc::new(HotelFinder::new(&travel_config)?);
    let activity_finder = Arc::new(ActivityFinder::new(&travel_config)?);

    let hotels = Arc::new(hotel_agent(model.clone(), hotel_finder)?);
    let activities = Arc::new(activity_agent(model.clone(), activity_finder)?);
    let coordinator = Arc::new(coordinator_agent(model, hotels, activities)?);

    let session_service = Arc::new(InMemorySessionService::new());
    let session = session_service
        .create(CreateRequest {
            app_name: APP_NAME.to_string(),
            user_id: USER_ID.to_string(),
            session_id: None,
        })
        .await?;
    let session_id = session.id().to_string();

    let runner = Runner::new(RunnerConfig {
        app_name: APP_NAME.to_string(),
        agent: coordinator,
        session_service,
    });

    println!("Travel planner ready.");
    print!("Enter your travel request: ");
    std::io::stdout().flush()?;
    let mut user_request = String::new();
    std::io::stdin().read_line(&mut user_request)?;
    let user_request = user_request.trim();
    info!(user_request, "user request");

    let mut events = runner
        .run(USER_ID, &session_id, Content::new("user").with_text(user_request))
        .await?;

    let mut all_events = Vec::new();
    while let Some(event) = events.next().await {
        all_events.push(event?);
    }

    let final_texts: Vec<String> = all_events
        .iter()
        .filter(|ev| ev.is_final_response())
        .filter_map(|ev| ev.content())
        .map(|content| content.joined_text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    if final_texts.is_empty() {
        println!("No final agent response found. Here are all events for debugging:");
        for ev in &all_events {
            println!("---- Event: {}", serde_json::to_string_pretty(ev)?);
        }
    } else {
        println!("\n--- Travel Plan ---\n");
        for text in final_texts {
            println!("{text}");
        }
    }

    Ok(())
}
