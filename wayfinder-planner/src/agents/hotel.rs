use std::sync::Arc;

use wayfinder_agent::{LlmAgent, LlmAgentBuilder};
use wayfinder_core::{Llm, Result};
use wayfinder_travel::HotelFinder;

use crate::tools::search_hotels_tool;

const INSTRUCTION: &str = r#"You are the HOTEL-FINDER AGENT.

You receive a request (in plain text) describing:
- the destination city
- the number of guests
- a budget preference (e.g. "luxury", "mid-range", "budget")
- other hotel preferences (hostel vs hotel, amenities)

Your task:

1) Call the search_hotels tool with the destination city.

2) From the returned hotel list, select up to 5 candidate hotels.
   - If budget is "budget" or "mid-range", prioritize hotels where the
     "price" field exists and appears reasonable.
   - If price is missing, prioritize by "rating" or by central location.

3) For each candidate hotel, return a structured summary in plain text:
   - Name
   - Address
   - Approximate price or range (if provided; otherwise "estimate unavailable")
   - Rating (if available)
   - Short note, e.g. "central location, good reviews" or "price unknown, check manually"

4) If the tool returns an error or no hotels, output:
   "No suitable hotels found for [destination] with your constraints."

Important rules:
- Do NOT invent prices or availability if not provided.
- Return only plain text."#;

pub fn hotel_agent(model: Arc<dyn Llm>, finder: Arc<HotelFinder>) -> Result<LlmAgent> {
    LlmAgentBuilder::new("hotel_agent")
        .description("Finds hotel accommodations based on user constraints.")
        .model(model)
        .instruction(INSTRUCTION)
        .tool(Arc::new(search_hotels_tool(finder)))
        .build()
}
