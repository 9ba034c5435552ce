//! Function tools bridging the finders into the agent stack.

use std::sync::Arc;

use serde_json::{json, Value};
use wayfinder_core::WayfinderError;
use wayfinder_tool::FunctionTool;
use wayfinder_travel::{ActivityFinder, HotelFinder, DEFAULT_LIMIT, DEFAULT_RADIUS_M};

fn required_city(args: &Value, tool: &str) -> Result<String, WayfinderError> {
    args.get("city")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| WayfinderError::Tool(format!("{tool} requires a \"city\" argument")))
}

fn u32_arg(args: &Value, name: &str, default: u32) -> u32 {
    args.get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

pub fn search_hotels_tool(finder: Arc<HotelFinder>) -> FunctionTool {
    FunctionTool::new(
        "search_hotels",
        "Search for hotel, hostel and apartment options around a city center. \
         Returns a JSON object with status and a list of hotels.",
        move |_ctx, args| {
            let finder = Arc::clone(&finder);
            async move {
                let city = required_city(&args, "search_hotels")?;
                let radius_m = u32_arg(&args, "radius_m", DEFAULT_RADIUS_M);
                let limit = u32_arg(&args, "limit", DEFAULT_LIMIT);
                let result = finder.search(&city, radius_m, limit).await;
                Ok(serde_json::to_value(result)?)
            }
        },
    )
    .with_parameters_schema(json!({
        "type": "object",
        "properties": {
            "city": { "type": "string", "description": "Destination city name" },
            "radius_m": {
                "type": "integer",
                "description": "Search radius around the city center in meters"
            },
            "limit": { "type": "integer", "description": "Maximum number of hotels" }
        },
        "required": ["city"]
    }))
}

pub fn search_activities_tool(finder: Arc<ActivityFinder>) -> FunctionTool {
    FunctionTool::new(
        "search_activities",
        "Search for activities and points of interest around a city. \
         Returns a JSON object with status and a list of activities.",
        move |_ctx, args| {
            let finder = Arc::clone(&finder);
            async move {
                let city = required_city(&args, "search_activities")?;
                let kinds = args
                    .get("kinds")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let radius_m = u32_arg(&args, "radius_m", DEFAULT_RADIUS_M);
                let limit = u32_arg(&args, "limit", DEFAULT_LIMIT);
                let result = finder.search(&city, kinds.as_deref(), radius_m, limit).await;
                Ok(serde_json::to_value(result)?)
            }
        },
    )
    .with_parameters_schema(json!({
        "type": "object",
        "properties": {
            "city": { "type": "string", "description": "Destination city name" },
            "kinds": {
                "type": "string",
                "description": "Comma-separated OpenTripMap kinds, e.g. \"cultural,historic\""
            },
            "radius_m": {
                "type": "integer",
                "description": "Search radius around the city center in meters"
            },
            "limit": { "type": "integer", "description": "Maximum number of activities" }
        },
        "required": ["city"]
    }))
}
