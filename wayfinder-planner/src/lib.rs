//! # wayfinder-planner
//!
//! Wires the travel finders, the Gemini model and the agent stack into a
//! coordinator that turns a free-form travel request into an itinerary.

pub mod agents;
pub mod tools;
