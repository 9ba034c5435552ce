//! # wayfinder-agent
//!
//! [`LlmAgent`]: an instruction-driven agent that calls its model in a loop,
//! executing any requested tools and feeding their results back until the
//! model produces a plain-text answer.

pub mod llm_agent;

pub use llm_agent::{LlmAgent, LlmAgentBuilder};
