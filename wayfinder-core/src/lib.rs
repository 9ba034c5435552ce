//! # wayfinder-core
//!
//! Core traits and types for the Wayfinder travel-planning agents.
//!
//! This crate provides the foundational abstractions shared by the rest of
//! the workspace:
//!
//! - [`Agent`] - The fundamental trait for all agents
//! - [`Tool`] - For extending agents with callable capabilities
//! - [`Llm`] - The model interface ([`LlmRequest`] / [`LlmResponse`])
//! - [`Event`] - For streaming agent responses
//! - [`WayfinderError`] / [`Result`] - Unified error handling

pub mod agent;
pub mod context;
pub mod error;
pub mod event;
pub mod model;
pub mod tool;
pub mod types;

pub use agent::{Agent, EventStream};
pub use context::{InvocationContext, ReadonlyContext, Session};
pub use error::{Result, WayfinderError};
pub use event::Event;
pub use model::{
    FinishReason, GenerateContentConfig, Llm, LlmRequest, LlmResponse, LlmResponseStream,
    UsageMetadata,
};
pub use tool::{Tool, ToolContext};
pub use types::{Content, Part};
