//! # wayfinder-tool
//!
//! Tool implementations for Wayfinder agents: [`FunctionTool`] wraps an
//! async closure, [`AgentTool`] wraps a whole agent as a callable tool so a
//! coordinator can delegate to specialists.

pub mod agent_tool;
pub mod function_tool;

pub use agent_tool::AgentTool;
pub use function_tool::FunctionTool;
