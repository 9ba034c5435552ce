//! # wayfinder-model
//!
//! Model integrations for Wayfinder agents.
//!
//! [`GeminiModel`] talks to the Gemini `generateContent` REST endpoint with
//! function-calling support. [`MockLlm`] scripts canned responses for tests.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiModel;
pub use mock::MockLlm;
