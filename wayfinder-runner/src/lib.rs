//! # wayfinder-runner
//!
//! [`Runner`] drives an agent against a session: it records the user turn,
//! streams the agent's events while appending them to the session, and
//! replays conversation history on later turns.

pub mod context;
pub mod runner;
pub mod session;

pub use context::RunnerInvocationContext;
pub use runner::{Runner, RunnerConfig};
pub use session::{CreateRequest, GetRequest, InMemorySessionService, SessionService};
