use crate::types::Content;

/// Read-only view of the current invocation, available to agents and tools.
pub trait ReadonlyContext: Send + Sync {
    fn invocation_id(&self) -> &str;
    fn agent_name(&self) -> &str;
    fn user_id(&self) -> &str;
    fn app_name(&self) -> &str;
    fn session_id(&self) -> &str;
    fn user_content(&self) -> &Content;
}

/// Full invocation context handed to [`crate::Agent::run`].
pub trait InvocationContext: ReadonlyContext {
    fn session(&self) -> &dyn Session;
}

/// A conversation session. Histories are replayed into the next model
/// request so agents see prior turns.
pub trait Session: Send + Sync {
    fn id(&self) -> &str;
    fn app_name(&self) -> &str;
    fn user_id(&self) -> &str;
    fn conversation_history(&self) -> Vec<Content>;
}
