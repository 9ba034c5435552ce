use wayfinder_core::{Content, InvocationContext, ReadonlyContext, Session};

/// Invocation context assembled by the [`Runner`](crate::Runner) for a single
/// user turn. Owns a snapshot of the session taken before the agent runs.
pub struct RunnerInvocationContext {
    invocation_id: String,
    agent_name: String,
    user_id: String,
    app_name: String,
    session_id: String,
    user_content: Content,
    session: Box<dyn Session>,
}

impl RunnerInvocationContext {
    pub fn new(
        invocation_id: impl Into<String>,
        agent_name: impl Into<String>,
        user_content: Content,
        session: Box<dyn Session>,
    ) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            agent_name: agent_name.into(),
            user_id: session.user_id().to_string(),
            app_name: session.app_name().to_string(),
            session_id: session.id().to_string(),
            user_content,
            session,
        }
    }
}

impl ReadonlyContext for RunnerInvocationContext {
    fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    fn agent_name(&self) -> &str {
        &self.agent_name
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn user_content(&self) -> &Content {
        &self.user_content
    }
}

impl InvocationContext for RunnerInvocationContext {
    fn session(&self) -> &dyn Session {
        self.session.as_ref()
    }
}
