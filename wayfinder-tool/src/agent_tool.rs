//! AgentTool - Use agents as callable tools
//!
//! Wraps an [`Agent`] so a coordinator agent can invoke it through the
//! normal function-calling path. The wrapped agent runs on an isolated
//! invocation with its own empty session; its final text response becomes
//! the tool result.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};
use std::sync::Arc;

use wayfinder_core::{
    Agent, Content, Event, InvocationContext, ReadonlyContext, Result, Session, Tool, ToolContext,
};

pub struct AgentTool {
    agent: Arc<dyn Agent>,
}

impl AgentTool {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    fn default_parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "request": {
                    "type": "string",
                    "description": format!("The request to send to the {} agent", self.agent.name())
                }
            },
            "required": ["request"]
        })
    }

    /// Pull the request text out of the tool arguments. Falls back to the
    /// serialized arguments so a malformed call still reaches the sub-agent.
    fn extract_request(args: &Value) -> String {
        if let Some(request) = args.get("request").and_then(|v| v.as_str()) {
            return request.to_string();
        }
        match args {
            Value::String(s) => s.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }

    /// The last final response's text, or a fixed fallback when the
    /// sub-agent produced none.
    fn extract_response(events: &[Event]) -> Value {
        for event in events.iter().rev() {
            if event.is_final_response() {
                if let Some(content) = event.content() {
                    return json!({ "response": content.joined_text() });
                }
            }
        }
        json!({ "response": "No response from agent" })
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        self.agent.name()
    }

    fn description(&self) -> &str {
        self.agent.description()
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(self.default_parameters_schema())
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
        tracing::debug!(agent = %self.agent.name(), "executing agent tool");

        let request_text = Self::extract_request(&args);
        let user_content = Content::new("user").with_text(&request_text);

        let sub_ctx = Arc::new(AgentToolInvocationContext::new(
            ctx.clone(),
            self.agent.clone(),
            user_content,
        ));

        let mut event_stream = match self.agent.run(sub_ctx).await {
            Ok(s) => s,
            Err(e) => {
                return Ok(json!({
                    "error": format!("Agent execution failed: {}", e),
                    "agent": self.agent.name()
                }));
            }
        };

        let mut events = Vec::new();
        while let Some(result) = event_stream.next().await {
            match result {
                Ok(event) => events.push(event),
                Err(e) => {
                    tracing::error!(agent = %self.agent.name(), error = %e, "sub-agent failed");
                    return Ok(json!({
                        "error": format!("Agent execution failed: {}", e),
                        "agent": self.agent.name()
                    }));
                }
            }
        }

        tracing::debug!(agent = %self.agent.name(), events = events.len(), "agent tool completed");
        Ok(Self::extract_response(&events))
    }
}

// Isolated invocation for the sub-agent: fresh invocation id and an empty
// session, with user/app identity delegated to the parent.
struct AgentToolInvocationContext {
    parent_ctx: Arc<dyn ToolContext>,
    agent: Arc<dyn Agent>,
    user_content: Content,
    invocation_id: String,
    session: EmptySession,
}

impl AgentToolInvocationContext {
    fn new(parent_ctx: Arc<dyn ToolContext>, agent: Arc<dyn Agent>, user_content: Content) -> Self {
        let invocation_id = format!("agent-tool-{}", uuid::Uuid::new_v4());
        let session = EmptySession { id: invocation_id.clone() };
        Self { parent_ctx, agent, user_content, invocation_id, session }
    }
}

impl ReadonlyContext for AgentToolInvocationContext {
    fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    fn agent_name(&self) -> &str {
        self.agent.name()
    }

    fn user_id(&self) -> &str {
        self.parent_ctx.user_id()
    }

    fn app_name(&self) -> &str {
        self.parent_ctx.app_name()
    }

    fn session_id(&self) -> &str {
        &self.invocation_id
    }

    fn user_content(&self) -> &Content {
        &self.user_content
    }
}

impl InvocationContext for AgentToolInvocationContext {
    fn session(&self) -> &dyn Session {
        &self.session
    }
}

struct EmptySession {
    id: String,
}

impl Session for EmptySession {
    fn id(&self) -> &str {
        &self.id
    }

    fn app_name(&self) -> &str {
        "agent-tool"
    }

    fn user_id(&self) -> &str {
        "agent-tool-user"
    }

    fn conversation_history(&self) -> Vec<Content> {
        Vec::new()
    }
}
