use std::collections::HashMap;
use std::sync::Arc;

use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use wayfinder_core::{
    Agent, Content, Event, EventStream, InvocationContext, Llm, LlmRequest, Part, ReadonlyContext,
    Result, Tool, ToolContext, WayfinderError,
};

/// Upper bound on model/tool round trips within one invocation. A
/// well-behaved travel request needs at most a handful.
const MAX_ITERATIONS: usize = 10;

pub struct LlmAgent {
    name: String,
    description: String,
    model: Arc<dyn Llm>,
    instruction: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
}

impl std::fmt::Debug for LlmAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmAgent")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("model", &self.model.name())
            .field("tools_count", &self.tools.len())
            .finish()
    }
}

pub struct LlmAgentBuilder {
    name: String,
    description: Option<String>,
    model: Option<Arc<dyn Llm>>,
    instruction: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
}

impl LlmAgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            model: None,
            instruction: None,
            tools: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn model(mut self, model: Arc<dyn Llm>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn build(self) -> Result<LlmAgent> {
        let model =
            self.model.ok_or_else(|| WayfinderError::Agent("Model is required".to_string()))?;

        Ok(LlmAgent {
            name: self.name,
            description: self.description.unwrap_or_default(),
            model,
            instruction: self.instruction,
            tools: self.tools,
        })
    }
}

// Per-call tool context: delegates identity to the invocation, carries the
// synthetic function call id.
struct ToolCallContext {
    parent_ctx: Arc<dyn InvocationContext>,
    function_call_id: String,
}

impl ReadonlyContext for ToolCallContext {
    fn invocation_id(&self) -> &str {
        self.parent_ctx.invocation_id()
    }

    fn agent_name(&self) -> &str {
        self.parent_ctx.agent_name()
    }

    fn user_id(&self) -> &str {
        self.parent_ctx.user_id()
    }

    fn app_name(&self) -> &str {
        self.parent_ctx.app_name()
    }

    fn session_id(&self) -> &str {
        self.parent_ctx.session_id()
    }

    fn user_content(&self) -> &Content {
        self.parent_ctx.user_content()
    }
}

impl ToolContext for ToolCallContext {
    fn function_call_id(&self) -> &str {
        &self.function_call_id
    }
}

#[async_trait]
impl Agent for LlmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, ctx: Arc<dyn InvocationContext>) -> Result<EventStream> {
        tracing::info!(agent = %self.name, invocation = %ctx.invocation_id(), "starting agent");

        let agent_name = self.name.clone();
        let invocation_id = ctx.invocation_id().to_string();
        let model = self.model.clone();
        let tools = self.tools.clone();
        let instruction = self.instruction.clone();

        let s = stream! {
            let mut conversation_history = Vec::new();

            // The instruction rides as the first user content, ahead of any
            // session history.
            if let Some(instruction) = instruction {
                if !instruction.is_empty() {
                    conversation_history.push(Content::new("user").with_text(instruction));
                }
            }

            conversation_history.extend(ctx.session().conversation_history());
            conversation_history.push(ctx.user_content().clone());

            // Function declarations advertised to the model.
            let mut tool_declarations = HashMap::new();
            for tool in &tools {
                let mut decl = serde_json::json!({
                    "name": tool.name(),
                    "description": tool.description(),
                });
                if let Some(params) = tool.parameters_schema() {
                    decl["parameters"] = params;
                }
                tool_declarations.insert(tool.name().to_string(), decl);
            }

            let mut iteration = 0;
            loop {
                iteration += 1;
                if iteration > MAX_ITERATIONS {
                    yield Err(WayfinderError::Agent(
                        format!("Max iterations ({}) exceeded", MAX_ITERATIONS)
                    ));
                    return;
                }

                let request = LlmRequest {
                    model: model.name().to_string(),
                    contents: conversation_history.clone(),
                    tools: tool_declarations.clone(),
                    config: None,
                };

                let mut response_stream = match model.generate_content(request).await {
                    Ok(s) => s,
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };

                // Drain the response stream into one accumulated content.
                let mut accumulated_content: Option<Content> = None;
                while let Some(chunk_result) = response_stream.next().await {
                    let chunk = match chunk_result {
                        Ok(c) => c,
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    };

                    let mut partial_event = Event::new(&invocation_id);
                    partial_event.author = agent_name.clone();
                    partial_event.llm_response = chunk.clone();
                    yield Ok(partial_event);

                    if let Some(chunk_content) = chunk.content {
                        match accumulated_content.as_mut() {
                            Some(acc) => acc.parts.extend(chunk_content.parts),
                            None => accumulated_content = Some(chunk_content),
                        }
                    }

                    if chunk.turn_complete {
                        break;
                    }
                }

                let Some(content) = accumulated_content else {
                    // Model returned nothing at all; end the turn.
                    return;
                };

                conversation_history.push(content.clone());

                if !content.has_function_calls() {
                    break;
                }

                for part in &content.parts {
                    let Part::FunctionCall { name, args } = part else {
                        continue;
                    };

                    tracing::info!(agent = %agent_name, tool = %name, "executing tool");

                    let tool_result = match tools.iter().find(|t| t.name() == name.as_str()) {
                        Some(tool) => {
                            let tool_ctx: Arc<dyn ToolContext> = Arc::new(ToolCallContext {
                                parent_ctx: ctx.clone(),
                                function_call_id: format!("{}_{}", invocation_id, name),
                            });
                            match tool.execute(tool_ctx, args.clone()).await {
                                Ok(result) => result,
                                Err(e) => {
                                    tracing::error!(tool = %name, error = %e, "tool failed");
                                    serde_json::json!({ "error": e.to_string() })
                                }
                            }
                        }
                        None => serde_json::json!({ "error": format!("Tool {} not found", name) }),
                    };

                    let function_content = Content {
                        role: "function".to_string(),
                        parts: vec![Part::FunctionResponse {
                            name: name.clone(),
                            response: tool_result,
                        }],
                    };

                    let mut tool_event = Event::new(&invocation_id);
                    tool_event.author = agent_name.clone();
                    tool_event.set_content(function_content.clone());
                    yield Ok(tool_event);

                    conversation_history.push(function_content);
                }
            }
        };

        Ok(Box::pin(s))
    }
}
