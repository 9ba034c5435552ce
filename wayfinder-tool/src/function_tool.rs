use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use wayfinder_core::{Result, Tool, ToolContext};

type AsyncHandler = Box<
    dyn Fn(Arc<dyn ToolContext>, Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>>
        + Send
        + Sync,
>;

/// A [`Tool`] backed by an async closure.
pub struct FunctionTool {
    name: String,
    description: String,
    handler: AsyncHandler,
    parameters_schema: Option<Value>,
}

impl FunctionTool {
    pub fn new<F, Fut>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Arc<dyn ToolContext>, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            handler: Box::new(move |ctx, args| Box::pin(handler(ctx, args))),
            parameters_schema: None,
        }
    }

    /// Attach a JSON schema describing the tool's arguments.
    #[must_use]
    pub fn with_parameters_schema(mut self, schema: Value) -> Self {
        self.parameters_schema = Some(schema);
        self
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Option<Value> {
        self.parameters_schema.clone()
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
        (self.handler)(ctx, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_tool::test_support::StubToolContext;
    use serde_json::json;

    #[tokio::test]
    async fn test_function_tool_executes_handler() {
        let tool = FunctionTool::new("double", "doubles a number", |_ctx, args| async move {
            let n = args["n"].as_f64().unwrap_or(0.0);
            Ok(json!({"result": n * 2.0}))
        })
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {"n": {"type": "number"}},
            "required": ["n"]
        }));

        assert_eq!(tool.name(), "double");
        assert!(tool.parameters_schema().is_some());

        let ctx = Arc::new(StubToolContext::new()) as Arc<dyn ToolContext>;
        let result = tool.execute(ctx, json!({"n": 21})).await.unwrap();
        assert_eq!(result["result"], 42.0);
    }
}
