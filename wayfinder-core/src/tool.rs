use crate::{context::ReadonlyContext, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// JSON schema describing the tool's arguments, forwarded to the model
    /// as part of the function declaration.
    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value>;
}

pub trait ToolContext: ReadonlyContext {
    fn function_call_id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Content;

    struct EchoTool;

    struct TestContext {
        content: Content,
    }

    impl ReadonlyContext for TestContext {
        fn invocation_id(&self) -> &str {
            "inv-test"
        }
        fn agent_name(&self) -> &str {
            "test"
        }
        fn user_id(&self) -> &str {
            "user"
        }
        fn app_name(&self) -> &str {
            "app"
        }
        fn session_id(&self) -> &str {
            "session"
        }
        fn user_content(&self) -> &Content {
            &self.content
        }
    }

    impl ToolContext for TestContext {
        fn function_call_id(&self) -> &str {
            "call-123"
        }
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "echoes its arguments"
        }

        async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
            Ok(args)
        }
    }

    #[test]
    fn test_tool_trait() {
        let tool = EchoTool;
        assert_eq!(tool.name(), "echo");
        assert!(tool.parameters_schema().is_none());
    }

    #[tokio::test]
    async fn test_tool_execute() {
        let tool = EchoTool;
        let ctx = Arc::new(TestContext { content: Content::new("user") }) as Arc<dyn ToolContext>;
        let args = serde_json::json!({"city": "Lisbon"});
        let result = tool.execute(ctx, args.clone()).await.unwrap();
        assert_eq!(result, args);
    }
}
