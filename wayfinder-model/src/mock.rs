use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use wayfinder_core::{Llm, LlmRequest, LlmResponse, LlmResponseStream, Result, WayfinderError};

/// Scripted model for tests. Each `generate_content` call pops the next
/// queued response, so a function-call turn followed by a text turn can be
/// exercised without a live model.
pub struct MockLlm {
    name: String,
    responses: Mutex<VecDeque<LlmResponse>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), responses: Mutex::new(VecDeque::new()) }
    }

    pub fn with_response(self, response: LlmResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_content(&self, _req: LlmRequest) -> Result<LlmResponseStream> {
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| WayfinderError::Model("MockLlm has no responses queued".to_string()))?;

        let stream = async_stream::stream! {
            yield Ok(response);
        };
        Ok(Box::pin(stream))
    }
}
