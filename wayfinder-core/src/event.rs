use crate::model::LlmResponse;
use crate::types::{Content, Part};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event represents a single interaction in a conversation: the user turn, a
/// model response, or a tool execution result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub invocation_id: String,
    pub author: String,
    /// The LLM response containing content and metadata.
    /// Access content via `event.llm_response.content`.
    #[serde(flatten)]
    pub llm_response: LlmResponse,
}

impl Event {
    pub fn new(invocation_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            invocation_id: invocation_id.into(),
            author: String::new(),
            llm_response: LlmResponse::default(),
        }
    }

    /// Convenience method to access content directly.
    pub fn content(&self) -> Option<&Content> {
        self.llm_response.content.as_ref()
    }

    /// Convenience method to set content directly.
    pub fn set_content(&mut self, content: Content) {
        self.llm_response.content = Some(content);
    }

    /// True when this event carries a displayable final answer: a complete,
    /// non-partial response with at least one text part and no pending
    /// function call or function response.
    pub fn is_final_response(&self) -> bool {
        if self.llm_response.partial {
            return false;
        }
        match self.content() {
            Some(content) => {
                !content.parts.is_empty()
                    && content
                        .parts
                        .iter()
                        .all(|p| matches!(p, Part::Text { .. }))
            }
            None => false,
        }
    }
}
