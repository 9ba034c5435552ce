//! Gemini client implementation over the `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wayfinder_core::{
    Content, FinishReason, Llm, LlmRequest, LlmResponse, LlmResponseStream, Part, Result,
    UsageMetadata, WayfinderError,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini `generateContent` REST API.
///
/// # Example
///
/// ```rust,ignore
/// use wayfinder_model::GeminiModel;
///
/// let model = GeminiModel::new(
///     std::env::var("GOOGLE_API_KEY").unwrap(),
///     "gemini-2.0-flash",
/// )?;
/// ```
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| WayfinderError::Model(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model_name: model.into(),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Point the client at a custom base URL (for testing with wiremock).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name
        )
    }

    fn build_request(request: &LlmRequest) -> GenerateContentRequest {
        let contents = request.contents.iter().map(content_to_wire).collect();

        let tools = if request.tools.is_empty() {
            None
        } else {
            let mut declarations: Vec<Value> = request.tools.values().cloned().collect();
            // Deterministic declaration order keeps requests reproducible.
            declarations.sort_by_key(|decl| {
                decl.get("name").and_then(Value::as_str).unwrap_or_default().to_string()
            });
            Some(vec![WireToolGroup { function_declarations: declarations }])
        };

        let generation_config = request.config.as_ref().map(|c| WireGenerationConfig {
            temperature: c.temperature,
            top_p: c.top_p,
            top_k: c.top_k,
            max_output_tokens: c.max_output_tokens,
        });

        GenerateContentRequest { contents, tools, generation_config }
    }

    fn convert_response(resp: GenerateContentResponse) -> LlmResponse {
        let candidate = resp.candidates.into_iter().next();

        let content = candidate.as_ref().and_then(|c| c.content.as_ref()).map(|wire| {
            let parts = wire
                .parts
                .iter()
                .filter_map(|p| {
                    if let Some(text) = &p.text {
                        Some(Part::Text { text: text.clone() })
                    } else if let Some(call) = &p.function_call {
                        Some(Part::FunctionCall { name: call.name.clone(), args: call.args.clone() })
                    } else {
                        p.function_response.as_ref().map(|fr| Part::FunctionResponse {
                            name: fr.name.clone(),
                            response: fr.response.clone(),
                        })
                    }
                })
                .collect();

            Content { role: "model".to_string(), parts }
        });

        let finish_reason =
            candidate.as_ref().and_then(|c| c.finish_reason.as_deref()).map(|fr| match fr {
                "STOP" => FinishReason::Stop,
                "MAX_TOKENS" => FinishReason::MaxTokens,
                "SAFETY" => FinishReason::Safety,
                _ => FinishReason::Other,
            });

        let usage_metadata = resp.usage_metadata.map(|u| UsageMetadata {
            prompt_token_count: u.prompt_token_count,
            candidates_token_count: u.candidates_token_count,
            total_token_count: u.total_token_count,
        });

        LlmResponse { content, usage_metadata, finish_reason, partial: false, turn_complete: true }
    }
}

#[async_trait]
impl Llm for GeminiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate_content(&self, request: LlmRequest) -> Result<LlmResponseStream> {
        let api_url = self.api_url();
        let body = Self::build_request(&request);

        tracing::debug!(model = %self.model_name, contents = request.contents.len(), "Gemini request");

        let response = self
            .client
            .post(&api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| WayfinderError::Model(format!("Gemini API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(WayfinderError::Model(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| WayfinderError::Model(format!("Failed to read response: {}", e)))?;

        let wire: GenerateContentResponse = serde_json::from_str(&response_text).map_err(|e| {
            WayfinderError::Model(format!("Failed to parse response: {} - {}", e, response_text))
        })?;

        let llm_response = Self::convert_response(wire);

        let stream = async_stream::stream! {
            yield Ok(llm_response);
        };

        Ok(Box::pin(stream))
    }
}

/// Map an internal content to the Gemini wire shape. Function responses are
/// carried under the `user` role, as the REST API expects.
fn content_to_wire(content: &Content) -> WireContent {
    let role = match content.role.as_str() {
        "model" => "model",
        _ => "user",
    };

    let parts = content
        .parts
        .iter()
        .map(|part| match part {
            Part::Text { text } => WirePart { text: Some(text.clone()), ..WirePart::default() },
            Part::FunctionCall { name, args } => WirePart {
                function_call: Some(WireFunctionCall { name: name.clone(), args: args.clone() }),
                ..WirePart::default()
            },
            Part::FunctionResponse { name, response } => WirePart {
                function_response: Some(WireFunctionResponse {
                    name: name.clone(),
                    response: response.clone(),
                }),
                ..WirePart::default()
            },
        })
        .collect();

    WireContent { role: Some(role.to_string()), parts }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireToolGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireToolGroup {
    function_declarations: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<i32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_response: Option<WireFunctionResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    usage_metadata: Option<WireUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    content: Option<WireContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUsageMetadata {
    #[serde(default)]
    prompt_token_count: i32,
    #[serde(default)]
    candidates_token_count: i32,
    #[serde(default)]
    total_token_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_role_maps_to_user_on_wire() {
        let content = Content {
            role: "function".to_string(),
            parts: vec![Part::FunctionResponse {
                name: "search_hotels".to_string(),
                response: json!({"status": "success", "hotels": []}),
            }],
        };

        let wire = content_to_wire(&content);
        assert_eq!(wire.role.as_deref(), Some("user"));
        assert_eq!(wire.parts[0].function_response.as_ref().unwrap().name, "search_hotels");
    }

    #[test]
    fn test_convert_response_with_function_call() {
        let wire: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"functionCall": {"name": "search_activities", "args": {"city": "Rome"}}}]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        }))
        .unwrap();

        let resp = GeminiModel::convert_response(wire);
        let content = resp.content.unwrap();
        assert!(matches!(
            &content.parts[0],
            Part::FunctionCall { name, .. } if name == "search_activities"
        ));
        assert_eq!(resp.finish_reason, Some(FinishReason::Stop));
        assert_eq!(resp.usage_metadata.unwrap().total_token_count, 15);
    }

    #[test]
    fn test_tool_declarations_sorted_by_name() {
        let mut request = LlmRequest::new("gemini-2.0-flash", vec![]);
        request.tools.insert("zeta".into(), json!({"name": "zeta"}));
        request.tools.insert("alpha".into(), json!({"name": "alpha"}));

        let wire = GeminiModel::build_request(&request);
        let groups = wire.tools.unwrap();
        let names: Vec<_> = groups[0]
            .function_declarations
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
