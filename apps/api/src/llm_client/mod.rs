/// LLM client. The single point of entry for all CLOVA Studio calls.
///
/// No other module may call the completion endpoints directly.
/// Two endpoint flavours are supported:
/// - `chat`: HCX-007 v3 chat completions (content sent as text blocks)
/// - `complete_task`: tuned v2 task completions (content sent as plain strings)
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub mod prompts;

const REQUEST_ID_HEADER: &str = "X-NCP-CLOVASTUDIO-REQUEST-ID";
/// Model label recorded on generated artifacts.
pub const MODEL: &str = "HCX-007";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Request bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TextBlock<'a> {
    #[serde(rename = "type")]
    block_type: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<TextBlock<'a>>,
}

fn text_block(text: &str) -> Vec<TextBlock<'_>> {
    vec![TextBlock {
        block_type: "text",
        text,
    }]
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    top_p: f64,
    top_k: u32,
    max_completion_tokens: u32,
    temperature: f64,
    repetition_penalty: f64,
    seed: u32,
    include_ai_filters: bool,
}

impl<'a> ChatRequest<'a> {
    fn new(system: &'a str, prompt: &'a str) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: text_block(system),
                },
                ChatMessage {
                    role: "user",
                    content: text_block(prompt),
                },
            ],
            top_p: 0.8,
            top_k: 0,
            max_completion_tokens: 2000,
            temperature: 0.7,
            repetition_penalty: 1.1,
            seed: 42,
            include_ai_filters: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct TaskMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskRequest<'a> {
    messages: Vec<TaskMessage<'a>>,
    top_p: f64,
    top_k: u32,
    max_tokens: u32,
    temperature: f64,
    repeat_penalty: f64,
    stop_before: Vec<&'a str>,
    seed: u32,
    include_ai_filters: bool,
}

impl<'a> TaskRequest<'a> {
    fn new(system: &'a str, prompt: &'a str) -> Self {
        Self {
            messages: vec![
                TaskMessage {
                    role: "system",
                    content: system,
                },
                TaskMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            top_p: 0.8,
            top_k: 0,
            max_tokens: 256,
            temperature: 0.5,
            repeat_penalty: 1.1,
            stop_before: vec![],
            seed: 0,
            include_ai_filters: true,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub result: Option<CompletionResult>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResult {
    pub message: Option<ResultMessage>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResultMessage {
    pub content: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

impl CompletionResponse {
    /// Extracts the generated text, trimmed.
    /// Looks at `result.message.content` (string or text blocks), then
    /// `result.text`, then the top-level `text`.
    pub fn text(&self) -> Option<String> {
        let from_message = self
            .result
            .as_ref()
            .and_then(|r| r.message.as_ref())
            .and_then(|m| m.content.as_ref())
            .map(|content| match content {
                MessageContent::Text(text) => text.clone(),
                MessageContent::Blocks(blocks) => blocks
                    .iter()
                    .filter(|b| b.block_type == "text")
                    .filter_map(|b| b.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("\n"),
            });

        from_message
            .or_else(|| self.result.as_ref().and_then(|r| r.text.clone()))
            .or_else(|| self.text.clone())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ClovaError {
    status: ClovaErrorStatus,
}

#[derive(Debug, Deserialize)]
struct ClovaErrorStatus {
    message: String,
}

/// The single LLM client used by all services.
/// Wraps the CLOVA Studio completion APIs with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    chat_endpoint: String,
    task_endpoint: String,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        chat_endpoint: String,
        task_endpoint: String,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
            chat_endpoint,
            task_endpoint,
        })
    }

    /// Narrative completion via the HCX-007 chat endpoint.
    pub async fn chat(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let body = ChatRequest::new(system, prompt);
        let response = self.send(&self.chat_endpoint, &body).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }

    /// Short completion via the tuned generation task endpoint.
    pub async fn complete_task(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let body = TaskRequest::new(system, prompt);
        let response = self.send(&self.task_endpoint, &body).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }

    /// Posts `body` to `url`, retrying 429 and 5xx with exponential backoff.
    async fn send<B: Serialize>(&self, url: &str, body: &B) -> Result<CompletionResponse, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(url)
                .bearer_auth(&self.api_key)
                .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
                .header("content-type", "application/json")
                .header("accept", "application/json")
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
            }

            let completion: CompletionResponse = response.json().await?;
            debug!("LLM call to {url} succeeded");
            return Ok(completion);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Pulls `status.message` out of a CLOVA error body, or returns the body unchanged.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ClovaError>(&body)
        .map(|e| e.status.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CompletionResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_from_string_content() {
        let response = parse(json!({
            "result": {"message": {"role": "assistant", "content": "  Data Scientist.\n"}}
        }));
        assert_eq!(response.text().as_deref(), Some("Data Scientist."));
    }

    #[test]
    fn test_text_from_block_content_joins_text_blocks() {
        let response = parse(json!({
            "result": {"message": {"content": [
                {"type": "text", "text": "First paragraph"},
                {"type": "image", "text": "ignored"},
                {"type": "text", "text": "Second paragraph"}
            ]}}
        }));
        assert_eq!(
            response.text().as_deref(),
            Some("First paragraph\nSecond paragraph")
        );
    }

    #[test]
    fn test_text_falls_back_to_result_text_then_top_level() {
        let response = parse(json!({"result": {"text": "Cloud Architect"}}));
        assert_eq!(response.text().as_deref(), Some("Cloud Architect"));

        let response = parse(json!({"text": "Backend Developer"}));
        assert_eq!(response.text().as_deref(), Some("Backend Developer"));
    }

    #[test]
    fn test_blank_text_is_none() {
        let response = parse(json!({"result": {"message": {"content": "   "}}}));
        assert!(response.text().is_none());
    }

    #[test]
    fn test_chat_request_uses_text_blocks() {
        let body = serde_json::to_value(ChatRequest::new("sys", "hello")).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"][0]["type"], "text");
        assert_eq!(body["messages"][1]["content"][0]["text"], "hello");
        assert_eq!(body["maxCompletionTokens"], 2000);
        assert_eq!(body["seed"], 42);
        assert_eq!(body["includeAiFilters"], true);
    }

    #[test]
    fn test_task_request_uses_plain_content() {
        let body = serde_json::to_value(TaskRequest::new("speak in English", "skills")).unwrap();
        assert_eq!(body["messages"][0]["content"], "speak in English");
        assert_eq!(body["maxTokens"], 256);
        assert_eq!(body["repeatPenalty"], 1.1);
        assert_eq!(body["stopBefore"], json!([]));
    }

    #[test]
    fn test_api_error_message_extracts_status_message() {
        let body = r#"{"status": {"code": "40101", "message": "Invalid API key"}}"#.to_string();
        assert_eq!(api_error_message(body), "Invalid API key");
        assert_eq!(api_error_message("plain".to_string()), "plain");
    }
}
