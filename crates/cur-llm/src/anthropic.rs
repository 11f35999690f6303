//! Anthropic messages API backend.

use serde::{Deserialize, Serialize};

use crate::{CompletionRequest, LlmClient, error::LlmError, http::check_response};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl LlmClient {
    pub(crate) async fn complete_anthropic(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: self.model(),
            max_tokens: self.effective_max_tokens(request),
            temperature: self.effective_temperature(request),
            system: request.system.as_deref(),
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let resp = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let data: MessagesResponse = resp.json().await?;
        extract_text(&data)
    }
}

fn extract_text(response: &MessagesResponse) -> Result<String, LlmError> {
    response
        .content
        .iter()
        .find(|block| block.kind == "text")
        .map(|block| block.text.clone())
        .ok_or_else(|| LlmError::Parse("anthropic response contained no text block".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "id": "msg_01XFDUDYJgAACzvnptvVoYEL",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-5-20250929",
        "content": [
            {"type": "text", "text": "Here is the idea."}
        ],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 10, "output_tokens": 25}
    }"#;

    #[test]
    fn parse_messages_response() {
        let data: MessagesResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(extract_text(&data).unwrap(), "Here is the idea.");
    }

    #[test]
    fn response_without_text_block_is_parse_error() {
        let data: MessagesResponse =
            serde_json::from_str(r#"{"content": [{"type": "tool_use"}]}"#).unwrap();
        let err = extract_text(&data).unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[test]
    fn request_serializes_expected_wire_shape() {
        let body = MessagesRequest {
            model: "claude-sonnet-4-5-20250929",
            max_tokens: 2048,
            temperature: 0.8,
            system: Some("You are an architect."),
            messages: vec![Message {
                role: "user",
                content: "Generate an idea.",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-sonnet-4-5-20250929");
        assert_eq!(json["max_tokens"], 2048);
        assert_eq!(json["system"], "You are an architect.");
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn request_omits_absent_system_prompt() {
        let body = MessagesRequest {
            model: "m",
            max_tokens: 16,
            temperature: 0.0,
            system: None,
            messages: vec![],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("system").is_none());
    }
}
