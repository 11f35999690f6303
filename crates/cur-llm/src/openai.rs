//! OpenAI chat completions API backend.

use serde::{Deserialize, Serialize};

use crate::{CompletionRequest, LlmClient, error::LlmError, http::check_response};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl LlmClient {
    pub(crate) async fn complete_openai(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let body = ChatRequest {
            model: self.model(),
            max_tokens: self.effective_max_tokens(request),
            temperature: self.effective_temperature(request),
            messages,
        };

        let resp = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let data: ChatResponse = resp.json().await?;
        extract_text(data)
    }
}

fn extract_text(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::Parse("openai response contained no message content".to_string()))
}
