use std::fmt;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{ChatMessage, ChatRequest, ChatResponse};
use crate::core::constants::{MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE};
use crate::core::message::Message;
use crate::utils::url::construct_api_url;

/// Why a turn produced no assistant reply.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionError {
    /// The request never produced an HTTP response.
    Transport(String),
    /// The service answered with a non-success status.
    Status { status: u16, body: String },
    /// The body was not a chat completion payload.
    Malformed(String),
    /// The payload held no usable choice.
    Empty,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Transport(message) => write!(f, "request failed: {message}"),
            CompletionError::Status { status, body } => {
                write!(f, "service returned {status}: {}", summarize_error_body(body))
            }
            CompletionError::Malformed(message) => write!(f, "malformed response: {message}"),
            CompletionError::Empty => write!(f, "response contained no reply"),
        }
    }
}

impl std::error::Error for CompletionError {}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| extract_error_summary(&value))
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| trimmed.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Assemble the request body: persona, prior turns, then the new user turn.
pub fn build_request(model: &str, history: &[Message], new_user_text: &str) -> ChatRequest {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::new("system", SYSTEM_PROMPT));
    messages.extend(
        history
            .iter()
            .map(|message| ChatMessage::new(message.sender.to_api_role(), message.text.clone())),
    );
    messages.push(ChatMessage::new("user", new_user_text));

    ChatRequest {
        model: model.to_string(),
        messages,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

/// Pull the first choice's trimmed content out of a response body.
pub fn extract_reply(body: &str) -> Result<String, CompletionError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|err| CompletionError::Malformed(err.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::Empty)?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CompletionError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Send one completion request and wait for the whole reply.
pub async fn request_completion(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    request: &ChatRequest,
) -> Result<String, CompletionError> {
    let url = construct_api_url(base_url, "chat/completions");
    debug!(%url, model = %request.model, turns = request.messages.len(), "sending completion request");

    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {api_key}"))
        .json(request)
        .send()
        .await
        .map_err(|err| CompletionError::Transport(err.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| CompletionError::Transport(err.to_string()))?;

    if !status.is_success() {
        return Err(CompletionError::Status {
            status: status.as_u16(),
            body,
        });
    }

    extract_reply(&body)
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompletionMessage {
    Reply(String),
    Failed(CompletionError),
}

pub struct CompletionParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub api_key: String,
    pub request: ChatRequest,
    pub cancel_token: CancellationToken,
    pub request_id: u64,
}

/// Runs completion requests off the UI loop and reports back over a channel.
#[derive(Clone)]
pub struct CompletionService {
    tx: mpsc::UnboundedSender<(CompletionMessage, u64)>,
}

impl CompletionService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(CompletionMessage, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_request(&self, params: CompletionParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let CompletionParams {
                client,
                base_url,
                api_key,
                request,
                cancel_token,
                request_id,
            } = params;

            tokio::select! {
                result = request_completion(&client, &base_url, &api_key, &request) => {
                    let message = match result {
                        Ok(text) => CompletionMessage::Reply(text),
                        Err(err) => CompletionMessage::Failed(err),
                    };
                    let _ = tx.send((message, request_id));
                }
                _ = cancel_token.cancelled() => {
                    debug!(request_id, "completion request cancelled");
                }
            }
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, message: CompletionMessage, request_id: u64) {
        let _ = self.tx.send((message, request_id));
    }
}
