//! LLM gateway over an OpenAI-compatible chat-completions API.
//!
//! Two operations, mirroring the two prompt templates the assistant
//! uses: [`LlmClient::answer`] embeds retrieved knowledge-base context
//! into a question prompt, and [`LlmClient::summarize`] wraps extracted
//! document or transcript text with a free-text summary-kind label.
//!
//! Failures are typed ([`LlmError`]) instead of sentinel-prefixed reply
//! strings, so callers branch on the error, not on a marker character.
//! Calls are single-shot: no retry, no backoff — a failed completion
//! surfaces immediately.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("API key not set. Export {0}=<your-key>")]
    MissingApiKey(String),
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("completion response carried no content")]
    EmptyCompletion,
}

/// Client for the configured completion endpoint.
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    chat_model: String,
    summary_model: String,
    temperature: f32,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| LlmError::MissingApiKey(config.api_key_env.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chat_model: config.chat_model.clone(),
            summary_model: config.summary_model.clone(),
            temperature: config.temperature,
            api_key,
        })
    }

    /// Test constructor pointing at an arbitrary endpoint with a fixed key.
    #[cfg(test)]
    fn with_endpoint(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_model: "test-chat".to_string(),
            summary_model: "test-summary".to_string(),
            temperature: 0.2,
            api_key: "test-key".to_string(),
        }
    }

    /// Answer a legal question grounded in the given context block.
    pub async fn answer(&self, question: &str, context: &str) -> Result<String, LlmError> {
        let prompt = format!(
            "Você é uma assistente jurídica virtual. Use o contexto abaixo para responder à pergunta.\n\
             Contexto:\n{context}\n\n\
             Pergunta do usuário: {question}\n\
             Responda de forma clara, objetiva e educada."
        );
        self.complete(&self.chat_model, &prompt, None).await
    }

    /// Produce a structured Portuguese summary of `text`. `kind` is a
    /// free-text label ("resumo de documento jurídico", ...) upper-cased
    /// into the prompt.
    pub async fn summarize(&self, text: &str, kind: &str) -> Result<String, LlmError> {
        let prompt = format!(
            "Você é uma IA jurídica experiente. Sua tarefa é analisar o seguinte conteúdo\n\
             e produzir um resumo ou resposta clara e estruturada em português, de acordo\n\
             com o tipo solicitado: {}.\n\n\
             Conteúdo:\n{}",
            kind.to_uppercase(),
            text
        );
        self.complete(&self.summary_model, &prompt, Some(self.temperature))
            .await
    }

    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "completion request rejected");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::EmptyCompletion)?;

        Ok(content)
    }
}
