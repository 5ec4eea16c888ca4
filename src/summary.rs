//! Transcript summarization via a chat-completion API.
//!
//! Single-shot request/response: one authorized POST, no polling, no retry.
//! The prompt turns a raw transcript into a reflective journal entry.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary used when the recording contained no recognizable speech. The
/// API is not called for empty transcripts.
pub const EMPTY_TRANSCRIPT_SUMMARY: &str = "Nothing was said in this recording.";

const NO_SUMMARY_FALLBACK: &str = "No summary generated.";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
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
    message: ChatMessageBody,
}

#[derive(Deserialize)]
struct ChatMessageBody {
    content: String,
}

/// Client for the chat-completion summarization endpoint.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl SummaryClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: 512,
            temperature: 0.8,
        }
    }

    pub fn with_limits(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    fn build_prompt(transcript: &str) -> String {
        format!(
            "You are a journaling assistant. Turn this transcript into a reflective, \
             emotionally intelligent journal entry.\n\n\
             Transcript:\n{}\n\n\
             Return Format:\n\
             - Journal Title\n\
             - Entry Text\n\
             - Emotions Detected\n\
             - Tags\n",
            transcript
        )
    }

    /// Summarize one transcript. Empty transcripts short-circuit to a fixed
    /// summary without touching the network.
    pub async fn summarize(&self, transcript: &str) -> Result<String> {
        if transcript.trim().is_empty() {
            return Ok(EMPTY_TRANSCRIPT_SUMMARY.to_string());
        }

        let url = format!(
            "{}/chat/completions",
            self.base_url.trim_end_matches('/')
        );
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::build_prompt(transcript),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Summary request failed")?;

        if !res.status().is_success() {
            let status = res.status();
            let detail = res.text().await.unwrap_or_default();
            anyhow::bail!("Summary API error {}: {}", status, detail);
        }

        let parsed: ChatResponse = res.json().await.context("Summary response parse failed")?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_SUMMARY_FALLBACK.to_string()))
    }
}
