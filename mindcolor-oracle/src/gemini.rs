//! Google Gemini oracle.
//!
//! Calls `generateContent` with a system instruction and a response
//! schema so the model answers in the analysis JSON shape directly.
//!
//! Authentication: explicit API key, or the `GEMINI_API_KEY` /
//! `GOOGLE_API_KEY` environment variables.

use async_trait::async_trait;
use mindcolor_core::{AnalysisResult, UserInput};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

use crate::prompt;
use crate::{Oracle, OracleError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini-backed analysis oracle.
pub struct GeminiOracle {
    api_key: Option<String>,
    model: String,
    temperature: f64,
    base_url: String,
    client: Client,
}

// ══════════════════════════════════════════════════════════════════════════════
// API REQUEST/RESPONSE TYPES
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: i64,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: Option<i64>,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: Option<i64>,
}

impl GeminiOracle {
    /// Create a new Gemini oracle.
    ///
    /// Authentication priority:
    /// 1. Explicit API key passed in
    /// 2. `GEMINI_API_KEY` environment variable
    /// 3. `GOOGLE_API_KEY` environment variable
    pub fn new(api_key: Option<&str>, model: impl Into<String>, temperature: f64) -> Self {
        let resolved_key = api_key
            .map(String::from)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            model: model.into(),
            temperature,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Override the API base URL (used by tests against a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn error(&self, message: impl Into<String>, status_code: Option<u16>) -> OracleError {
        OracleError {
            oracle: "gemini".into(),
            model: self.model.clone(),
            message: message.into(),
            status_code,
        }
    }

    /// Response schema mirroring `AnalysisResult`, in the API's
    /// OpenAPI-subset schema language.
    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "introduction": {"type": "STRING"},
                "mainColorDescription": {"type": "STRING"},
                "mainColorHex": {"type": "STRING"},
                "indicators": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": {"type": "STRING"},
                            "value": {"type": "STRING"},
                            "colorHex": {"type": "STRING"},
                            "number": {"type": "INTEGER"}
                        },
                        "required": ["title", "value"]
                    }
                },
                "fullReading": {"type": "STRING"},
                "blessing": {"type": "STRING"}
            },
            "required": [
                "introduction",
                "mainColorDescription",
                "mainColorHex",
                "indicators",
                "fullReading",
                "blessing"
            ]
        })
    }
}

/// Strip a Markdown code fence if the model wrapped its JSON in one.
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(fenced) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let body = match fenced.split_once('\n') {
        Some((_, rest)) => rest,
        None => fenced,
    };
    body.trim_end().trim_end_matches("```").trim()
}

#[async_trait]
impl Oracle for GeminiOracle {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze(&self, input: &UserInput) -> Result<AnalysisResult, OracleError> {
        let start = Instant::now();

        let api_key = self.api_key.as_ref().ok_or_else(|| {
            self.error(
                "Gemini API key not found. Set GEMINI_API_KEY or add it to secrets.json.",
                None,
            )
        })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: prompt::user_prompt(input),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: prompt::system_instruction(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: 8192,
                response_mime_type: "application/json",
                response_schema: Self::response_schema(),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.error(format!("Request failed: {e}"), None))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.error(
                format!("API error ({}): {}", status.as_u16(), error_text),
                Some(status.as_u16()),
            ));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| self.error(format!("Failed to parse response: {e}"), None))?;

        // Check for API error in response body
        if let Some(err) = result.error {
            return Err(self.error(format!("API error: {}", err.message), None));
        }

        if let Some(usage) = &result.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "Gemini usage"
            );
        }

        let candidate = result
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| self.error("No response from Gemini", None))?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .next()
            .and_then(|p| p.text)
            .unwrap_or_default();

        let analysis: AnalysisResult = serde_json::from_str(extract_json(&text))
            .map_err(|e| self.error(format!("Malformed analysis payload: {e}"), None))?;

        tracing::info!(
            latency_ms = start.elapsed().as_millis() as u64,
            indicators = analysis.indicators.len(),
            "Analysis generated"
        );

        Ok(analysis)
    }
}
