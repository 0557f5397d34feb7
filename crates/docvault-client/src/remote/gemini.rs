//! Content analysis through the Gemini `generateContent` HTTP API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::VaultConfig;
use crate::error::RemoteError;
use crate::ingest::{EncodedContent, FileMetadata};

use super::{AnalysisResult, ContentAnalyzer};

/// Instruction sent alongside every file.
pub const ANALYSIS_PROMPT: &str = "Analyze this document and provide a JSON response with:
1. A descriptive title for the document.
2. One suggested category from this list: [Personal ID, Health, Education, Finance, Employment, Legal, Other].
3. A concise 2-sentence summary of the document's content.
Respond strictly in JSON format.";

/// Calls the content-understanding service over HTTPS.
///
/// Without an API key every call fails with [`RemoteError::MissingApiKey`]
/// before touching the network.
#[derive(Debug, Clone)]
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiAnalyzer {
    pub fn new(config: &VaultConfig) -> Result<Self, RemoteError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.analysis_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

/// JSON body asking for a structured `{title, category, summary}` answer.
pub(crate) fn request_body(file: &FileMetadata, content: &EncodedContent) -> Value {
    json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": file.mime_type,
                        "data": content.payload(),
                    }
                },
                { "text": ANALYSIS_PROMPT },
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "category": { "type": "STRING" },
                    "summary": { "type": "STRING" },
                },
                "required": ["title", "category", "summary"],
            },
        },
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pull the structured answer out of a raw `generateContent` response body.
pub(crate) fn parse_response(body: &str) -> Result<AnalysisResult, RemoteError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| RemoteError::MalformedResponse(format!("response body: {e}")))?;

    let text = response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.text)
        .ok_or_else(|| RemoteError::MalformedResponse("no text part in response".into()))?;

    serde_json::from_str(&text)
        .map_err(|e| RemoteError::MalformedResponse(format!("analysis JSON: {e}")))
}

#[async_trait]
impl ContentAnalyzer for GeminiAnalyzer {
    async fn analyze(
        &self,
        file: &FileMetadata,
        content: &EncodedContent,
    ) -> Result<AnalysisResult, RemoteError> {
        let api_key = self.api_key.as_deref().ok_or(RemoteError::MissingApiKey)?;

        debug!(file_name = %file.name, model = %self.model, "Requesting content analysis");

        let resp = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", api_key)
            .json(&request_body(file, content))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}
