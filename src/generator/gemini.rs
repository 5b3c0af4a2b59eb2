use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::AttemptError;

use super::{GenerateRequest, Generator, ToolDescriptor};

/// A generator that calls the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: api_key.into(),
        }
    }

    /// Point at a different host (proxies, local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full request URL. Malformed hosts surface as a request error on send.
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }

    fn build_payload(request: &GenerateRequest) -> ApiRequest<'_> {
        ApiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt(),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: request.system_instruction(),
                }],
            },
            tools: request.tools(),
        }
    }

    /// Pull `candidates[0].content.parts[0].text` out of a response body.
    fn extract_text(body: &str) -> Result<String, AttemptError> {
        let response: ApiResponse = serde_json::from_str(body)?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(AttemptError::MissingText)
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AttemptError> {
        let url = self.endpoint();
        let body = Self::build_payload(request);

        let resp = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(redact)?;

        let status = resp.status();
        let text = resp.text().await.map_err(redact)?;

        if !status.is_success() {
            return Err(AttemptError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(bytes = text.len(), "gemini response received");
        Self::extract_text(&text)
    }
}

/// The endpoint URL carries the key as a query parameter; keep it out of
/// error text.
fn redact(err: reqwest::Error) -> AttemptError {
    AttemptError::Request(err.without_url())
}

// --- API types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [ToolDescriptor],
}

fn no_tools(tools: &&[ToolDescriptor]) -> bool {
    tools.is_empty()
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tools: Vec<ToolDescriptor>) -> GenerateRequest {
        GenerateRequest::new("Summarize the sector", "You are a consultant.", tools).unwrap()
    }

    #[test]
    fn payload_without_tools_omits_field() {
        let req = request(vec![]);
        let json = serde_json::to_value(GeminiGenerator::build_payload(&req)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{ "parts": [{ "text": "Summarize the sector" }] }],
                "systemInstruction": { "parts": [{ "text": "You are a consultant." }] }
            })
        );
    }

    #[test]
    fn payload_with_tools_appends_them() {
        let req = request(vec![ToolDescriptor::google_search()]);
        let json = serde_json::to_value(GeminiGenerator::build_payload(&req)).unwrap();
        assert_eq!(json["tools"], serde_json::json!([{ "google_search": {} }]));
    }

    #[test]
    fn extract_text_from_first_candidate() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        }"#;
        assert_eq!(GeminiGenerator::extract_text(body).unwrap(), "first");
    }

    #[test]
    fn extract_text_missing_candidates() {
        let err = GeminiGenerator::extract_text(r#"{"promptFeedback": {}}"#).unwrap_err();
        assert!(matches!(err, AttemptError::MissingText));
    }

    #[test]
    fn extract_text_missing_parts() {
        let err = GeminiGenerator::extract_text(r#"{"candidates": [{"content": {}}]}"#).unwrap_err();
        assert!(matches!(err, AttemptError::MissingText));
    }

    #[test]
    fn extract_text_empty_string_is_missing() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#;
        let err = GeminiGenerator::extract_text(body).unwrap_err();
        assert!(matches!(err, AttemptError::MissingText));
    }

    #[test]
    fn extract_text_non_json_is_malformed() {
        let err = GeminiGenerator::extract_text("<html>502</html>").unwrap_err();
        assert!(matches!(err, AttemptError::Malformed(_)));
    }

    #[test]
    fn extract_text_non_string_text_is_malformed() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": 42}]}}]}"#;
        let err = GeminiGenerator::extract_text(body).unwrap_err();
        assert!(matches!(err, AttemptError::Malformed(_)));
    }

    #[test]
    fn endpoint_carries_model_and_key() {
        let generator = GeminiGenerator::new("secret-key", Some("gemini-test".to_string()))
            .with_base_url("http://127.0.0.1:9/");
        assert_eq!(
            generator.endpoint(),
            "http://127.0.0.1:9/v1beta/models/gemini-test:generateContent?key=secret-key"
        );
    }

    #[test]
    fn default_model_used_when_none_given() {
        let generator = GeminiGenerator::new("k", None);
        assert_eq!(generator.model(), DEFAULT_MODEL);
    }
}
