pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{AttemptError, RequestError};

/// An opaque capability hint passed through to the endpoint unmodified,
/// e.g. `{"google_search": {}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ToolDescriptor(pub serde_json::Value);

impl ToolDescriptor {
    /// Search-grounding tool understood by Gemini.
    pub fn google_search() -> Self {
        Self(serde_json::json!({ "google_search": {} }))
    }
}

/// Everything needed to issue one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    prompt: String,
    system_instruction: String,
    tools: Vec<ToolDescriptor>,
}

impl GenerateRequest {
    /// Build a request. Prompt and system instruction must carry text.
    pub fn new(
        prompt: impl Into<String>,
        system_instruction: impl Into<String>,
        tools: Vec<ToolDescriptor>,
    ) -> Result<Self, RequestError> {
        let prompt = prompt.into();
        let system_instruction = system_instruction.into();
        if prompt.trim().is_empty() {
            return Err(RequestError::EmptyPrompt);
        }
        if system_instruction.trim().is_empty() {
            return Err(RequestError::EmptySystemInstruction);
        }
        Ok(Self {
            prompt,
            system_instruction,
            tools,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }
}

/// One raw attempt at generating text. No retries at this layer:
/// the [`ResilientCaller`](crate::resilience::ResilientCaller) wraps it.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AttemptError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_prompt() {
        let err = GenerateRequest::new("  ", "be brief", vec![]).unwrap_err();
        assert_eq!(err, RequestError::EmptyPrompt);
    }

    #[test]
    fn rejects_empty_system_instruction() {
        let err = GenerateRequest::new("summarize", "", vec![]).unwrap_err();
        assert_eq!(err, RequestError::EmptySystemInstruction);
    }

    #[test]
    fn keeps_tools_in_order() {
        let tools = vec![
            ToolDescriptor::google_search(),
            ToolDescriptor(serde_json::json!({ "code_execution": {} })),
        ];
        let req = GenerateRequest::new("p", "s", tools.clone()).unwrap();
        assert_eq!(req.tools(), tools.as_slice());
        assert_eq!(req.prompt(), "p");
        assert_eq!(req.system_instruction(), "s");
    }

    #[test]
    fn google_search_serializes_verbatim() {
        let json = serde_json::to_string(&ToolDescriptor::google_search()).unwrap();
        assert_eq!(json, r#"{"google_search":{}}"#);
    }
}
