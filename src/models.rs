// Request and response bodies of the JSON API

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub prompt_id: i64,
    pub user_input: String,
    /// Overrides the prompt's model when present and non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl GenerateRequest {
    /// The requested model override, ignoring blank values
    pub fn model_override(&self) -> Option<&str> {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|model| !model.is_empty())
    }
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_deserialization() {
        let json = r#"{"prompt_id":1,"user_input":"long text"}"#;
        let request: GenerateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.prompt_id, 1);
        assert_eq!(request.user_input, "long text");
        assert!(request.model.is_none());
        assert!(request.model_override().is_none());
    }

    #[test]
    fn test_generate_request_model_override() {
        let json = r#"{"prompt_id":1,"user_input":"x","model":"gemini-2.5-pro"}"#;
        let request: GenerateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.model_override(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn test_blank_model_is_not_an_override() {
        let json = r#"{"prompt_id":1,"user_input":"x","model":"  "}"#;
        let request: GenerateRequest = serde_json::from_str(json).unwrap();
        assert!(request.model_override().is_none());
    }

    #[test]
    fn test_generate_request_requires_fields() {
        assert!(serde_json::from_str::<GenerateRequest>(r#"{"user_input":"x"}"#).is_err());
        assert!(serde_json::from_str::<GenerateRequest>(r#"{"prompt_id":1}"#).is_err());
    }

    #[test]
    fn test_error_response_serialization() {
        let body = ErrorResponse::new("Method not allowed");
        let serialized = serde_json::to_string(&body).unwrap();
        assert_eq!(serialized, r#"{"error":"Method not allowed"}"#);
    }
}
