//! Mapping between client types and Gemini types

use crate::llm::core::{
    error::LlmError,
    types::{GenerationResult, UsageMetadata},
};

use super::types::{Content, GenerateContentRequest, GenerateContentResponse, ModelInfo, Part};

/// Method name a model must support to be offered for generation
pub const GENERATE_CONTENT_METHOD: &str = "generateContent";

/// Wrap a combined prompt as a single-turn user request
pub fn to_gemini_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part::Text {
                text: prompt.to_string(),
            }],
        }],
    }
}

/// Extract the first candidate's text and the token counts
///
/// # Errors
///
/// * `LlmError::EmptyResponse` - No candidate, no content, or no parts
/// * `LlmError::UnexpectedPart` - The first part is not text
pub fn from_gemini_response(response: GenerateContentResponse) -> Result<GenerationResult, LlmError> {
    let part = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .ok_or(LlmError::EmptyResponse)?;

    let text = match part {
        Part::Text { text } => text,
        Part::Other(_) => return Err(LlmError::UnexpectedPart),
    };

    let usage = response
        .usage_metadata
        .map(|usage| UsageMetadata::new(usage.prompt_token_count, usage.candidates_token_count))
        .unwrap_or_default();

    Ok(GenerationResult::new(text, usage))
}

/// Names of the models that support content generation
pub fn generation_model_names(models: Vec<ModelInfo>) -> Vec<String> {
    models
        .into_iter()
        .filter(|model| {
            model
                .supported_generation_methods
                .iter()
                .any(|method| method == GENERATE_CONTENT_METHOD)
        })
        .map(|model| model.name)
        .collect()
}

/// Resource path for a model identifier, accepting "gemini-x" or "models/gemini-x"
pub fn model_resource(model: &str) -> String {
    if model.contains('/') {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_to_gemini_request() {
        let request = to_gemini_request("Summarize:\n---\ntext");
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, "user");
        match &request.contents[0].parts[0] {
            Part::Text { text } => assert_eq!(text, "Summarize:\n---\ntext"),
            _ => panic!("Expected text part"),
        }
    }

    #[test]
    fn test_from_gemini_response_text() {
        let result = from_gemini_response(response(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "short"}, {"text": "ignored"}]}}],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3, "totalTokenCount": 15}
        })))
        .unwrap();
        assert_eq!(result.text, "short");
        assert_eq!(result.usage, UsageMetadata::new(12, 3));
    }

    #[test]
    fn test_missing_usage_counts_as_zero() {
        let result = from_gemini_response(response(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "ok"}]}}]
        })))
        .unwrap();
        assert_eq!(result.usage, UsageMetadata::default());
    }

    #[test]
    fn test_empty_responses() {
        let cases = [
            serde_json::json!({}),
            serde_json::json!({"candidates": []}),
            serde_json::json!({"candidates": [{"finishReason": "SAFETY"}]}),
            serde_json::json!({"candidates": [{"content": {"role": "model", "parts": []}}]}),
        ];
        for case in cases {
            assert!(matches!(
                from_gemini_response(response(case)),
                Err(LlmError::EmptyResponse)
            ));
        }
    }

    #[test]
    fn test_non_text_first_part() {
        let result = from_gemini_response(response(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [
                {"functionCall": {"name": "lookup", "args": {}}},
                {"text": "later"}
            ]}}]
        })));
        assert!(matches!(result, Err(LlmError::UnexpectedPart)));
    }

    #[test]
    fn test_generation_model_names_filters() {
        let models = vec![
            ModelInfo {
                name: "models/gemini-2.5-flash".to_string(),
                supported_generation_methods: vec![
                    "generateContent".to_string(),
                    "countTokens".to_string(),
                ],
            },
            ModelInfo {
                name: "models/text-embedding-004".to_string(),
                supported_generation_methods: vec!["embedContent".to_string()],
            },
        ];
        assert_eq!(
            generation_model_names(models),
            vec!["models/gemini-2.5-flash".to_string()]
        );
    }

    #[test]
    fn test_model_resource() {
        assert_eq!(model_resource("gemini-2.5-flash"), "models/gemini-2.5-flash");
        assert_eq!(model_resource("models/gemini-2.5-flash"), "models/gemini-2.5-flash");
        assert_eq!(model_resource("tunedModels/mine"), "tunedModels/mine");
    }
}
